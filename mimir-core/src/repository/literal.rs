/*!

Lifted literals (spec §3).

*/

use crate::define_handle;
use crate::repository::atom::AtomId;

define_handle!(
    /// Handle to an interned [`Literal`].
    LiteralId
);

/// `(polarity, atom)`. `polarity = true` means the atom must hold; `false` means it
/// must not.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Literal {
    pub polarity: bool,
    pub atom: AtomId,
}
