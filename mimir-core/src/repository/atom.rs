/*!

Lifted atoms (spec §3).

*/

use crate::define_handle;
use crate::repository::{predicate::PredicateId, terms::Term};

define_handle!(
    /// Handle to an interned [`Atom`].
    AtomId
);

/// A predicate applied to a term list whose length equals the predicate's arity.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Atom {
    pub predicate: PredicateId,
    pub terms: Vec<Term>,
}

impl Atom {
    pub fn arity(&self) -> usize {
        self.terms.len()
    }
}
