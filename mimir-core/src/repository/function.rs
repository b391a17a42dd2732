/*!

Numeric function skeletons and function terms (spec §3 "Function kinds", "Functions").

*/

use crate::define_handle;
use crate::repository::terms::Term;
use mimir_abs::IString;

define_handle!(
    /// Handle to an interned [`FunctionSkeleton`].
    FunctionSkeletonId
);

define_handle!(
    /// Handle to an interned [`FunctionTerm`].
    FunctionTermId
);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSkeleton {
    pub name: IString,
    pub arity: u32,
}

/// Numeric function skeletons partition the same way predicates do (spec §3), plus one
/// distinguished `Auxiliary` skeleton: `total-cost`, the sole carrier of accumulated
/// plan cost.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionKind {
    /// Never changed by any effect.
    Static,
    /// Changed by some numeric effect.
    Fluent,
    /// The single `total-cost` skeleton.
    Auxiliary,
}

/// A function term: a skeleton applied to a term list of the skeleton's arity.
///
/// The "parent-terms-to-function-terms" remapping vector (spec §4.3 Pass 2) is *not*
/// stored here — it is meaningful only relative to one enclosing numeric constraint's
/// own canonical term list, so per spec §4.3's explicit either/or, it is stored on the
/// [`crate::repository::numeric::NumericConstraint`] that uses this function term,
/// indexed by this handle.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionTerm {
    pub skeleton: FunctionSkeletonId,
    pub terms: Vec<Term>,
}
