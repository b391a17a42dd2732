/*!

Ground atoms, ground literals, and ground functions (spec §3). These are the densely-
indexed entities every state bitset and numeric vector is keyed by.

*/

use crate::define_handle;
use crate::repository::{function::FunctionSkeletonId, predicate::PredicateId, terms::ObjectId};

define_handle!(
    /// Handle to an interned [`GroundAtom`]. A `GroundAtom`'s index is the bit
    /// position it occupies in every state's fluent/derived bitset.
    GroundAtomId
);

define_handle!(
    /// Handle to an interned [`GroundLiteral`].
    GroundLiteralId
);

define_handle!(
    /// Handle to an interned [`GroundFunction`]. A `GroundFunction`'s index is the
    /// position it occupies in a state's fluent-numeric-variable vector.
    GroundFunctionId
);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundAtom {
    pub predicate: PredicateId,
    pub terms: Vec<ObjectId>,
}

impl GroundAtom {
    pub fn arity(&self) -> usize {
        self.terms.len()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundLiteral {
    pub polarity: bool,
    pub atom: GroundAtomId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GroundFunction {
    pub skeleton: FunctionSkeletonId,
    pub terms: Vec<ObjectId>,
}
