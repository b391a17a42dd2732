/*!

Objects, variables, and the [`Term`]s built from them (spec §3 "Terms").

*/

use crate::define_handle;
use mimir_abs::IString;

define_handle!(
    /// Handle to an interned [`Object`].
    ObjectId
);

define_handle!(
    /// Handle to an interned [`Variable`].
    VariableId
);

/// A named constant of the domain/problem. Objects carry no type tag of their own —
/// typing is expressed the usual STRIPS-compilation way, as ordinary static unary
/// predicates, which keeps the data model exactly the entity list spec §3 enumerates.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Object {
    pub name: IString,
}

/// A schema-local variable, freshly interned per enclosing action schema or axiom by
/// the translator's Pass 1 (spec §4.3), carrying the column position ("parameter
/// index") it occupies in that schema's parameter list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variable {
    pub name: IString,
    pub parameter_index: u32,
}

/// A term is either a bound object or a positioned variable. The `parameter_index` is
/// duplicated onto the `Term` itself (rather than requiring a `Repository` dereference
/// of the `VariableId` to recover it) so hot-path code — binding application,
/// consistency-graph construction — can read it in O(1), the same precomputation
/// motivation translator Pass 2 states for numeric-constraint remapping (spec §4.3).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Term {
    Object(ObjectId),
    Variable(VariableId, u32),
}

impl Term {
    #[inline]
    pub fn as_variable_index(&self) -> Option<u32> {
        match self {
            Term::Variable(_, parameter_index) => Some(*parameter_index),
            Term::Object(_) => None,
        }
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(..))
    }
}
