/*!

Predicates (spec §3 "Predicate kinds").

*/

use crate::define_handle;
use mimir_abs::IString;

define_handle!(
    /// Handle to an interned [`Predicate`].
    PredicateId
);

/// A predicate skeleton: name + arity. The `=` predicate is recognized by name per
/// spec §6(d) and is never asserted/denied by effects.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Predicate {
    pub name: IString,
    pub arity: u32,
}

impl Predicate {
    pub fn is_equality(&self) -> bool {
        &*self.name == "="
    }
}

/// The three disjoint tags a predicate can carry, computed during translation by
/// static analysis over action effects and axiom heads (spec §3). Modeled as a tagged
/// variant rather than a class hierarchy, per the design notes' "polymorphism over
/// predicate/function kinds" guidance (spec §9): components consume a capability set
/// (read-only on `Static`, read-write on `Fluent`, derivable-only on `Derived`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PredicateKind {
    /// Never appears in any effect head.
    Static,
    /// Appears in at least one action effect head.
    Fluent,
    /// Appears in at least one axiom head.
    Derived,
}
