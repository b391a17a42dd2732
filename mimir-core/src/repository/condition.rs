/*!

Conjunctive conditions (spec §3 "Conjunctive condition").

*/

use crate::define_handle;
use crate::repository::{
    ground::GroundLiteralId, literal::LiteralId, numeric::NumericConstraintId, terms::VariableId,
};

define_handle!(
    /// Handle to an interned [`ConjunctiveCondition`].
    ConjunctiveConditionId
);

/// `(parameters, static_literals, fluent_literals, derived_literals,
/// nullary_static_ground_literals, nullary_fluent_ground_literals,
/// nullary_derived_ground_literals, numeric_constraints, nullary_numeric_constraints)`.
///
/// Arity-0 literals and constraints are split out from their lifted counterparts
/// because an arity-0 atom has an empty term list and is therefore *already* ground —
/// it can be evaluated once against a state in O(1), before any binding enumeration
/// (spec §4.6 step 1), rather than re-checked per candidate binding. All list fields
/// are sorted by handle index so that the condition record itself is
/// interning-friendly (two conditions built from the same literal *set*, regardless of
/// construction order, intern to one handle).
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConjunctiveCondition {
    pub parameters: Vec<VariableId>,

    pub static_literals: Vec<LiteralId>,
    pub fluent_literals: Vec<LiteralId>,
    pub derived_literals: Vec<LiteralId>,

    pub nullary_static_ground_literals: Vec<GroundLiteralId>,
    pub nullary_fluent_ground_literals: Vec<GroundLiteralId>,
    pub nullary_derived_ground_literals: Vec<GroundLiteralId>,

    pub numeric_constraints: Vec<NumericConstraintId>,
    pub nullary_numeric_constraints: Vec<NumericConstraintId>,
}

impl ConjunctiveCondition {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Every literal list (fluent, static, derived), in the fixed "capability set"
    /// order the design notes prescribe (spec §9): static, then fluent, then derived.
    pub fn all_non_nullary_literals(&self) -> impl Iterator<Item = LiteralId> + '_ {
        self.static_literals
            .iter()
            .chain(self.fluent_literals.iter())
            .chain(self.derived_literals.iter())
            .copied()
    }
}
