/*!

Conjunctive and conditional effects (spec §3 "Conjunctive effect", "Conditional
effect").

*/

use crate::define_handle;
use crate::repository::{
    condition::ConjunctiveConditionId, literal::LiteralId, numeric::NumericEffectId, terms::VariableId,
};

define_handle!(
    /// Handle to an interned [`ConjunctiveEffect`].
    ConjunctiveEffectId
);

define_handle!(
    /// Handle to an interned [`ConditionalEffect`].
    ConditionalEffectId
);

/// `(parameters, fluent_literal_effects, fluent_numeric_effects,
/// auxiliary_numeric_effect)`. `auxiliary_numeric_effect` is the (optional) effect on
/// the distinguished `total-cost` function; an action schema's cost expression is
/// exactly this field's right-hand side (spec §4.7), so there is no separate
/// "cost_expr" field anywhere in the data model.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConjunctiveEffect {
    pub parameters: Vec<VariableId>,
    pub fluent_literal_effects: Vec<LiteralId>,
    pub fluent_numeric_effects: Vec<NumericEffectId>,
    pub auxiliary_numeric_effect: Option<NumericEffectId>,
}

/// `(conjunctive_condition, conjunctive_effect)`: applied only when `condition` holds
/// in the current state.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConditionalEffect {
    pub condition: ConjunctiveConditionId,
    pub effect: ConjunctiveEffectId,
}
