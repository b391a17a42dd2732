/*!

Action schemas and axioms (spec §3 "Action schema", "Axiom").

*/

use crate::define_handle;
use crate::repository::{
    condition::ConjunctiveConditionId, effect::ConjunctiveEffectId, literal::LiteralId, terms::VariableId,
};
use mimir_abs::IString;

define_handle!(
    /// Handle to an interned [`ActionSchema`].
    ActionSchemaId
);

define_handle!(
    /// Handle to an interned [`Axiom`].
    AxiomId
);

/// `(name, original_arity, parameters, conjunctive_condition, conjunctive_effect,
/// conditional_effects)`. `original_arity` is the number of user-declared parameters
/// before the translator appended any extra parameters for quantified conditional
/// effects (spec §3); parameters at index `>= original_arity` exist only to carry the
/// `forall` quantifiers of `conditional_effects`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ActionSchema {
    pub name: IString,
    pub original_arity: u32,
    pub parameters: Vec<VariableId>,
    pub condition: ConjunctiveConditionId,
    pub effect: ConjunctiveEffectId,
    pub conditional_effects: Vec<ConditionalEffectId>,
}

impl ActionSchema {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

/// `(conjunctive_condition, head_literal)`. `head_literal.atom.predicate` must be
/// tagged `Derived` and `head_literal.polarity` must be `true` (spec §3 invariant).
/// An axiom's parameter list is exactly the parameters of its head atom, extended with
/// any additional variables that occur only in its body, in canonical order (spec §3
/// invariant) — that full parameter list lives on `condition.parameters`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Axiom {
    pub condition: ConjunctiveConditionId,
    pub head: LiteralId,
}
