/*!

The action grounder & axiom grounder (spec §4.7): given a schema (or axiom) and a
binding already produced by the binding generator, builds the ground STRIPS
precondition/effect representation and interns the result keyed by `(schema, binding)`
so repeated groundings of the same instance return the same handle.

`GroundAction`/`GroundAxiom` are not `Repository` entities — spec §3's entity
enumeration for the Repository stops at the lifted level, and this is a separate
component (spec §4.7 is its own section, distinct from §4.1's Repository). Keying the
intern lookup on a small `(schema, binding)` struct rather than the full ground record
avoids hashing a precondition bitset on every grounding call once the cheap key already
decides identity — the same "small key, bulkier payload behind it" split
[`crate::state::StateStore`] uses for states.

*/

use crate::config::Options;
use crate::consistency_graph::StaticConsistencyGraph;
use crate::define_handle;
use crate::repository::{
    ActionSchemaId, AxiomId, ConditionalEffectId, LiteralId, NumericConstraintId, NumericEffectId, ObjectId, Repository, Term,
};
use crate::state::{evaluate_expr_exact, ground_function_index};
use mimir_abs::{InternTable, NatSet};

define_handle!(
    /// Handle to an interned [`GroundAction`].
    GroundActionId
);

define_handle!(
    /// Handle to an interned [`GroundAxiom`].
    GroundAxiomId
);

#[inline]
fn resolve_term(term: Term, binding: &[ObjectId]) -> ObjectId {
    match term {
        Term::Object(object) => object,
        Term::Variable(_, parameter_index) => binding[parameter_index as usize],
    }
}

/// Splits a lifted literal list into positive/negative ground-atom bitsets, interning
/// any atom not already seen (spec §4.7 "ground the head/effect atoms ... O(arity) per
/// atom"). Equality literals never appear in an effect or a precondition bitset — `=`
/// is a native per-pair filter consumed entirely by the binding generator, so by the
/// time a binding reaches the grounder every remaining literal is an ordinary
/// predicate.
pub(crate) fn ground_literal_list(repository: &mut Repository, literals: &[LiteralId], binding: &[ObjectId], positive: &mut NatSet, negative: &mut NatSet) {
    for &literal in literals {
        let literal = *repository.literals.get(literal.as_usize());
        let atom = repository.atoms.get(literal.atom.as_usize()).clone();
        let objects: Vec<ObjectId> = atom.terms.iter().map(|&t| resolve_term(t, binding)).collect();
        let index = repository.ground_atoms.get_or_create(crate::repository::GroundAtom { predicate: atom.predicate, terms: objects });
        if literal.polarity {
            positive.insert(index);
        } else {
            negative.insert(index);
        }
    }
}

/// A fully ground action instance (spec §4.7). Static preconditions are not
/// represented here at all — the consistency graph already enforced them at
/// binding-generation time and spec §4.7 explicitly discards them from the ground
/// instance — so applicability at a later state only ever needs to consult the
/// fluent/derived bitsets and the numeric constraints below.
#[derive(Clone)]
pub struct GroundAction {
    pub schema: ActionSchemaId,
    pub binding: Vec<ObjectId>,
    pub positive_fluent_precondition: NatSet,
    pub negative_fluent_precondition: NatSet,
    pub positive_derived_precondition: NatSet,
    pub negative_derived_precondition: NatSet,
    pub numeric_precondition: Vec<NumericConstraintId>,
    pub positive_fluent_effect: NatSet,
    pub negative_fluent_effect: NatSet,
    pub numeric_effects: Vec<NumericEffectId>,
    pub auxiliary_numeric_effect: Option<NumericEffectId>,
    /// One entry per conditional effect of the schema whose own quantifier expansion
    /// (over its static consistency subgraph, spec §4.7) produced at least a
    /// structurally-valid completion. The condition itself is re-tested in full,
    /// against the *current* state, at successor-computation time (spec §4.9 step 2)
    /// — nothing about whether it actually fires is baked in here, since the same
    /// `GroundAction` is reused across every state it is ever applicable in.
    pub conditional_effects: Vec<(ConditionalEffectId, Vec<ObjectId>)>,
}

/// A fully ground axiom instance (spec §4.7, §4.8): `head` is the ground atom the
/// axiom derives; the body precondition is represented the same four-bitset-plus-
/// numeric-constraints way a `GroundAction`'s precondition is, since axiom bodies are
/// conjunctive conditions exactly like action preconditions.
#[derive(Clone)]
pub struct GroundAxiom {
    pub axiom: AxiomId,
    pub binding: Vec<ObjectId>,
    pub head: crate::repository::GroundAtomId,
    pub positive_fluent_precondition: NatSet,
    pub negative_fluent_precondition: NatSet,
    pub positive_derived_precondition: NatSet,
    pub negative_derived_precondition: NatSet,
    pub numeric_precondition: Vec<NumericConstraintId>,
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct GroundActionKey {
    schema: ActionSchemaId,
    binding: Vec<ObjectId>,
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct GroundAxiomKey {
    axiom: AxiomId,
    binding: Vec<ObjectId>,
}

/// Intern store for [`GroundAction`]s, keyed by `(schema, binding)` (spec §4.7 "repeated
/// groundings return the same handle").
#[derive(Default)]
pub struct GroundActionStore {
    keys: InternTable<GroundActionKey>,
    actions: Vec<GroundAction>,
}

impl GroundActionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: GroundActionId) -> &GroundAction {
        &self.actions[handle.as_usize()]
    }

    /// Looks up `(schema, binding)`, grounding and interning it if this is the first
    /// time this exact instance has been requested.
    pub fn get_or_ground(
        &mut self,
        repository: &mut Repository,
        schema_id: ActionSchemaId,
        binding: Vec<ObjectId>,
        conditional_graphs: &[StaticConsistencyGraph],
    ) -> GroundActionId {
        let key = GroundActionKey { schema: schema_id, binding: binding.clone() };
        let index = self.keys.get_or_insert(key);
        if index == self.actions.len() {
            let action = ground_action(repository, schema_id, binding, conditional_graphs);
            self.actions.push(action);
        }
        GroundActionId::from_usize(index)
    }
}

/// Intern store for [`GroundAxiom`]s, keyed by `(axiom, binding)`.
#[derive(Default)]
pub struct GroundAxiomStore {
    keys: InternTable<GroundAxiomKey>,
    axioms: Vec<GroundAxiom>,
}

impl GroundAxiomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: GroundAxiomId) -> &GroundAxiom {
        &self.axioms[handle.as_usize()]
    }

    pub fn get_or_ground(&mut self, repository: &mut Repository, axiom_id: AxiomId, binding: Vec<ObjectId>) -> GroundAxiomId {
        let key = GroundAxiomKey { axiom: axiom_id, binding: binding.clone() };
        let index = self.keys.get_or_insert(key);
        if index == self.axioms.len() {
            let axiom = ground_axiom(repository, axiom_id, binding);
            self.axioms.push(axiom);
        }
        GroundAxiomId::from_usize(index)
    }
}

fn ground_action(
    repository: &mut Repository,
    schema_id: ActionSchemaId,
    binding: Vec<ObjectId>,
    conditional_graphs: &[StaticConsistencyGraph],
) -> GroundAction {
    let schema = repository.action_schemas.get(schema_id.as_usize()).clone();
    let condition = repository.conditions.get(schema.condition.as_usize()).clone();

    let mut positive_fluent_precondition = NatSet::new();
    let mut negative_fluent_precondition = NatSet::new();
    ground_literal_list(repository, &condition.fluent_literals, &binding, &mut positive_fluent_precondition, &mut negative_fluent_precondition);
    for &ground_literal in &condition.nullary_fluent_ground_literals {
        let ground_literal = *repository.ground_literals.get(ground_literal.as_usize());
        if ground_literal.polarity {
            positive_fluent_precondition.insert(ground_literal.atom.as_usize());
        } else {
            negative_fluent_precondition.insert(ground_literal.atom.as_usize());
        }
    }

    let mut positive_derived_precondition = NatSet::new();
    let mut negative_derived_precondition = NatSet::new();
    ground_literal_list(repository, &condition.derived_literals, &binding, &mut positive_derived_precondition, &mut negative_derived_precondition);
    for &ground_literal in &condition.nullary_derived_ground_literals {
        let ground_literal = *repository.ground_literals.get(ground_literal.as_usize());
        if ground_literal.polarity {
            positive_derived_precondition.insert(ground_literal.atom.as_usize());
        } else {
            negative_derived_precondition.insert(ground_literal.atom.as_usize());
        }
    }

    let mut numeric_precondition = condition.numeric_constraints.clone();
    numeric_precondition.extend(condition.nullary_numeric_constraints.iter().copied());

    let effect = repository.effects.get(schema.effect.as_usize()).clone();
    let mut positive_fluent_effect = NatSet::new();
    let mut negative_fluent_effect = NatSet::new();
    ground_literal_list(repository, &effect.fluent_literal_effects, &binding, &mut positive_fluent_effect, &mut negative_fluent_effect);

    let conditional_effects = ground_conditional_effects(&schema.conditional_effects, &binding, conditional_graphs);

    GroundAction {
        schema: schema_id,
        binding,
        positive_fluent_precondition,
        negative_fluent_precondition,
        positive_derived_precondition,
        negative_derived_precondition,
        numeric_precondition,
        positive_fluent_effect,
        negative_fluent_effect,
        numeric_effects: effect.fluent_numeric_effects.clone(),
        auxiliary_numeric_effect: effect.auxiliary_numeric_effect,
        conditional_effects,
    }
}

/// Expands every conditional effect's own quantified variables (spec §4.7 "extending
/// the binding with quantified variables by another clique enumeration over the
/// conditional effect's own static consistency subgraph"). `conditional_graphs[i]`
/// must be the graph built (via [`crate::consistency_graph::build`]) for
/// `schema.conditional_effects[i]`'s condition, with `binding` already supplied as
/// that build's `outer_binding` (sparse `(parameter_index, object)` pairs) — the
/// caller constructs these once per schema and reuses them across every grounding,
/// the same "built once, reused" discipline spec §12 calls for assignment sets.
fn ground_conditional_effects(
    conditional_effect_ids: &[ConditionalEffectId],
    binding: &[ObjectId],
    conditional_graphs: &[StaticConsistencyGraph],
) -> Vec<(ConditionalEffectId, Vec<ObjectId>)> {
    let outer_binding: Vec<(u32, ObjectId)> = binding.iter().enumerate().map(|(i, &o)| (i as u32, o)).collect();

    let mut instances = Vec::new();
    for (&conditional_effect_id, graph) in conditional_effect_ids.iter().zip(conditional_graphs.iter()) {
        for assignment in structural_completions(graph, &outer_binding) {
            let full_binding = crate::binding_generator::resolve_outer_as_binding(&assignment);
            instances.push((conditional_effect_id, full_binding));
        }
    }
    instances
}

/// Enumerates every structurally-valid completion of `graph` given `outer_binding` —
/// a plain clique enumeration with no per-state dynamic narrowing, since quantifier
/// expansion at grounding time only needs to respect the *static* part of the "when"
/// condition (already baked into `graph`'s edges); the fluent/derived/numeric part is
/// deferred to a full [`crate::condition_eval::holds`] test at successor time (spec
/// §4.9 step 2), since baking state-dependent truth into a cached, state-independent
/// `GroundAction` would be unsound.
fn structural_completions(graph: &StaticConsistencyGraph, outer_binding: &[(u32, ObjectId)]) -> Vec<Vec<(u32, ObjectId)>> {
    if graph.arity == 0 {
        return vec![outer_binding.to_vec()];
    }

    let mut results = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(graph.arity);
    recurse_completions(graph, 0, &mut stack, outer_binding, &mut results);
    results
}

fn recurse_completions(
    graph: &StaticConsistencyGraph,
    depth: usize,
    stack: &mut Vec<usize>,
    outer_binding: &[(u32, ObjectId)],
    results: &mut Vec<Vec<(u32, ObjectId)>>,
) {
    if depth == graph.arity {
        let mut assignment = outer_binding.to_vec();
        for (i, &vertex) in stack.iter().enumerate() {
            assignment.push((graph.param_columns[i], graph.vertex_info[vertex].1));
        }
        results.push(assignment);
        return;
    }
    for vertex in graph.partition_range(depth) {
        if stack.iter().all(|&picked| graph.adjacency[picked].contains(vertex)) {
            stack.push(vertex);
            recurse_completions(graph, depth + 1, stack, outer_binding, results);
            stack.pop();
        }
    }
}

fn ground_axiom(repository: &mut Repository, axiom_id: AxiomId, binding: Vec<ObjectId>) -> GroundAxiom {
    let axiom = *repository.axioms.get(axiom_id.as_usize());
    let condition = repository.conditions.get(axiom.condition.as_usize()).clone();

    let mut positive_fluent_precondition = NatSet::new();
    let mut negative_fluent_precondition = NatSet::new();
    ground_literal_list(repository, &condition.fluent_literals, &binding, &mut positive_fluent_precondition, &mut negative_fluent_precondition);
    for &ground_literal in &condition.nullary_fluent_ground_literals {
        let ground_literal = *repository.ground_literals.get(ground_literal.as_usize());
        if ground_literal.polarity {
            positive_fluent_precondition.insert(ground_literal.atom.as_usize());
        } else {
            negative_fluent_precondition.insert(ground_literal.atom.as_usize());
        }
    }

    let mut positive_derived_precondition = NatSet::new();
    let mut negative_derived_precondition = NatSet::new();
    ground_literal_list(repository, &condition.derived_literals, &binding, &mut positive_derived_precondition, &mut negative_derived_precondition);
    for &ground_literal in &condition.nullary_derived_ground_literals {
        let ground_literal = *repository.ground_literals.get(ground_literal.as_usize());
        if ground_literal.polarity {
            positive_derived_precondition.insert(ground_literal.atom.as_usize());
        } else {
            negative_derived_precondition.insert(ground_literal.atom.as_usize());
        }
    }

    let mut numeric_precondition = condition.numeric_constraints.clone();
    numeric_precondition.extend(condition.nullary_numeric_constraints.iter().copied());

    let head = repository.literals.get(axiom.head.as_usize()).clone();
    let head_atom = repository.atoms.get(head.atom.as_usize()).clone();
    let head_objects: Vec<ObjectId> = head_atom.terms.iter().map(|&t| resolve_term(t, &binding)).collect();
    let head_ground_atom = repository.ground_atoms.get_or_create(crate::repository::GroundAtom { predicate: head_atom.predicate, terms: head_objects });

    GroundAxiom {
        axiom: axiom_id,
        binding,
        head: crate::repository::GroundAtomId::from_usize(head_ground_atom),
        positive_fluent_precondition,
        negative_fluent_precondition,
        positive_derived_precondition,
        negative_derived_precondition,
        numeric_precondition,
    }
}

/// Evaluates a ground action's numeric cost (spec §4.7): the rhs of its auxiliary
/// (`total-cost`) numeric effect, under the state's numerics, or
/// `options.action_cost_default` if there is no cost effect at all or it evaluates to
/// `NaN` (spec §9's "legacy no-`:action-costs`" fallback convention).
pub fn ground_action_cost(repository: &Repository, action: &GroundAction, state_numerics: &[f64], options: &Options) -> f64 {
    match action.auxiliary_numeric_effect {
        Some(effect_id) => {
            let effect = repository.numeric_effects.get(effect_id.as_usize());
            let value = evaluate_expr_exact(repository, &action.binding, state_numerics, effect.rhs);
            if value.is_nan() {
                options.action_cost_default as f64
            } else {
                value
            }
        }
        None => options.action_cost_default as f64,
    }
}

/// Resolves the ground function backing a numeric effect's target `FunctionTerm` under
/// a binding — a thin convenience over [`ground_function_index`] used by the successor
/// function when applying an action's own numeric effects.
pub fn ground_effect_target(repository: &Repository, numeric_effect: NumericEffectId, binding: &[ObjectId]) -> Option<crate::repository::GroundFunctionId> {
    let numeric_effect = repository.numeric_effects.get(numeric_effect.as_usize());
    let function = repository.function_terms.get(numeric_effect.target.as_usize());
    let objects: Vec<ObjectId> = function.terms.iter().map(|&t| resolve_term(t, binding)).collect();
    ground_function_index(repository, function.skeleton, objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::*;
    use mimir_abs::IString;

    /// `(unstack ?x ?y)` with precondition `(on ?x ?y) & (clear ?x) & handempty` and
    /// effect `(not (on ?x ?y)) & (clear ?y) & (holding ?x) & (not handempty)`, all on
    /// fluent predicates — grounded against the binding `(b1, b2)` should produce the
    /// exact bitset spec §8's Blocksworld scenario expects, with no leftover static
    /// preconditions anywhere in the ground instance.
    #[test]
    fn grounding_builds_fluent_bitsets_and_drops_static_preconditions() {
        let mut repo = Repository::new();

        let on = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("on"), arity: 2 }));
        let clear = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("clear"), arity: 1 }));

        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));
        let y = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?y"), parameter_index: 1 }));

        let on_xy = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: on, terms: vec![Term::Variable(x, 0), Term::Variable(y, 1)] }));
        let clear_x = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: clear, terms: vec![Term::Variable(x, 0)] }));
        let clear_y = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: clear, terms: vec![Term::Variable(y, 1)] }));

        let pre_on = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: on_xy }));
        let pre_clear_x = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: clear_x }));
        let eff_not_on = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: on_xy }));
        let eff_clear_y = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: clear_y }));

        let condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
            parameters: vec![x, y],
            fluent_literals: vec![pre_on, pre_clear_x],
            ..Default::default()
        }));
        let effect = ConjunctiveEffectId::from_usize(repo.effects.get_or_create(ConjunctiveEffect {
            parameters: vec![],
            fluent_literal_effects: vec![eff_not_on, eff_clear_y],
            ..Default::default()
        }));
        let schema_id = ActionSchemaId::from_usize(repo.action_schemas.get_or_create(ActionSchema {
            name: IString::from("unstack"),
            original_arity: 2,
            parameters: vec![x, y],
            condition,
            effect,
            conditional_effects: vec![],
        }));

        let b1 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b1") }));
        let b2 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b2") }));

        let mut store = GroundActionStore::new();
        let handle = store.get_or_ground(&mut repo, schema_id, vec![b1, b2], &[]);
        let action = store.get(handle);

        let on_b1_b2 = repo.ground_atoms.index_of(&GroundAtom { predicate: on, terms: vec![b1, b2] }).unwrap();
        let clear_b1 = repo.ground_atoms.index_of(&GroundAtom { predicate: clear, terms: vec![b1] }).unwrap();
        let clear_b2 = repo.ground_atoms.index_of(&GroundAtom { predicate: clear, terms: vec![b2] }).unwrap();

        assert!(action.positive_fluent_precondition.contains(on_b1_b2));
        assert!(action.positive_fluent_precondition.contains(clear_b1));
        assert!(action.negative_fluent_precondition.is_empty());
        assert!(action.negative_fluent_effect.contains(on_b1_b2));
        assert!(action.positive_fluent_effect.contains(clear_b2));
        assert!(action.conditional_effects.is_empty());

        // Re-grounding the identical (schema, binding) pair returns the same handle.
        let again = store.get_or_ground(&mut repo, schema_id, vec![b1, b2], &[]);
        assert_eq!(handle.as_usize(), again.as_usize());
    }

    #[test]
    fn cost_falls_back_to_default_when_no_cost_effect() {
        let repo = Repository::new();
        let action = GroundAction {
            schema: ActionSchemaId::from_usize(0),
            binding: vec![],
            positive_fluent_precondition: NatSet::new(),
            negative_fluent_precondition: NatSet::new(),
            positive_derived_precondition: NatSet::new(),
            negative_derived_precondition: NatSet::new(),
            numeric_precondition: vec![],
            positive_fluent_effect: NatSet::new(),
            negative_fluent_effect: NatSet::new(),
            numeric_effects: vec![],
            auxiliary_numeric_effect: None,
            conditional_effects: vec![],
        };
        let options = Options::default();
        assert_eq!(ground_action_cost(&repo, &action, &[], &options), 1.0);
    }
}
