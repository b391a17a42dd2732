/*!

The top-level `Grounder` (spec §6 "Grounder API"): ties a finalized `Domain`/`Problem`
pair to the per-condition static consistency graphs, axiom partitioning, and intern
stores every other module exposes only as free functions over explicit state, and
presents the five operations a search loop actually drives: `initial_state`,
`applicable_actions`, `successor`, `is_goal`, `cost`.

*/

use crate::assignment_set::{build_numeric_tables, build_propositional_tables, StaticFacts};
use crate::axiom_evaluator;
use crate::binding_generator::{self, DynamicFacts};
use crate::config::{DeadlineToken, Options};
use crate::consistency_graph::{self, StaticConsistencyGraph};
use crate::domain::Domain;
use crate::error::{MimirError, Result};
use crate::ground::{self, GroundAction, GroundActionId, GroundActionStore, GroundAxiomStore};
use crate::problem::Problem;
use crate::repository::{GroundAtom, GroundFunction, ObjectId, Repository, Term};
use crate::state::{StateHandle, StateStore};
use crate::stratify::{self, AxiomPartition};
use mimir_abs::NatSet;

#[inline]
fn resolve_term(term: Term, binding: &[ObjectId]) -> ObjectId {
    match term {
        Term::Object(object) => object,
        Term::Variable(_, parameter_index) => binding[parameter_index as usize],
    }
}

/// Everything the grounder precomputes once, at load time, and reuses across every
/// subsequent call (spec §12): one static consistency graph per schema's own
/// condition, one per conditional effect's own quantified condition (nested per
/// schema), and one per axiom — plus the stratification the axiom evaluator consumes.
pub struct Grounder {
    repository: Repository,
    domain: Domain,
    problem: Problem,
    options: Options,

    objects: Vec<ObjectId>,
    static_atoms: NatSet,
    static_facts: StaticFacts,

    action_graphs: Vec<StaticConsistencyGraph>,
    action_conditional_graphs: Vec<Vec<StaticConsistencyGraph>>,
    axiom_graphs: Vec<StaticConsistencyGraph>,
    axiom_partitions: Vec<AxiomPartition>,

    ground_actions: GroundActionStore,
    ground_axioms: GroundAxiomStore,
    states: StateStore,
}

impl Grounder {
    /// Builds every static consistency graph and the axiom stratification once, from
    /// a finalized `Domain`/`Problem` pair sharing `repository` (spec §4.2, §4.5,
    /// §4.8). The problem's initial fluent literals whose predicate is `Static`
    /// become `static_atoms`; static predicates never appear in any effect, so this
    /// set never changes for the lifetime of the grounder.
    pub fn new(repository: Repository, domain: Domain, problem: Problem, options: Options) -> Result<Self> {
        let objects = problem.all_objects(&domain);

        let mut static_atoms = NatSet::new();
        for &literal in &problem.initial_fluent_literals {
            let ground_literal = repository.ground_literals.get(literal.as_usize());
            let atom = repository.ground_atoms.get(ground_literal.atom.as_usize());
            if matches!(domain.predicate_kind(atom.predicate), crate::repository::PredicateKind::Static) {
                static_atoms.insert(ground_literal.atom.as_usize());
            }
        }
        // Static function values never change either, so they are baked into the
        // static numeric tables up front from the problem's initial assignment —
        // the only place any function is ever given a value in this design.
        let mut static_numerics = vec![f64::NAN; repository.ground_functions.count()];
        for &(function, value) in &problem.initial_function_values {
            let skeleton = repository.ground_functions.get(function.as_usize()).skeleton;
            if matches!(domain.function_kind(skeleton), crate::repository::FunctionKind::Static) {
                static_numerics[function.as_usize()] = value;
            }
        }
        let static_facts = StaticFacts {
            atoms: build_propositional_tables(&repository, &static_atoms),
            functions: build_numeric_tables(&repository, &static_numerics),
        };

        let mut action_graphs = Vec::with_capacity(domain.actions.len());
        let mut action_conditional_graphs = Vec::with_capacity(domain.actions.len());
        for &schema_id in &domain.actions {
            let schema = repository.action_schemas.get(schema_id.as_usize()).clone();
            let condition = repository.conditions.get(schema.condition.as_usize());
            let graph = consistency_graph::build(&repository, &domain, &objects, &static_facts, condition, &[]);

            let mut conditional_graphs = Vec::with_capacity(schema.conditional_effects.len());
            for &conditional_effect_id in &schema.conditional_effects {
                let conditional_effect = *repository.conditional_effects.get(conditional_effect_id.as_usize());
                let conditional_condition = repository.conditions.get(conditional_effect.condition.as_usize());
                // Built with an empty outer binding rather than the schema's real
                // parameters: a static literal mixing an outer and a local column
                // then falls back to `literal_consistent`'s single-bound-column
                // branch, a projection ("does some completion exist") check that is
                // a sound over-approximation regardless of which object the outer
                // column is eventually bound to. This graph is built once and reused
                // for every grounding of this schema (spec §12); baking in one
                // concrete outer binding would make it correct for only one caller.
                // Whatever structural completions this under-prunes too little on
                // survive into `GroundAction::conditional_effects` and are filtered
                // for real at successor time by the full `condition_eval::holds`
                // check against the actual state and binding.
                let graph = consistency_graph::build(&repository, &domain, &objects, &static_facts, conditional_condition, &[]);
                conditional_graphs.push(graph);
            }
            action_graphs.push(graph);
            action_conditional_graphs.push(conditional_graphs);
        }

        let mut axiom_graphs = Vec::with_capacity(repository.axioms.count());
        for index in 0..repository.axioms.count() {
            let axiom = *repository.axioms.get(index);
            let condition = repository.conditions.get(axiom.condition.as_usize());
            axiom_graphs.push(consistency_graph::build(&repository, &domain, &objects, &static_facts, condition, &[]));
        }

        let all_axioms: Vec<_> = (0..repository.axioms.count()).map(crate::repository::AxiomId::from_usize).collect();
        let axiom_partitions = stratify::compute_axiom_partitioning(&repository, &all_axioms, &domain.derived_predicates)?;

        Ok(Self {
            repository,
            domain,
            problem,
            options,
            objects,
            static_atoms,
            static_facts,
            action_graphs,
            action_conditional_graphs,
            axiom_graphs,
            axiom_partitions,
            ground_actions: GroundActionStore::new(),
            ground_axioms: GroundAxiomStore::new(),
            states: StateStore::new(),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    fn deadline(&self) -> DeadlineToken {
        self.options.deadline_token()
    }

    fn run_axiom_evaluator(&mut self, fluent_atoms: &NatSet, numerics: &[f64]) -> Result<NatSet> {
        axiom_evaluator::evaluate(
            &mut self.repository,
            &self.static_facts,
            &self.static_atoms,
            &self.axiom_graphs,
            &self.axiom_partitions,
            &mut self.ground_axioms,
            fluent_atoms,
            numerics,
            &self.deadline(),
        )
    }

    /// Constructs the fully derived initial state (spec §6). Negative literals never
    /// reach this point — `ProblemBuilder::add_initial_literal` already rejects them
    /// (`InvalidInitialState`) at load time — so there is nothing left to validate
    /// here beyond running the axiom evaluator once.
    pub fn initial_state(&mut self) -> Result<StateHandle> {
        let mut fluent_atoms = NatSet::new();
        for &literal in &self.problem.initial_fluent_literals {
            let ground_literal = *self.repository.ground_literals.get(literal.as_usize());
            if matches!(self.domain.predicate_kind(self.repository.ground_atoms.get(ground_literal.atom.as_usize()).predicate), crate::repository::PredicateKind::Fluent) {
                fluent_atoms.insert(ground_literal.atom.as_usize());
            }
        }

        let mut numerics = vec![f64::NAN; self.repository.ground_functions.count()];
        for &(function, value) in &self.problem.initial_function_values {
            numerics[function.as_usize()] = value;
        }

        let handle = self.states.intern_non_derived(fluent_atoms.clone(), &numerics);
        if self.states.derived(handle).is_none() {
            let derived = self.run_axiom_evaluator(&fluent_atoms, &numerics)?;
            self.states.set_derived(handle, derived);
        }
        Ok(handle)
    }

    /// Enumerates every ground action applicable in `state` (spec §6), one schema at
    /// a time: builds the per-state dynamic facts once, then asks the binding
    /// generator for every complete binding of each schema's own condition, and
    /// grounds each into an interned `GroundActionId`. Materialized into a `Vec`
    /// rather than returned as a lazy iterator (spec §9 sanctions this explicitly).
    pub fn applicable_actions(&mut self, state: StateHandle) -> Result<Vec<GroundActionId>> {
        let fluent_atoms = self.states.fluent_atoms(state).clone();
        let derived_atoms = self.states.derived(state).cloned().unwrap_or_default();
        let numerics = self.states.numerics(state);
        let deadline = self.deadline();

        let dynamic = DynamicFacts {
            fluent_atoms: build_propositional_tables(&self.repository, &fluent_atoms),
            derived_atoms: build_propositional_tables(&self.repository, &derived_atoms),
            fluent_functions: build_numeric_tables(&self.repository, &numerics),
        };

        let mut result = Vec::new();
        for (schema_index, &schema_id) in self.domain.actions.clone().iter().enumerate() {
            let schema = self.repository.action_schemas.get(schema_id.as_usize()).clone();
            let condition = self.repository.conditions.get(schema.condition.as_usize()).clone();
            let graph = &self.action_graphs[schema_index];

            let bindings = binding_generator::generate_bindings(
                &self.repository,
                &self.static_facts,
                &dynamic,
                &condition,
                graph,
                &[],
                &self.static_atoms,
                &fluent_atoms,
                &derived_atoms,
                &numerics,
                &deadline,
            )?;

            for binding in bindings {
                let conditional_graphs = &self.action_conditional_graphs[schema_index];
                let handle = self.ground_actions.get_or_ground(&mut self.repository, schema_id, binding, conditional_graphs);
                result.push(handle);
            }
        }
        Ok(result)
    }

    /// Applies a ground action to `state` and returns the resulting (fully derived)
    /// state (spec §4.9, §6). The caller is responsible for only ever passing an
    /// action this grounder itself produced as applicable in `state` — applying an
    /// action whose precondition does not hold is API misuse, not a recoverable
    /// error (spec §4.9 "Failure semantics").
    pub fn successor(&mut self, state: StateHandle, action: GroundActionId) -> Result<StateHandle> {
        let action = self.ground_actions.get(action).clone();
        let source_fluent_atoms = self.states.fluent_atoms(state).clone();
        let source_derived_atoms = self.states.derived(state).cloned().unwrap_or_default();
        let source_numerics = self.states.numerics(state);

        // Step 1: base STRIPS effect.
        let mut fluent_atoms = source_fluent_atoms.clone();
        fluent_atoms.difference_in_place(&action.negative_fluent_effect);
        fluent_atoms.union_in_place(&action.positive_fluent_effect);

        // Step 2: conditional effects, tested against the *source* state.
        for (conditional_effect_id, full_binding) in &action.conditional_effects {
            let conditional_effect = *self.repository.conditional_effects.get(conditional_effect_id.as_usize());
            let condition = self.repository.conditions.get(conditional_effect.condition.as_usize()).clone();
            if condition_eval_holds(&self.repository, &self.static_atoms, &source_fluent_atoms, &source_derived_atoms, &source_numerics, &condition, full_binding) {
                let effect = self.repository.effects.get(conditional_effect.effect.as_usize()).clone();
                let mut positive = NatSet::new();
                let mut negative = NatSet::new();
                ground::ground_literal_list(&mut self.repository, &effect.fluent_literal_effects, full_binding, &mut positive, &mut negative);
                fluent_atoms.difference_in_place(&negative);
                fluent_atoms.union_in_place(&positive);
            }
        }

        // Step 3: numeric effects, left-to-right, using the latest numerics vector.
        let mut numerics = source_numerics.clone();
        for &effect_id in &action.numeric_effects {
            self.apply_numeric_effect(&action.binding, effect_id, &mut numerics);
        }
        if let Some(effect_id) = action.auxiliary_numeric_effect {
            self.apply_numeric_effect(&action.binding, effect_id, &mut numerics);
        }
        for (conditional_effect_id, full_binding) in &action.conditional_effects {
            let conditional_effect = *self.repository.conditional_effects.get(conditional_effect_id.as_usize());
            let condition = self.repository.conditions.get(conditional_effect.condition.as_usize()).clone();
            if condition_eval_holds(&self.repository, &self.static_atoms, &source_fluent_atoms, &source_derived_atoms, &source_numerics, &condition, full_binding) {
                let effect = self.repository.effects.get(conditional_effect.effect.as_usize()).clone();
                let binding = full_binding.clone();
                for effect_id in effect.fluent_numeric_effects.clone() {
                    self.apply_numeric_effect(&binding, effect_id, &mut numerics);
                }
                if let Some(effect_id) = effect.auxiliary_numeric_effect {
                    self.apply_numeric_effect(&binding, effect_id, &mut numerics);
                }
            }
        }

        // Steps 4-6: intern and, if new, derive.
        let handle = self.states.intern_non_derived(fluent_atoms.clone(), &numerics);
        if self.states.derived(handle).is_none() {
            let derived = self.run_axiom_evaluator(&fluent_atoms, &numerics)?;
            self.states.set_derived(handle, derived);
        }
        Ok(handle)
    }

    /// Resolves a numeric effect's target under `binding`, interning a fresh
    /// `GroundFunction` if this exact `(skeleton, objects)` tuple was never assigned
    /// before, then applies the effect's assign-op in place. Growing `numerics` to
    /// cover a newly-interned function's index keeps the vector `GroundFunctionId`-
    /// indexed and dense, matching every other numeric vector in this crate.
    fn apply_numeric_effect(&mut self, binding: &[ObjectId], effect_id: crate::repository::NumericEffectId, numerics: &mut Vec<f64>) {
        let effect = self.repository.numeric_effects.get(effect_id.as_usize()).clone();
        let function = self.repository.function_terms.get(effect.target.as_usize()).clone();
        let objects: Vec<ObjectId> = function.terms.iter().map(|&t| resolve_term(t, binding)).collect();
        let index = self.repository.ground_functions.get_or_create(GroundFunction { skeleton: function.skeleton, terms: objects });
        if numerics.len() <= index {
            numerics.resize(index + 1, f64::NAN);
        }
        let rhs = crate::state::evaluate_expr_exact(&self.repository, binding, numerics, effect.rhs);
        let current = numerics[index];
        numerics[index] = effect.op.apply(current, rhs);
    }

    /// Evaluates the problem's goal conjunction against `state` (spec §6). The goal
    /// has no free parameters — `binding` is always empty — so every literal and
    /// constraint in `problem.goal` must live in that condition's `nullary_*` fields.
    pub fn is_goal(&self, state: StateHandle) -> bool {
        let condition = self.repository.conditions.get(self.problem.goal.as_usize()).clone();
        let fluent_atoms = self.states.fluent_atoms(state).clone();
        let derived_atoms = self.states.derived(state).cloned().unwrap_or_default();
        let numerics = self.states.numerics(state);
        condition_eval_holds(&self.repository, &self.static_atoms, &fluent_atoms, &derived_atoms, &numerics, &condition, &[])
    }

    /// The cost of applying `action` in `state` (spec §6 `cost(ground_action) -> f64`,
    /// generalized to take the state explicitly — see DESIGN.md's "cost is lazily
    /// evaluated, not cached" decision: a cost expression may read a fluent numeric
    /// variable, so the same interned `(schema, binding)` ground instance can have a
    /// different cost in two different states, and baking one value in at grounding
    /// time would silently go stale).
    pub fn cost(&self, action: GroundActionId, state: StateHandle) -> f64 {
        let action = self.ground_actions.get(action);
        let numerics = self.states.numerics(state);
        ground::ground_action_cost(&self.repository, action, &numerics, &self.options)
    }

    pub fn action(&self, action: GroundActionId) -> &GroundAction {
        self.ground_actions.get(action)
    }

    /// Materializes the full `State` (fluent atoms, derived atoms, numerics) behind a
    /// handle. Search itself never needs this — it only ever compares handles
    /// (spec §4.9 "state equality is by interned handle") — but callers that report
    /// or display a state (a demo, a plan validator) need the concrete contents.
    pub fn state(&self, handle: StateHandle) -> crate::state::State {
        self.states.state(handle)
    }

    /// Looks up a ground atom's interned id by its predicate and object arguments, if
    /// one was ever created. Useful for a caller that wants to check one specific atom
    /// rather than materialize the whole state.
    pub fn find_ground_atom(&self, predicate: crate::repository::PredicateId, terms: Vec<ObjectId>) -> Option<crate::repository::GroundAtomId> {
        self.repository.ground_atoms.index_of(&GroundAtom { predicate, terms }).map(crate::repository::GroundAtomId::from_usize)
    }

    /// Looks up a predicate's id by name. Useful for demo/reporting code that only
    /// has a PDDL-level name in hand, not a handle.
    pub fn find_predicate(&self, name: &str) -> Option<crate::repository::PredicateId> {
        self.repository.predicates.iter().position(|p| &*p.name == name).map(crate::repository::PredicateId::from_usize)
    }
}

/// Thin re-export of [`crate::condition_eval::holds`] under a name that reads well at
/// every one of this module's three call sites (goal check, conditional-effect "when"
/// test, ...).
#[inline]
fn condition_eval_holds(
    repository: &Repository,
    static_atoms: &NatSet,
    fluent_atoms: &NatSet,
    derived_atoms: &NatSet,
    numerics: &[f64],
    condition: &crate::repository::ConjunctiveCondition,
    binding: &[ObjectId],
) -> bool {
    crate::condition_eval::holds(repository, static_atoms, fluent_atoms, derived_atoms, numerics, condition, binding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainBuilder;
    use crate::problem::ProblemBuilder;
    use crate::repository::*;
    use mimir_abs::IString;

    /// Spec §8's "Blocks, 3 blocks" scenario end to end: build the repository by hand
    /// (no parser in this workspace), finalize domain/problem, construct a `Grounder`,
    /// and drive `initial_state` / `applicable_actions` / `successor` / `is_goal`.
    #[test]
    fn blocksworld_unstack_end_to_end() {
        let mut repo = Repository::new();
        let mut domain_builder = DomainBuilder::new(IString::from("blocksworld"));

        let on = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("on"), arity: 2 }));
        let clear = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("clear"), arity: 1 }));
        let handempty = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("handempty"), arity: 0 }));
        let holding = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("holding"), arity: 1 }));
        domain_builder.add_fluent_predicate(on).add_fluent_predicate(clear).add_fluent_predicate(handempty).add_fluent_predicate(holding);

        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));
        let y = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?y"), parameter_index: 1 }));

        let on_xy = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: on, terms: vec![Term::Variable(x, 0), Term::Variable(y, 1)] }));
        let clear_x = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: clear, terms: vec![Term::Variable(x, 0)] }));
        let clear_y = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: clear, terms: vec![Term::Variable(y, 1)] }));
        let handempty_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: handempty, terms: vec![] }));
        let holding_x = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: holding, terms: vec![Term::Variable(x, 0)] }));

        let pre_on = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: on_xy }));
        let pre_clear_x = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: clear_x }));
        let pre_handempty = GroundLiteralId::from_usize(repo.ground_literals.get_or_create(GroundLiteral {
            polarity: true,
            atom: GroundAtomId::from_usize(repo.ground_atoms.get_or_create(GroundAtom { predicate: handempty, terms: vec![] })),
        }));
        let _ = handempty_atom;

        let eff_not_on = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: on_xy }));
        let eff_clear_y = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: clear_y }));
        let eff_holding_x = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: holding_x }));
        let eff_not_handempty = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: handempty_atom }));

        let condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
            parameters: vec![x, y],
            fluent_literals: vec![pre_on, pre_clear_x],
            nullary_fluent_ground_literals: vec![pre_handempty],
            ..Default::default()
        }));
        let effect = ConjunctiveEffectId::from_usize(repo.effects.get_or_create(ConjunctiveEffect {
            parameters: vec![],
            fluent_literal_effects: vec![eff_not_on, eff_clear_y, eff_holding_x, eff_not_handempty],
            ..Default::default()
        }));
        let unstack = ActionSchemaId::from_usize(repo.action_schemas.get_or_create(ActionSchema {
            name: IString::from("unstack"),
            original_arity: 2,
            parameters: vec![x, y],
            condition,
            effect,
            conditional_effects: vec![],
        }));
        domain_builder.add_action(unstack);

        let a = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("a") }));
        let b = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b") }));
        let c = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("c") }));
        let table = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("table") }));
        domain_builder.add_constant(table);

        let domain = domain_builder.finalize(&repo).expect("domain finalize");

        let mut problem_builder = ProblemBuilder::new(IString::from("bw-3"));
        problem_builder.add_object(a).add_object(b).add_object(c);

        let ground_literal = |repo: &mut Repository, predicate: PredicateId, terms: Vec<ObjectId>| {
            GroundLiteralId::from_usize(repo.ground_literals.get_or_create(GroundLiteral {
                polarity: true,
                atom: GroundAtomId::from_usize(repo.ground_atoms.get_or_create(GroundAtom { predicate, terms })),
            }))
        };

        let on_a_b = ground_literal(&mut repo, on, vec![a, b]);
        let on_b_table = ground_literal(&mut repo, on, vec![b, table]);
        let on_c_table = ground_literal(&mut repo, on, vec![c, table]);
        let clear_a = ground_literal(&mut repo, clear, vec![a]);
        let clear_c = ground_literal(&mut repo, clear, vec![c]);
        let handempty_lit = ground_literal(&mut repo, handempty, vec![]);

        for literal in [on_a_b, on_b_table, on_c_table, clear_a, clear_c, handempty_lit] {
            problem_builder.add_initial_literal(literal, &repo).unwrap();
        }

        let goal = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition { ..Default::default() }));
        problem_builder.set_goal(goal);

        let problem = problem_builder.finalize(&domain, &repo).expect("problem finalize");

        let mut grounder = Grounder::new(repo, domain, problem, Options::default()).expect("grounder construction");
        let s0 = grounder.initial_state().expect("initial state");

        let actions = grounder.applicable_actions(s0).expect("applicable actions");
        // unstack(a, b) is applicable; unstack(c, table) is not (table isn't clear's
        // argument position and `on(c, table)` holds but `clear(c)` is irrelevant here
        // since `table` would need to be clear, which it never is asserted to be).
        assert!(!actions.is_empty());

        let unstack_a_b = actions
            .iter()
            .copied()
            .find(|&handle| grounder.action(handle).binding == vec![a, b])
            .expect("unstack(a, b) should be among the applicable actions");

        let s1 = grounder.successor(s0, unstack_a_b).expect("successor");

        let clear_b_atom = grounder.repository().ground_atoms.index_of(&GroundAtom { predicate: clear, terms: vec![b] }).unwrap();
        let holding_a_atom = grounder.repository().ground_atoms.index_of(&GroundAtom { predicate: holding, terms: vec![a] }).unwrap();
        let on_a_b_atom = grounder.repository().ground_atoms.index_of(&GroundAtom { predicate: on, terms: vec![a, b] }).unwrap();
        let handempty_atom_id = grounder.repository().ground_atoms.index_of(&GroundAtom { predicate: handempty, terms: vec![] }).unwrap();

        assert!(grounder.states.fluent_atoms(s1).contains(clear_b_atom));
        assert!(grounder.states.fluent_atoms(s1).contains(holding_a_atom));
        assert!(!grounder.states.fluent_atoms(s1).contains(on_a_b_atom));
        assert!(!grounder.states.fluent_atoms(s1).contains(handempty_atom_id));

        assert!(grounder.is_goal(s0));
        assert_eq!(grounder.cost(unstack_a_b, s0), 1.0);
    }
}
