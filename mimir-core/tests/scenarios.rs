//! Black-box scenarios from the grounder's design notes, driven only through the
//! public `Grounder` API plus the `Repository`/`DomainBuilder`/`ProblemBuilder`
//! surface a caller without a parser would actually use. Each test here stands in for
//! one of the fixtures printed by the `mimir` demo binary, but with real assertions
//! instead of a println.

use mimir_abs::{Comparator, IString};
use mimir_core::domain::DomainBuilder;
use mimir_core::problem::ProblemBuilder;
use mimir_core::repository::*;
use mimir_core::translate::build_numeric_constraint;
use mimir_core::{Grounder, Options};

fn ground_literal(repository: &mut Repository, predicate: PredicateId, terms: Vec<ObjectId>) -> GroundLiteralId {
    let atom = GroundAtomId::from_usize(repository.ground_atoms.get_or_create(GroundAtom { predicate, terms }));
    GroundLiteralId::from_usize(repository.ground_literals.get_or_create(GroundLiteral { polarity: true, atom }))
}

fn trivial_goal(repository: &mut Repository) -> ConjunctiveConditionId {
    ConjunctiveConditionId::from_usize(repository.conditions.get_or_create(ConjunctiveCondition::default()))
}

/// Two rooms, one ball at `r1`, axiom `room-has-ball(r) :- at-ball(b, r)`. The initial
/// state's derived set must contain `room-has-ball(r1)` and not `room-has-ball(r2)`.
#[test]
fn gripper_derived_predicate_holds_only_where_the_ball_is() {
    let mut repo = Repository::new();
    let mut domain_builder = DomainBuilder::new(IString::from("gripper"));

    let at_ball = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("at-ball"), arity: 2 }));
    let room_has_ball = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("room-has-ball"), arity: 1 }));
    domain_builder.add_fluent_predicate(at_ball).add_derived_predicate(room_has_ball);

    let room_var = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?r"), parameter_index: 0 }));
    let ball_var = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?b"), parameter_index: 1 }));

    let at_ball_atom = AtomId::from_usize(
        repo.atoms.get_or_create(Atom { predicate: at_ball, terms: vec![Term::Variable(ball_var, 1), Term::Variable(room_var, 0)] }),
    );
    let room_has_ball_atom =
        AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: room_has_ball, terms: vec![Term::Variable(room_var, 0)] }));

    let body = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: at_ball_atom }));
    let head = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: room_has_ball_atom }));

    let condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![room_var, ball_var],
        fluent_literals: vec![body],
        ..Default::default()
    }));
    let axiom = AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition, head }));
    domain_builder.add_axiom(axiom);

    let r1 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("r1") }));
    let r2 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("r2") }));
    let b = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b") }));

    let domain = domain_builder.finalize(&repo).expect("domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("gripper-1"));
    problem_builder.add_object(r1).add_object(r2).add_object(b);
    problem_builder.add_initial_literal(ground_literal(&mut repo, at_ball, vec![b, r1]), &repo).unwrap();
    let goal = trivial_goal(&mut repo);
    problem_builder.set_goal(goal);
    let problem = problem_builder.finalize(&domain, &repo).expect("problem finalize");

    let mut grounder = Grounder::new(repo, domain, problem, Options::default()).expect("grounder construction");
    let s0 = grounder.initial_state().expect("initial state");
    let state0 = grounder.state(s0);

    let room_has_ball_id = grounder.find_predicate("room-has-ball").unwrap();
    let room_has_ball_r1 = grounder.find_ground_atom(room_has_ball_id, vec![r1]).expect("room-has-ball(r1) interned");
    let room_has_ball_r2 = grounder.find_ground_atom(room_has_ball_id, vec![r2]);

    assert!(state0.derived_atoms.contains(room_has_ball_r1.as_usize()));
    assert!(state0.holds_fluent_or_derived(room_has_ball_r1));
    assert!(room_has_ball_r2.map_or(true, |atom| !state0.holds_fluent_or_derived(atom)));
}

/// `p, q, r` where `q :- not p`, `r :- not q`. With `p` false, `q` must be true and
/// `r` must be false in the initial derived extension.
#[test]
fn stratified_negation_reaches_correct_fixed_point_end_to_end() {
    let mut repo = Repository::new();
    let mut domain_builder = DomainBuilder::new(IString::from("stratified"));

    let p = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("p"), arity: 0 }));
    let q = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("q"), arity: 0 }));
    let r = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("r"), arity: 0 }));
    domain_builder.add_fluent_predicate(p).add_derived_predicate(q).add_derived_predicate(r);

    let p_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: p, terms: vec![] }));
    let q_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: q, terms: vec![] }));
    let r_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: r, terms: vec![] }));

    let not_p = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: p_atom }));
    let not_q = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: q_atom }));
    let head_q = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: q_atom }));
    let head_r = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: r_atom }));

    let condition_q = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![],
        fluent_literals: vec![not_p],
        ..Default::default()
    }));
    let condition_r = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![],
        derived_literals: vec![not_q],
        ..Default::default()
    }));

    let axiom_q = AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition: condition_q, head: head_q }));
    let axiom_r = AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition: condition_r, head: head_r }));
    domain_builder.add_axiom(axiom_q).add_axiom(axiom_r);

    let domain = domain_builder.finalize(&repo).expect("domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("neg-1"));
    let goal = trivial_goal(&mut repo);
    problem_builder.set_goal(goal);
    let problem = problem_builder.finalize(&domain, &repo).expect("problem finalize");

    let mut grounder = Grounder::new(repo, domain, problem, Options::default()).expect("grounder construction");
    let s0 = grounder.initial_state().expect("initial state");
    let state0 = grounder.state(s0);

    let q_id = grounder.find_predicate("q").unwrap();
    let r_id = grounder.find_predicate("r").unwrap();
    let q_ground = grounder.find_ground_atom(q_id, vec![]).expect("q interned");
    let r_ground = grounder.find_ground_atom(r_id, vec![]).expect("r interned");

    assert!(state0.holds_fluent_or_derived(q_ground));
    assert!(!state0.holds_fluent_or_derived(r_ground));
}

/// `drive(?truck, ?from, ?to)` with precondition `(>= (fuel ?truck) 5)`: a truck with
/// 4 fuel has no applicable `drive` instance, a truck with 5 does.
fn drive_is_applicable_with_fuel(fuel_value: f64) -> bool {
    let mut repo = Repository::new();
    let mut domain_builder = DomainBuilder::new(IString::from("trucks"));

    let fuel = FunctionSkeletonId::from_usize(repo.function_skeletons.get_or_create(FunctionSkeleton { name: IString::from("fuel"), arity: 1 }));
    domain_builder.add_fluent_function(fuel);

    let truck_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?truck"), 0);
    let from_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?from"), 1);
    let to_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?to"), 2);

    let fuel_term = FunctionTermId::from_usize(
        repo.function_terms.get_or_create(FunctionTerm { skeleton: fuel, terms: vec![Term::Variable(truck_var, 0)] }),
    );
    let lhs = ExprId::from_usize(repo.exprs.get_or_create(Expr::FunctionTerm(fuel_term)));
    let rhs = ExprId::from_usize(repo.exprs.get_or_create(Expr::Constant(ordered_float::OrderedFloat(5.0))));
    let constraint = build_numeric_constraint(&mut repo, Comparator::Ge, lhs, rhs);

    let condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![truck_var, from_var, to_var],
        numeric_constraints: vec![constraint],
        ..Default::default()
    }));
    let effect = ConjunctiveEffectId::from_usize(repo.effects.get_or_create(ConjunctiveEffect::default()));
    let drive = ActionSchemaId::from_usize(repo.action_schemas.get_or_create(ActionSchema {
        name: IString::from("drive"),
        original_arity: 3,
        parameters: vec![truck_var, from_var, to_var],
        condition,
        effect,
        conditional_effects: vec![],
    }));
    domain_builder.add_action(drive);

    let t = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("t") }));
    let loc_a = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("loc-a") }));
    let loc_b = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("loc-b") }));

    let domain = domain_builder.finalize(&repo).expect("domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("trucks-1"));
    problem_builder.add_object(t).add_object(loc_a).add_object(loc_b);
    let fuel_ground = GroundFunctionId::from_usize(repo.ground_functions.get_or_create(GroundFunction { skeleton: fuel, terms: vec![t] }));
    problem_builder.add_initial_function_value(fuel_ground, fuel_value);
    let goal = trivial_goal(&mut repo);
    problem_builder.set_goal(goal);
    let problem = problem_builder.finalize(&domain, &repo).expect("problem finalize");

    let mut grounder = Grounder::new(repo, domain, problem, Options::default()).expect("grounder construction");
    let s0 = grounder.initial_state().expect("initial state");
    let actions = grounder.applicable_actions(s0).expect("applicable actions");
    actions.iter().any(|&handle| grounder.action(handle).schema == drive)
}

#[test]
fn numeric_constraint_gates_applicability_on_fuel_level() {
    assert!(!drive_is_applicable_with_fuel(4.0));
    assert!(drive_is_applicable_with_fuel(5.0));
}

/// `move(?x, ?from, ?to)` with a conditional effect `(forall (?y) (when (holds ?x ?y)
/// (and (not (at ?y ?from)) (at ?y ?to))))`: the successor must move every object
/// currently held by `?x`, and only those.
#[test]
fn conditional_forall_effect_moves_every_held_object() {
    let mut repo = Repository::new();
    let mut domain_builder = DomainBuilder::new(IString::from("carrier"));

    let at = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("at"), arity: 2 }));
    let holds_pred = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("holds"), arity: 2 }));
    domain_builder.add_fluent_predicate(at).add_fluent_predicate(holds_pred);

    let x_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?x"), 0);
    let from_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?from"), 1);
    let to_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?to"), 2);
    // `?y` is local to the conditional effect's own quantifier, so its parameter index
    // continues past the schema's own three (spec §3 "parameters at index >=
    // original_arity exist only to carry the forall quantifiers").
    let y_var = mimir_core::translate::fresh_variable(&mut repo, IString::from("?y"), 3);

    let holds_x_y_atom = AtomId::from_usize(
        repo.atoms.get_or_create(Atom { predicate: holds_pred, terms: vec![Term::Variable(x_var, 0), Term::Variable(y_var, 3)] }),
    );
    let at_y_from_atom =
        AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: at, terms: vec![Term::Variable(y_var, 3), Term::Variable(from_var, 1)] }));
    let at_y_to_atom =
        AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: at, terms: vec![Term::Variable(y_var, 3), Term::Variable(to_var, 2)] }));

    let when_body = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: holds_x_y_atom }));
    let then_not_at_from = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: at_y_from_atom }));
    let then_at_to = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: at_y_to_atom }));

    let when_condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![y_var],
        fluent_literals: vec![when_body],
        ..Default::default()
    }));
    let then_effect = ConjunctiveEffectId::from_usize(repo.effects.get_or_create(ConjunctiveEffect {
        parameters: vec![y_var],
        fluent_literal_effects: vec![then_not_at_from, then_at_to],
        ..Default::default()
    }));
    let conditional_effect = ConditionalEffectId::from_usize(
        repo.conditional_effects.get_or_create(ConditionalEffect { condition: when_condition, effect: then_effect }),
    );

    let base_condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
        parameters: vec![x_var, from_var, to_var],
        ..Default::default()
    }));
    let base_effect = ConjunctiveEffectId::from_usize(repo.effects.get_or_create(ConjunctiveEffect::default()));
    let move_schema = ActionSchemaId::from_usize(repo.action_schemas.get_or_create(ActionSchema {
        name: IString::from("move"),
        original_arity: 3,
        parameters: vec![x_var, from_var, to_var],
        condition: base_condition,
        effect: base_effect,
        conditional_effects: vec![conditional_effect],
    }));
    domain_builder.add_action(move_schema);

    let carrier = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("carrier") }));
    let r1 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("r1") }));
    let r2 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("r2") }));
    let item1 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("item1") }));
    let item2 = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("item2") }));
    let bystander = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("bystander") }));

    let domain = domain_builder.finalize(&repo).expect("domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("carrier-1"));
    problem_builder.add_object(carrier).add_object(r1).add_object(r2).add_object(item1).add_object(item2).add_object(bystander);

    for literal in [
        ground_literal(&mut repo, at, vec![carrier, r1]),
        ground_literal(&mut repo, holds_pred, vec![carrier, item1]),
        ground_literal(&mut repo, holds_pred, vec![carrier, item2]),
        ground_literal(&mut repo, at, vec![item1, r1]),
        ground_literal(&mut repo, at, vec![item2, r1]),
        // A bystander sitting in the same room, not held by the carrier, must not move.
        ground_literal(&mut repo, at, vec![bystander, r1]),
    ] {
        problem_builder.add_initial_literal(literal, &repo).unwrap();
    }

    let goal = trivial_goal(&mut repo);
    problem_builder.set_goal(goal);
    let problem = problem_builder.finalize(&domain, &repo).expect("problem finalize");

    let mut grounder = Grounder::new(repo, domain, problem, Options::default()).expect("grounder construction");
    let s0 = grounder.initial_state().expect("initial state");

    let actions = grounder.applicable_actions(s0).expect("applicable actions");
    let move_carrier_r1_r2 = actions
        .iter()
        .copied()
        .find(|&handle| grounder.action(handle).binding == vec![carrier, r1, r2])
        .expect("move(carrier, r1, r2) should be applicable");

    let s1 = grounder.successor(s0, move_carrier_r1_r2).expect("successor");
    let state1 = grounder.state(s1);

    let at_id = grounder.find_predicate("at").unwrap();
    let item1_at_r2 = grounder.find_ground_atom(at_id, vec![item1, r2]).expect("item1 at r2 interned");
    let item2_at_r2 = grounder.find_ground_atom(at_id, vec![item2, r2]).expect("item2 at r2 interned");
    let item1_at_r1 = grounder.find_ground_atom(at_id, vec![item1, r1]).expect("item1 at r1 interned");
    let item2_at_r1 = grounder.find_ground_atom(at_id, vec![item2, r1]).expect("item2 at r1 interned");
    let bystander_at_r1 = grounder.find_ground_atom(at_id, vec![bystander, r1]).expect("bystander at r1 interned");

    assert!(state1.holds_fluent_or_derived(item1_at_r2));
    assert!(state1.holds_fluent_or_derived(item2_at_r2));
    assert!(!state1.holds_fluent_or_derived(item1_at_r1));
    assert!(!state1.holds_fluent_or_derived(item2_at_r1));
    assert!(state1.holds_fluent_or_derived(bystander_at_r1), "bystander never held by the carrier must not move");
}
