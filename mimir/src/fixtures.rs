/*!

Hand-built PDDL fixtures, one per spec §8 end-to-end scenario. There is no parser in
this workspace, so every fixture populates a [`Repository`] directly through the
`get_or_create_*` factories the way a translator's output would look once it reached
canonical form, then seals it with [`DomainBuilder`]/[`ProblemBuilder`].

*/

use mimir_abs::IString;
use mimir_core::domain::DomainBuilder;
use mimir_core::problem::ProblemBuilder;
use mimir_core::repository::*;
use mimir_core::{Domain, Problem, Repository};

fn ground_literal(repository: &mut Repository, predicate: PredicateId, terms: Vec<ObjectId>) -> GroundLiteralId {
    let atom = GroundAtomId::from_usize(repository.ground_atoms.get_or_create(GroundAtom { predicate, terms }));
    GroundLiteralId::from_usize(repository.ground_literals.get_or_create(GroundLiteral { polarity: true, atom }))
}

/// Blocks, 3 blocks (spec §8): `on(A,B), on(B,Table), on(C,Table), clear(A), clear(C),
/// handEmpty`, one `unstack` schema, and the trivial (always-true) goal — the demo
/// drives `unstack(A, B)` and prints the resulting state's changed atoms.
pub fn blocksworld_three_blocks() -> (Repository, Domain, Problem) {
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

    let domain = domain_builder.finalize(&repo).expect("blocksworld domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("bw-3"));
    problem_builder.add_object(a).add_object(b).add_object(c);

    for literal in [
        ground_literal(&mut repo, on, vec![a, b]),
        ground_literal(&mut repo, on, vec![b, table]),
        ground_literal(&mut repo, on, vec![c, table]),
        ground_literal(&mut repo, clear, vec![a]),
        ground_literal(&mut repo, clear, vec![c]),
        ground_literal(&mut repo, handempty, vec![]),
    ] {
        problem_builder.add_initial_literal(literal, &repo).unwrap();
    }

    let goal = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition::default()));
    problem_builder.set_goal(goal);

    let problem = problem_builder.finalize(&domain, &repo).expect("blocksworld problem finalize");
    (repo, domain, problem)
}

/// Gripper with a derived predicate (spec §8): two rooms `{r1, r2}`, one ball `b`, ball
/// at `r1`; axiom `room-has-ball(r) :- at-ball(b, r)`. No actions are needed to show
/// the derived extension, so this fixture carries none.
pub fn gripper_room_has_ball() -> (Repository, Domain, Problem) {
    let mut repo = Repository::new();
    let mut domain_builder = DomainBuilder::new(IString::from("gripper"));

    let at_ball = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("at-ball"), arity: 2 }));
    let room_has_ball = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("room-has-ball"), arity: 1 }));
    domain_builder.add_fluent_predicate(at_ball).add_derived_predicate(room_has_ball);

    let ball_var = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?b"), parameter_index: 1 }));
    let room_var = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?r"), parameter_index: 0 }));

    let at_ball_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom {
        predicate: at_ball,
        terms: vec![Term::Variable(ball_var, 1), Term::Variable(room_var, 0)],
    }));
    let room_has_ball_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: room_has_ball, terms: vec![Term::Variable(room_var, 0)] }));

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

    let domain = domain_builder.finalize(&repo).expect("gripper domain finalize");

    let mut problem_builder = ProblemBuilder::new(IString::from("gripper-1"));
    problem_builder.add_object(r1).add_object(r2).add_object(b);
    problem_builder.add_initial_literal(ground_literal(&mut repo, at_ball, vec![b, r1]), &repo).unwrap();

    let goal = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition::default()));
    problem_builder.set_goal(goal);

    let problem = problem_builder.finalize(&domain, &repo).expect("gripper problem finalize");
    (repo, domain, problem)
}
