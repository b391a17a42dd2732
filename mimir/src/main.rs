//! Runs the spec §8 Blocksworld and Gripper scenarios through a [`mimir_core::Grounder`]
//! and prints what changed, the same scenarios `mimir-core`'s integration tests assert
//! on — this binary is a human-readable companion to those, not a substitute for them.

mod fixtures;

use mimir_core::{Grounder, Options};

fn main() {
    mimir_abs::log::init_default_subscriber();

    run_blocksworld();
    run_gripper();
}

fn run_blocksworld() {
    let (repository, domain, problem) = fixtures::blocksworld_three_blocks();
    let mut grounder = Grounder::new(repository, domain, problem, Options::default()).expect("blocksworld grounder");

    let s0 = grounder.initial_state().expect("initial state");
    let actions = grounder.applicable_actions(s0).expect("applicable actions");
    println!("blocksworld: {} applicable action(s) in the initial state", actions.len());

    let a = grounder.problem().objects[0];
    let b = grounder.problem().objects[1];
    let unstack_a_b = actions
        .iter()
        .copied()
        .find(|&handle| grounder.action(handle).binding == vec![a, b])
        .expect("unstack(a, b) should be applicable");

    let s1 = grounder.successor(s0, unstack_a_b).expect("successor");
    let state1 = grounder.state(s1);

    let clear = grounder.find_predicate("clear").expect("clear predicate");
    let holding = grounder.find_predicate("holding").expect("holding predicate");
    let on = grounder.find_predicate("on").expect("on predicate");

    let clear_b = grounder.find_ground_atom(clear, vec![b]).expect("clear(b) was interned");
    let holding_a = grounder.find_ground_atom(holding, vec![a]).expect("holding(a) was interned");
    let on_a_b = grounder.find_ground_atom(on, vec![a, b]).expect("on(a, b) was interned");

    println!("blocksworld: after unstack(a, b):");
    println!("  clear(b)  = {}", state1.holds_fluent_or_derived(clear_b));
    println!("  holding(a) = {}", state1.holds_fluent_or_derived(holding_a));
    println!("  on(a, b)  = {}", state1.holds_fluent_or_derived(on_a_b));
    println!("blocksworld: unstack(a, b) costs {}", grounder.cost(unstack_a_b, s0));
}

fn run_gripper() {
    let (repository, domain, problem) = fixtures::gripper_room_has_ball();
    let mut grounder = Grounder::new(repository, domain, problem, Options::default()).expect("gripper grounder");

    let s0 = grounder.initial_state().expect("initial state");
    let state0 = grounder.state(s0);

    let room_has_ball = grounder.find_predicate("room-has-ball").expect("room-has-ball predicate");
    let r1 = grounder.problem().objects[0];
    let r2 = grounder.problem().objects[1];

    let room_has_ball_r1 = grounder.find_ground_atom(room_has_ball, vec![r1]);
    let room_has_ball_r2 = grounder.find_ground_atom(room_has_ball, vec![r2]);

    println!("gripper: room-has-ball(r1) = {}", room_has_ball_r1.is_some_and(|atom| state0.holds_fluent_or_derived(atom)));
    println!("gripper: room-has-ball(r2) = {}", room_has_ball_r2.is_some_and(|atom| state0.holds_fluent_or_derived(atom)));
}
