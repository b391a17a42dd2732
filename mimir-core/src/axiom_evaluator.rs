/*!

The axiom evaluator (spec §4.8): given a problem's stratified [`AxiomPartition`]s, runs
a semi-naïve fixed point over each stratum in turn, starting from an empty derived-atom
set, and returns the full derived extension once every stratum has quiesced.

*/

use crate::assignment_set::{build_numeric_tables, build_propositional_tables, StaticFacts};
use crate::binding_generator::{self, DynamicFacts, LocalBinding};
use crate::config::DeadlineToken;
use crate::consistency_graph::StaticConsistencyGraph;
use crate::error::{MimirError, Result};
use crate::ground::GroundAxiomStore;
use crate::repository::{AxiomId, ObjectId, PredicateId, Repository};
use crate::stratify::AxiomPartition;
use mimir_abs::NatSet;
use std::collections::HashSet;

/// Converts a clique-order [`LocalBinding`] back into a dense, parameter-index-ordered
/// binding using `graph.param_columns` — the same conversion [`crate::ground`] applies
/// to a conditional effect's quantifier expansion, needed here because an axiom's own
/// condition may not number its parameters densely from 0 either.
fn dense_binding(graph: &StaticConsistencyGraph, local: &LocalBinding) -> Vec<ObjectId> {
    let assignment: Vec<(u32, ObjectId)> = graph.param_columns.iter().zip(local.iter()).map(|(&column, &object)| (column, object)).collect();
    binding_generator::resolve_outer_as_binding(&assignment)
}

/// Runs the full stratified fixed point (spec §4.8) and returns the resulting
/// derived-atom set. `axiom_graphs` must be indexed by `AxiomId::as_usize()`, one
/// [`StaticConsistencyGraph`] per axiom's own condition, built once per problem and
/// reused across every call (spec §12). Takes `repository` by exclusive reference
/// because grounding a newly-derived axiom instance may need to intern a ground atom
/// that nothing has interned before (spec §4.1's `get_or_create` factories).
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    repository: &mut Repository,
    static_facts: &StaticFacts,
    static_atoms: &NatSet,
    axiom_graphs: &[StaticConsistencyGraph],
    partitions: &[AxiomPartition],
    ground_axioms: &mut GroundAxiomStore,
    fluent_atoms: &NatSet,
    numerics: &[f64],
    deadline: &DeadlineToken,
) -> Result<NatSet> {
    let mut derived_atoms = NatSet::new();

    let fluent_propositional = build_propositional_tables(repository, fluent_atoms);
    let fluent_numeric = build_numeric_tables(repository, numerics);
    let mut derived_propositional = build_propositional_tables(repository, &derived_atoms);

    for (stratum_index, partition) in partitions.iter().enumerate() {
        let mut relevant: Vec<AxiomId> = partition.initially_relevant_axioms.clone();
        mimir_abs::debug!(stratum = stratum_index, axioms = partition.axioms.len(), "entering axiom stratum");
        let mut iterations = 0u32;

        loop {
            if deadline.expired() {
                return Err(MimirError::Cancelled);
            }

            let dynamic = DynamicFacts { fluent_atoms: fluent_propositional.clone(), derived_atoms: derived_propositional.clone(), fluent_functions: fluent_numeric.clone() };

            let mut newly_added_predicates: HashSet<PredicateId> = HashSet::new();
            let mut changed = false;

            for &axiom_id in &relevant {
                let axiom = *repository.axioms.get(axiom_id.as_usize());
                let condition = repository.conditions.get(axiom.condition.as_usize()).clone();
                let graph = &axiom_graphs[axiom_id.as_usize()];

                let bindings = binding_generator::generate_bindings(
                    repository,
                    static_facts,
                    &dynamic,
                    &condition,
                    graph,
                    &[],
                    static_atoms,
                    fluent_atoms,
                    &derived_atoms,
                    numerics,
                    deadline,
                )?;

                for local_binding in bindings {
                    let binding = dense_binding(graph, &local_binding);
                    let ground_id = ground_axioms.get_or_ground(repository, axiom_id, binding);
                    let ground = ground_axioms.get(ground_id);
                    let head = ground.head;

                    if !derived_atoms.contains(head.as_usize()) {
                        derived_atoms.insert(head.as_usize());
                        let predicate = repository.ground_atoms.get(head.as_usize()).predicate;
                        newly_added_predicates.insert(predicate);
                        changed = true;
                    }
                }
            }

            iterations += 1;
            if !changed {
                break;
            }

            derived_propositional = build_propositional_tables(repository, &derived_atoms);

            let mut next_relevant: HashSet<AxiomId> = HashSet::new();
            for predicate in newly_added_predicates {
                for &axiom in partition.axioms_with_body_predicate(predicate) {
                    next_relevant.insert(axiom);
                }
            }
            relevant = next_relevant.into_iter().collect();
        }
        mimir_abs::debug!(stratum = stratum_index, iterations, derived = derived_atoms.len(), "axiom stratum reached quiescence");
    }

    Ok(derived_atoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency_graph;
    use crate::domain::DomainBuilder;
    use crate::ground::GroundAxiomStore;
    use crate::repository::*;
    use crate::stratify::compute_axiom_partitioning;
    use mimir_abs::IString;

    /// `q(x) :- not p(x)` then `r(x) :- not q(x)`, over a state where `p(a)` holds and
    /// `p(b)` does not (spec §8 "Stratified negation", generalized to two objects so the
    /// consistency graph has real work to do): expect `q(b)` and `r(a)` derived, nothing
    /// else.
    #[test]
    fn stratified_negation_reaches_correct_fixed_point() {
        let mut repo = Repository::new();
        let mut domain_builder = DomainBuilder::new(IString::from("d"));

        let p = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("p"), arity: 1 }));
        let q = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("q"), arity: 1 }));
        let r = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("r"), arity: 1 }));
        domain_builder.add_static_predicate(p);
        domain_builder.add_derived_predicate(q);
        domain_builder.add_derived_predicate(r);

        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));

        let p_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: p, terms: vec![Term::Variable(x, 0)] }));
        let q_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: q, terms: vec![Term::Variable(x, 0)] }));
        let r_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: r, terms: vec![Term::Variable(x, 0)] }));

        let not_p = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: p_atom }));
        let not_q = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: false, atom: q_atom }));
        let q_head = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: q_atom }));
        let r_head = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom: r_atom }));

        let q_condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
            parameters: vec![x],
            static_literals: vec![not_p],
            ..Default::default()
        }));
        let axiom_q = AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition: q_condition, head: q_head }));

        let r_condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
            parameters: vec![x],
            derived_literals: vec![not_q],
            ..Default::default()
        }));
        let axiom_r = AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition: r_condition, head: r_head }));

        domain_builder.add_axiom(axiom_q);
        domain_builder.add_axiom(axiom_r);

        let a = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("a") }));
        let b = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b") }));
        let objects = vec![a, b];

        let domain = domain_builder.finalize(&repo).expect("finalize");

        // p(a) holds, p(b) does not: a static fact fixed for the lifetime of this test.
        let mut static_atoms = NatSet::new();
        let p_a = repo.ground_atoms.get_or_create(GroundAtom { predicate: p, terms: vec![a] });
        static_atoms.insert(p_a);
        let static_facts = StaticFacts { atoms: build_propositional_tables(&repo, &static_atoms), functions: Default::default() };

        let derived = vec![q, r];
        let partitions = compute_axiom_partitioning(&repo, &domain.axioms, &derived).unwrap();
        assert_eq!(partitions.len(), 2, "negative dependency must force two strata");

        let axiom_graphs: Vec<StaticConsistencyGraph> = (0..repo.axioms.count())
            .map(|i| {
                let axiom = repo.axioms.get(i);
                let condition = repo.conditions.get(axiom.condition.as_usize());
                consistency_graph::build(&repo, &domain, &objects, &static_facts, condition, &[])
            })
            .collect();

        let mut ground_axioms = GroundAxiomStore::new();
        let fluent_atoms = NatSet::new();
        let result = evaluate(&mut repo, &static_facts, &static_atoms, &axiom_graphs, &partitions, &mut ground_axioms, &fluent_atoms, &[], &DeadlineToken::none()).unwrap();

        let q_b = repo.ground_atoms.index_of(&GroundAtom { predicate: q, terms: vec![b] }).unwrap();
        let q_a = repo.ground_atoms.index_of(&GroundAtom { predicate: q, terms: vec![a] }).unwrap();
        let r_a = repo.ground_atoms.index_of(&GroundAtom { predicate: r, terms: vec![a] }).unwrap();
        let r_b = repo.ground_atoms.index_of(&GroundAtom { predicate: r, terms: vec![b] }).unwrap();

        assert!(result.contains(q_b), "q(b) should be derived since p(b) does not hold");
        assert!(!result.contains(q_a), "q(a) should not be derived since p(a) holds");
        assert!(result.contains(r_a), "r(a) should be derived since q(a) does not hold");
        assert!(!result.contains(r_b), "r(b) should not be derived since q(b) holds");
    }
}
