/*!

Axiom stratification and partitioning (spec §4.8). A set of `:derived` axioms is
stratifiable when no derived predicate can negatively depend on itself, even through
a chain of other derived predicates; stratifying them orders the axioms into strata
the axiom evaluator processes one at a time, each stratum's own fixed point seeing
only the strata before it as already-settled facts.

Grounded on the teacher's `original_source/src/formalism/axiom_stratification.cpp`:
the same Floyd-Warshall-shaped dependency-relation closure over `{Unconstrained,
Lower, StrictlyLower}` labels, the same peel-off-the-minimal-remaining-stratum loop,
and the same "initially relevant" axiom partitioning (an axiom's derived-predicate
body literals must all be satisfiable from an earlier stratum, or from positive
self-stratum dependencies, before the very first fixed-point pass can ever fire it).

*/

use crate::error::{MimirError, Result};
use crate::repository::{AxiomId, PredicateId, Repository};
use std::collections::{HashMap, HashSet};

#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Debug)]
enum StratumStatus {
    Unconstrained,
    Lower,
    StrictlyLower,
}

fn head_predicate(repository: &Repository, axiom: AxiomId) -> PredicateId {
    let axiom = repository.axioms.get(axiom.as_usize());
    let head = repository.literals.get(axiom.head.as_usize());
    repository.atoms.get(head.atom.as_usize()).predicate
}

/// The axiom's body literals whose predicate is itself derived — the only edges that
/// can constrain the stratification relation; static/fluent body literals impose no
/// ordering on derived predicates at all.
fn derived_body_literals(repository: &Repository, axiom: AxiomId) -> &[crate::repository::LiteralId] {
    let axiom = repository.axioms.get(axiom.as_usize());
    let condition = repository.conditions.get(axiom.condition.as_usize());
    &condition.derived_literals
}

/// Builds the `R` relation and closes it transitively (one Floyd-Warshall pass, `k`
/// ranging over `derived_predicates` in the outer loop so every already-processed
/// intermediate is available to later relaxations), then peels minimal strata off the
/// remaining predicate set until none are left. Errors if any predicate ends up
/// strictly-lower than itself, i.e. negatively depends on itself through some cycle.
fn compute_stratification(repository: &Repository, axioms: &[AxiomId], derived_predicates: &[PredicateId]) -> Result<Vec<Vec<PredicateId>>> {
    let mut r: HashMap<PredicateId, HashMap<PredicateId, StratumStatus>> = HashMap::new();
    for &p1 in derived_predicates {
        let row = derived_predicates.iter().map(|&p2| (p2, StratumStatus::Unconstrained)).collect();
        r.insert(p1, row);
    }

    for &axiom in axioms {
        let head = head_predicate(repository, axiom);
        for &literal in derived_body_literals(repository, axiom) {
            let literal = repository.literals.get(literal.as_usize());
            let atom = repository.atoms.get(literal.atom.as_usize());
            let status = if literal.polarity { StratumStatus::Lower } else { StratumStatus::StrictlyLower };
            let entry = r.entry(atom.predicate).or_default().entry(head).or_insert(StratumStatus::Unconstrained);
            if status > *entry {
                *entry = status;
            }
        }
    }

    for &p1 in derived_predicates {
        for &p2 in derived_predicates {
            for &p3 in derived_predicates {
                let through = std::cmp::min(r[&p2][&p1], r[&p1][&p3]);
                if through > StratumStatus::Unconstrained {
                    let combined = through.max(r[&p2][&p3]);
                    r.get_mut(&p2).unwrap().insert(p3, combined);
                }
            }
        }
    }

    let cycle: Vec<PredicateId> = derived_predicates.iter().copied().filter(|p| r[p][p] == StratumStatus::StrictlyLower).collect();
    if !cycle.is_empty() {
        return Err(MimirError::UnstratifiableAxioms { cycle });
    }

    let mut stratification = Vec::new();
    let mut remaining: Vec<PredicateId> = derived_predicates.to_vec();
    while !remaining.is_empty() {
        let stratum: Vec<PredicateId> = remaining
            .iter()
            .copied()
            .filter(|&p1| remaining.iter().all(|&p2| r[&p2][&p1] != StratumStatus::StrictlyLower))
            .collect();
        remaining.retain(|p| !stratum.contains(p));
        stratification.push(stratum);
    }
    Ok(stratification)
}

/// One stratum's worth of axioms (spec §4.8), plus the indexing the axiom evaluator
/// needs to run its semi-naïve fixed point: which axioms may fire on the very first
/// pass (`initially_relevant_axioms`), and which axioms to re-check once a given
/// derived predicate's extension changes (`axioms_with_body_predicate`).
pub struct AxiomPartition {
    pub axioms: Vec<AxiomId>,
    pub initially_relevant_axioms: Vec<AxiomId>,
    axioms_by_body_predicate: HashMap<PredicateId, Vec<AxiomId>>,
}

impl AxiomPartition {
    fn build(repository: &Repository, axioms: Vec<AxiomId>, derived_predicates: &HashSet<PredicateId>, affected_in_earlier_partition: &HashSet<PredicateId>) -> Self {
        let mut initially_relevant_axioms = Vec::new();
        let mut axioms_by_body_predicate: HashMap<PredicateId, Vec<AxiomId>> = HashMap::new();

        for &axiom in &axioms {
            let mut is_relevant_first = true;
            for &literal in derived_body_literals(repository, axiom) {
                let literal = repository.literals.get(literal.as_usize());
                let atom = repository.atoms.get(literal.atom.as_usize());
                let predicate = atom.predicate;

                axioms_by_body_predicate.entry(predicate).or_default().push(axiom);

                if derived_predicates.contains(&predicate) && !affected_in_earlier_partition.contains(&predicate) {
                    is_relevant_first = false;
                }
            }
            if is_relevant_first {
                initially_relevant_axioms.push(axiom);
            }
        }

        Self { axioms, initially_relevant_axioms, axioms_by_body_predicate }
    }

    /// Every axiom in this partition whose body mentions `predicate` in a derived
    /// literal — the re-fire set once `predicate`'s extension grows during this
    /// stratum's fixed point.
    pub fn axioms_with_body_predicate(&self, predicate: PredicateId) -> &[AxiomId] {
        self.axioms_by_body_predicate.get(&predicate).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Stratifies `axioms` over `derived_predicates` and partitions them into one
/// [`AxiomPartition`] per stratum, in evaluation order (spec §4.8). `axioms` should be
/// the union of a domain's and a problem's axiom lists (DESIGN.md open-question
/// decision) so problem-local `:derived` axioms are stratified alongside the
/// domain's.
pub fn compute_axiom_partitioning(repository: &Repository, axioms: &[AxiomId], derived_predicates: &[PredicateId]) -> Result<Vec<AxiomPartition>> {
    let stratification = compute_stratification(repository, axioms, derived_predicates)?;
    let derived_set: HashSet<PredicateId> = derived_predicates.iter().copied().collect();

    let mut partitioning = Vec::with_capacity(stratification.len());
    let mut remaining: Vec<AxiomId> = axioms.to_vec();
    let mut affected_in_earlier: HashSet<PredicateId> = HashSet::new();

    for stratum in &stratification {
        let stratum_set: HashSet<PredicateId> = stratum.iter().copied().collect();
        let (in_stratum, rest): (Vec<AxiomId>, Vec<AxiomId>) = remaining.into_iter().partition(|&axiom| stratum_set.contains(&head_predicate(repository, axiom)));
        remaining = rest;

        let partition = AxiomPartition::build(repository, in_stratum, &derived_set, &affected_in_earlier);
        for &axiom in &partition.axioms {
            affected_in_earlier.insert(head_predicate(repository, axiom));
        }
        partitioning.push(partition);
    }

    Ok(partitioning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::*;
    use mimir_abs::IString;

    fn unary_predicate(repo: &mut Repository, name: &str) -> PredicateId {
        PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from(name), arity: 1 }))
    }

    fn make_axiom(repo: &mut Repository, head_predicate: PredicateId, body_literal: LiteralId, head_polarity: bool) -> AxiomId {
        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));
        let head_atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: head_predicate, terms: vec![Term::Variable(x, 0)] }));
        let head = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: head_polarity, atom: head_atom }));
        let condition = ConjunctiveConditionId::from_usize(repo.conditions.get_or_create(ConjunctiveCondition {
            parameters: vec![x],
            derived_literals: vec![body_literal],
            ..Default::default()
        }));
        AxiomId::from_usize(repo.axioms.get_or_create(Axiom { condition, head }))
    }

    fn literal_on(repo: &mut Repository, predicate: PredicateId, polarity: bool) -> LiteralId {
        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));
        let atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate, terms: vec![Term::Variable(x, 0)] }));
        LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity, atom }))
    }

    /// `q(x) :- p(x)` (positive, `p` not derived) then `r(x) :- not q(x)` (negative)
    /// forces `r` strictly after `q`: two strata, one predicate each.
    #[test]
    fn negative_dependency_forces_a_later_stratum() {
        let mut repo = Repository::new();
        let p = unary_predicate(&mut repo, "p");
        let q = unary_predicate(&mut repo, "q");
        let r = unary_predicate(&mut repo, "r");

        let body_p = literal_on(&mut repo, p, true);
        let axiom_q = make_axiom(&mut repo, q, body_p, true);
        let body_q = literal_on(&mut repo, q, false);
        let axiom_r = make_axiom(&mut repo, r, body_q, true);

        let derived = vec![q, r];
        let partitioning = compute_axiom_partitioning(&repo, &[axiom_q, axiom_r], &derived).unwrap();

        assert_eq!(partitioning.len(), 2);
        assert_eq!(partitioning[0].axioms, vec![axiom_q]);
        assert_eq!(partitioning[1].axioms, vec![axiom_r]);
        assert_eq!(partitioning[0].initially_relevant_axioms, vec![axiom_q]);
    }

    /// `q(x) :- p(x)` and `r(x) :- q(x)`, both positive: no negation forces them apart,
    /// so a single fixed point over one stratum suffices for both.
    #[test]
    fn purely_positive_chain_shares_one_stratum() {
        let mut repo = Repository::new();
        let p = unary_predicate(&mut repo, "p");
        let q = unary_predicate(&mut repo, "q");
        let r = unary_predicate(&mut repo, "r");

        let body_p = literal_on(&mut repo, p, true);
        let axiom_q = make_axiom(&mut repo, q, body_p, true);
        let body_q = literal_on(&mut repo, q, true);
        let axiom_r = make_axiom(&mut repo, r, body_q, true);

        let derived = vec![q, r];
        let partitioning = compute_axiom_partitioning(&repo, &[axiom_q, axiom_r], &derived).unwrap();

        assert_eq!(partitioning.len(), 1);
        let mut axioms = partitioning[0].axioms.clone();
        axioms.sort_by_key(|a| a.as_usize());
        let mut expected = vec![axiom_q, axiom_r];
        expected.sort_by_key(|a| a.as_usize());
        assert_eq!(axioms, expected);
    }

    /// `p(x) :- not p(x)` is a direct negative self-cycle and must be rejected.
    #[test]
    fn negative_self_cycle_is_rejected() {
        let mut repo = Repository::new();
        let p = unary_predicate(&mut repo, "p");
        let body = literal_on(&mut repo, p, false);
        let axiom = make_axiom(&mut repo, p, body, true);

        let result = compute_axiom_partitioning(&repo, &[axiom], &[p]);
        assert!(matches!(result, Err(MimirError::UnstratifiableAxioms { .. })));
    }

    /// `q(x) :- not p(x)` where `p` is itself derived but not yet affected by any
    /// earlier partition is not initially relevant — its precondition cannot possibly
    /// hold before `p`'s own stratum has run.
    #[test]
    fn axiom_over_unaffected_derived_predicate_is_not_initially_relevant() {
        let mut repo = Repository::new();
        let p = unary_predicate(&mut repo, "p");
        let q = unary_predicate(&mut repo, "q");
        let body = literal_on(&mut repo, p, false);
        let axiom_q = make_axiom(&mut repo, q, body, true);

        // p has no axioms of its own (always false by default), q strictly depends on it.
        let partitioning = compute_axiom_partitioning(&repo, &[axiom_q], &[p, q]).unwrap();
        let q_partition = partitioning.iter().find(|part| part.axioms.contains(&axiom_q)).unwrap();
        assert!(q_partition.initially_relevant_axioms.is_empty());
    }
}
