/*!

Exact evaluation of an already-fully-bound [`ConjunctiveCondition`] against a state
(spec §4.6 step 6's "full conjunctive re-check", generalized to any complete binding,
not just one freshly produced by clique enumeration). Three callers share this one
routine: the binding generator's final re-verification, the successor function's
per-conditional-effect "when" test (spec §4.9 step 2), and goal evaluation (spec §6
`is_goal`, whose "binding" is simply empty since a goal condition has no free
parameters).

*/

use crate::repository::{ConjunctiveCondition, NumericConstraintId, ObjectId, Repository, Term};
use crate::state::evaluate_expr_exact;
use mimir_abs::{Comparator, NatSet};

#[inline]
fn resolve_term(term: Term, binding: &[ObjectId]) -> ObjectId {
    match term {
        Term::Object(object) => object,
        Term::Variable(_, parameter_index) => binding[parameter_index as usize],
    }
}

/// Resolves a lifted atom's term list to ground objects under `binding`, then looks up
/// whether the resulting `GroundAtom` was ever interned; absent means "never asserted
/// anywhere", i.e. always false. Checked against all three atom sets (static, fluent,
/// derived) rather than dispatching on the literal's own list (`static_literals` vs.
/// `fluent_literals` vs. `derived_literals`) — the three sets are disjoint by predicate
/// tag (spec §3 invariant), so a plain union membership test is equivalent and needs no
/// `Domain` reference here.
fn atom_holds(repository: &Repository, static_atoms: &NatSet, fluent_atoms: &NatSet, derived_atoms: &NatSet, atom_terms: &[Term], predicate: crate::repository::PredicateId, binding: &[ObjectId]) -> bool {
    let objects: Vec<ObjectId> = atom_terms.iter().map(|&t| resolve_term(t, binding)).collect();
    match repository.ground_atoms.index_of(&crate::repository::GroundAtom { predicate, terms: objects }) {
        Some(index) => static_atoms.contains(index) || fluent_atoms.contains(index) || derived_atoms.contains(index),
        None => false,
    }
}

fn literal_holds(repository: &Repository, static_atoms: &NatSet, fluent_atoms: &NatSet, derived_atoms: &NatSet, literal: crate::repository::LiteralId, binding: &[ObjectId]) -> bool {
    let literal = repository.literals.get(literal.as_usize());
    let atom = repository.atoms.get(literal.atom.as_usize());
    let predicate = repository.predicates.get(atom.predicate.as_usize());
    if predicate.is_equality() {
        let a = resolve_term(atom.terms[0], binding);
        let b = resolve_term(atom.terms[1], binding);
        return (a == b) == literal.polarity;
    }
    let holds = atom_holds(repository, static_atoms, fluent_atoms, derived_atoms, &atom.terms, atom.predicate, binding);
    holds == literal.polarity
}

fn ground_literal_holds(static_atoms: &NatSet, fluent_atoms: &NatSet, derived_atoms: &NatSet, literal: &crate::repository::GroundLiteral) -> bool {
    let holds = static_atoms.contains(literal.atom.as_usize()) || fluent_atoms.contains(literal.atom.as_usize()) || derived_atoms.contains(literal.atom.as_usize());
    holds == literal.polarity
}

fn constraint_holds(repository: &Repository, binding: &[ObjectId], numerics: &[f64], constraint: NumericConstraintId) -> bool {
    let constraint = repository.numeric_constraints.get(constraint.as_usize());
    let lhs = evaluate_expr_exact(repository, binding, numerics, constraint.lhs);
    let rhs = evaluate_expr_exact(repository, binding, numerics, constraint.rhs);
    if lhs.is_nan() || rhs.is_nan() {
        return false;
    }
    match constraint.comparator {
        Comparator::Lt => lhs < rhs,
        Comparator::Le => lhs <= rhs,
        Comparator::Eq => lhs == rhs,
        Comparator::Ge => lhs >= rhs,
        Comparator::Gt => lhs > rhs,
    }
}

/// Does `condition` hold under `binding` in a state with the given static/fluent/derived
/// atom sets and numeric vector? `binding` must cover every parameter `condition`'s
/// literals and constraints can reference (the full schema/axiom binding, not just this
/// condition's own `parameters` list, since a conditional effect's "when" clause may
/// reach outer parameters too — spec §4.7). `static_atoms` is the fixed set of ground
/// atoms true for static predicates (established once from the problem's initial state
/// and never touched again); it is entirely separate from the two state-dependent sets.
#[allow(clippy::too_many_arguments)]
pub fn holds(
    repository: &Repository,
    static_atoms: &NatSet,
    fluent_atoms: &NatSet,
    derived_atoms: &NatSet,
    numerics: &[f64],
    condition: &ConjunctiveCondition,
    binding: &[ObjectId],
) -> bool {
    for &literal in &condition.nullary_static_ground_literals {
        if !ground_literal_holds(static_atoms, fluent_atoms, derived_atoms, repository.ground_literals.get(literal.as_usize())) {
            return false;
        }
    }
    for &literal in &condition.nullary_fluent_ground_literals {
        if !ground_literal_holds(static_atoms, fluent_atoms, derived_atoms, repository.ground_literals.get(literal.as_usize())) {
            return false;
        }
    }
    for &literal in &condition.nullary_derived_ground_literals {
        if !ground_literal_holds(static_atoms, fluent_atoms, derived_atoms, repository.ground_literals.get(literal.as_usize())) {
            return false;
        }
    }
    for &constraint in &condition.nullary_numeric_constraints {
        if !constraint_holds(repository, binding, numerics, constraint) {
            return false;
        }
    }
    for literal in condition.all_non_nullary_literals() {
        if !literal_holds(repository, static_atoms, fluent_atoms, derived_atoms, literal, binding) {
            return false;
        }
    }
    for &constraint in &condition.numeric_constraints {
        if !constraint_holds(repository, binding, numerics, constraint) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::*;
    use mimir_abs::IString;

    #[test]
    fn nullary_ground_literal_gates_everything() {
        let mut repo = Repository::new();
        let handempty = PredicateId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("handempty"), arity: 0 }));
        let atom = AtomId::from_usize(repo.atoms.get_or_create(Atom { predicate: handempty, terms: vec![] }));
        let ground_atom = GroundAtomId::from_usize(repo.ground_atoms.get_or_create(GroundAtom { predicate: handempty, terms: vec![] }));
        let ground_literal =
            GroundLiteralId::from_usize(repo.ground_literals.get_or_create(GroundLiteral { polarity: true, atom: ground_atom }));
        let _ = atom;

        let condition = ConjunctiveCondition { nullary_fluent_ground_literals: vec![ground_literal], ..Default::default() };

        let empty = NatSet::new();
        assert!(!holds(&repo, &empty, &empty, &empty, &[], &condition, &[]));

        let mut fluents = NatSet::new();
        fluents.insert(ground_atom.as_usize());
        assert!(holds(&repo, &empty, &fluents, &empty, &[], &condition, &[]));
    }
}
