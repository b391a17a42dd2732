/*!

The static consistency graph (spec §4.5): for any `ConjunctiveCondition` with a
parameter list of arity `k` (an action schema's condition, an axiom's condition, or a
conditional effect's own quantified condition — spec §4.7's "own static consistency
subgraph" reuses exactly this), a k-partite graph over `(parameter_index, object)`
vertices, pruned once at load time by every *static* unary/binary literal and numeric
constraint the condition carries. Built once per condition and reused for every
state's binding-generator call (spec §12).

*/

use crate::assignment_set::{constraint_consistent, literal_consistent, referenced_parameters, terms_bound_columns, StaticFacts};
use crate::domain::Domain;
use crate::repository::{ConjunctiveCondition, Expr, FunctionKind, NumericConstraint, ObjectId, Repository};
use mimir_abs::NatSet;

/// `(parameter_index, object)` vertices, grouped by partition, with a symmetric
/// adjacency bitset per vertex (spec §4.5 "vertex list + adjacency bitset per
/// vertex").
pub struct StaticConsistencyGraph {
    pub arity: usize,
    /// `param_columns[i]`: the real (schema-global, or axiom-local) parameter index
    /// that local partition `i` stands for. For a schema's or axiom's own top-level
    /// condition this is the identity (`param_columns[i] == i`) since those number
    /// their parameters densely from 0; for a conditional effect's own condition, whose
    /// `parameters` field lists only the *new* quantified variables, this is the
    /// mapping back into the enclosing schema's shared variable-numbering space (spec
    /// §3 "parameters beyond `original_arity`"), so a literal referencing an
    /// already-bound outer parameter can still be matched against a caller-supplied
    /// partial binding during graph construction and clique enumeration.
    pub param_columns: Vec<u32>,
    /// `partitions[i]`: objects valid at local parameter `i`, sorted by object index.
    pub partitions: Vec<Vec<ObjectId>>,
    /// Global vertex id -> `(local_parameter_index, object)`.
    pub vertex_info: Vec<(usize, ObjectId)>,
    /// `partition_start[i] .. partition_start[i + 1]`: the global vertex id range for
    /// partition `i`.
    pub partition_start: Vec<usize>,
    /// Global vertex id -> bitset of neighboring global vertex ids (cross-partition
    /// edges only; a k-partite graph has no intra-partition edges).
    pub adjacency: Vec<NatSet>,
}

impl StaticConsistencyGraph {
    #[inline]
    pub fn partition_range(&self, i: usize) -> std::ops::Range<usize> {
        self.partition_start[i]..self.partition_start[i + 1]
    }

    #[inline]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(b)
    }
}

/// Does every function term inside `constraint`'s expressions resolve to a `Static`
/// function skeleton? Static constraints never change value across states, so they
/// are as safe to bake into the static graph as a static literal.
fn constraint_is_static(repository: &Repository, domain: &Domain, constraint: &NumericConstraint) -> bool {
    fn walk(repository: &Repository, domain: &Domain, expr: crate::repository::ExprId) -> bool {
        match repository.exprs.get(expr.as_usize()) {
            Expr::Constant(_) => true,
            Expr::Neg(inner) => walk(repository, domain, *inner),
            Expr::Binary { lhs, rhs, .. } => walk(repository, domain, *lhs) && walk(repository, domain, *rhs),
            Expr::Nary { operands, .. } => operands.iter().all(|e| walk(repository, domain, *e)),
            Expr::FunctionTerm(function_term) => {
                let function = repository.function_terms.get(function_term.as_usize());
                matches!(domain.function_kind(function.skeleton), FunctionKind::Static)
            }
        }
    }
    walk(repository, domain, constraint.lhs) && walk(repository, domain, constraint.rhs)
}

/// Builds the static consistency graph for `condition` (spec §4.5). `objects` is the
/// full object universe (`domain.constants ++ problem.objects`), in dense-index order.
/// `outer_binding` fixes any parameters this condition's own literals may reference but
/// that are *not* among `condition.parameters` itself (spec §4.7's conditional-effect
/// quantifier expansion, where the "when" clause can mention the action's
/// already-bound outer parameters) — empty for a schema's or axiom's own top-level
/// condition.
pub fn build(
    repository: &Repository,
    domain: &Domain,
    objects: &[ObjectId],
    static_facts: &StaticFacts,
    condition: &ConjunctiveCondition,
    outer_binding: &[(u32, ObjectId)],
) -> StaticConsistencyGraph {
    let arity = condition.parameters.len();
    let param_columns: Vec<u32> = condition
        .parameters
        .iter()
        .map(|v| repository.variables.get(v.as_usize()).parameter_index)
        .collect();

    let column_set: std::collections::BTreeSet<u32> = param_columns.iter().copied().collect();
    let local_refs = |terms: &[crate::repository::Term]| -> std::collections::BTreeSet<u32> {
        referenced_parameters(terms).into_iter().filter(|p| column_set.contains(p)).collect()
    };

    let unary_literals: Vec<_> = condition
        .static_literals
        .iter()
        .filter(|l| local_refs(&repository.atoms.get(repository.literals.get(l.as_usize()).atom.as_usize()).terms).len() == 1)
        .copied()
        .collect();
    let binary_literals: Vec<_> = condition
        .static_literals
        .iter()
        .filter(|l| local_refs(&repository.atoms.get(repository.literals.get(l.as_usize()).atom.as_usize()).terms).len() == 2)
        .copied()
        .collect();

    let static_constraints: Vec<&NumericConstraint> = condition
        .numeric_constraints
        .iter()
        .map(|c| repository.numeric_constraints.get(c.as_usize()))
        .filter(|c| constraint_is_static(repository, domain, c))
        .collect();
    let unary_constraints: Vec<&NumericConstraint> = static_constraints.iter().filter(|c| local_refs(&c.term_list).len() == 1).copied().collect();
    let binary_constraints: Vec<&NumericConstraint> = static_constraints.iter().filter(|c| local_refs(&c.term_list).len() == 2).copied().collect();

    let mut partitions: Vec<Vec<ObjectId>> = Vec::with_capacity(arity);
    for i in 0..arity {
        let column = param_columns[i];
        let mut valid = Vec::new();
        'object: for &object in objects {
            let mut assignment: Vec<(u32, ObjectId)> = outer_binding.to_vec();
            assignment.push((column, object));
            for &literal in &unary_literals {
                if local_refs(&repository.atoms.get(repository.literals.get(literal.as_usize()).atom.as_usize()).terms) != std::collections::BTreeSet::from([column]) {
                    continue;
                }
                if !literal_consistent(repository, |p| static_facts.atoms.get(&p), literal, &assignment) {
                    continue 'object;
                }
            }
            for constraint in &unary_constraints {
                if local_refs(&constraint.term_list) != std::collections::BTreeSet::from([column]) {
                    continue;
                }
                let bound = terms_bound_columns(&constraint.term_list, &assignment);
                if !constraint_consistent(repository, &static_facts.functions, constraint, &bound) {
                    continue 'object;
                }
            }
            valid.push(object);
        }
        partitions.push(valid);
    }

    let mut vertex_info = Vec::new();
    let mut partition_start = Vec::with_capacity(arity + 1);
    for (i, objs) in partitions.iter().enumerate() {
        partition_start.push(vertex_info.len());
        for &o in objs {
            vertex_info.push((i, o));
        }
        let _ = i;
    }
    partition_start.push(vertex_info.len());

    let mut adjacency = vec![NatSet::new(); vertex_info.len()];
    for i in 0..arity {
        for j in (i + 1)..arity {
            let column_i = param_columns[i];
            let column_j = param_columns[j];
            for a in partition_range(&partition_start, i) {
                let (_, o_i) = vertex_info[a];
                for b in partition_range(&partition_start, j) {
                    let (_, o_j) = vertex_info[b];
                    let mut assignment: Vec<(u32, ObjectId)> = outer_binding.to_vec();
                    assignment.push((column_i, o_i));
                    assignment.push((column_j, o_j));
                    let mut ok = true;
                    for &literal in &binary_literals {
                        let refs = local_refs(&repository.atoms.get(repository.literals.get(literal.as_usize()).atom.as_usize()).terms);
                        if refs != std::collections::BTreeSet::from([column_i, column_j]) {
                            continue;
                        }
                        if !literal_consistent(repository, |p| static_facts.atoms.get(&p), literal, &assignment) {
                            ok = false;
                            break;
                        }
                    }
                    if ok {
                        for constraint in &binary_constraints {
                            let refs = local_refs(&constraint.term_list);
                            if refs != std::collections::BTreeSet::from([column_i, column_j]) {
                                continue;
                            }
                            let bound = terms_bound_columns(&constraint.term_list, &assignment);
                            if !constraint_consistent(repository, &static_facts.functions, constraint, &bound) {
                                ok = false;
                                break;
                            }
                        }
                    }
                    if ok {
                        adjacency[a].insert(b);
                        adjacency[b].insert(a);
                    }
                }
            }
        }
    }

    StaticConsistencyGraph { arity, param_columns, partitions, vertex_info, partition_start, adjacency }
}

fn partition_range(partition_start: &[usize], i: usize) -> std::ops::Range<usize> {
    partition_start[i]..partition_start[i + 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainBuilder;
    use crate::repository::*;
    use mimir_abs::IString;

    #[test]
    fn clique_pruning_removes_all_edges() {
        // Schema with two parameters and a static binary precondition `(adjacent ?a ?b)`
        // that holds for no pair of objects: the graph should have zero edges between
        // the two partitions.
        let mut repo = Repository::new();
        let mut domain_builder = DomainBuilder::new(IString::from("d"));

        let adjacent = AtomId::from_usize(repo.predicates.get_or_create(Predicate { name: IString::from("adjacent"), arity: 2 }));
        domain_builder.add_static_predicate(PredicateId::from_usize(adjacent.as_usize()));

        let x = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?x"), parameter_index: 0 }));
        let y = VariableId::from_usize(repo.variables.get_or_create(Variable { name: IString::from("?y"), parameter_index: 1 }));

        let atom = AtomId::from_usize(repo.atoms.get_or_create(Atom {
            predicate: PredicateId::from_usize(adjacent.as_usize()),
            terms: vec![Term::Variable(x, 0), Term::Variable(y, 1)],
        }));
        let literal = LiteralId::from_usize(repo.literals.get_or_create(Literal { polarity: true, atom }));

        let condition = ConjunctiveCondition {
            parameters: vec![x, y],
            static_literals: vec![literal],
            ..Default::default()
        };

        let domain = domain_builder.finalize(&repo).expect("finalize");
        let a = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("a") }));
        let b = ObjectId::from_usize(repo.objects.get_or_create(Object { name: IString::from("b") }));
        let objects = vec![a, b];

        let facts = StaticFacts::default();
        // No `adjacent` ground atoms are ever inserted, so every binary edge check fails.
        let graph = build(&repo, &domain, &objects, &facts, &condition, &[]);
        assert_eq!(graph.partitions[0].len(), 2);
        assert_eq!(graph.partitions[1].len(), 2);
        for v in 0..graph.vertex_info.len() {
            assert!(graph.adjacency[v].is_empty());
        }
    }
}
