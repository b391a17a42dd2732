/*!

The binding generator (spec §4.6): per invocation, combines a condition's static
consistency graph with the current state's fluent/derived/numeric assignment sets,
enumerates every complete variable-to-object binding satisfying the whole conjunctive
condition.

Bindings are materialized into a `Vec` rather than exposed as a restartable lazy
sequence — spec §9 explicitly sanctions this ("implementations may materialize it to a
vector if preferred, at the cost of peak memory"), and it keeps the clique search a
plain recursive function instead of hand-rolled iterator state machinery.

*/

use crate::assignment_set::{constraint_consistent, literal_consistent, terms_bound_columns, NumericAssignmentSet, PropositionalAssignmentSet};
use crate::condition_eval;
use crate::config::DeadlineToken;
use crate::consistency_graph::StaticConsistencyGraph;
use crate::error::{MimirError, Result};
use crate::repository::{ConjunctiveCondition, FunctionSkeletonId, ObjectId, PredicateId, Repository};
use mimir_abs::NatSet;
use std::collections::HashMap;

/// Per-state dynamic facts: fluent and derived propositional assignment sets, and
/// fluent numeric assignment sets. Rebuilt/updated as a state's atoms change (spec §12:
/// one table per fluent/derived predicate, reused and repopulated rather than
/// reallocated per state).
pub struct DynamicFacts {
    pub fluent_atoms: HashMap<PredicateId, PropositionalAssignmentSet>,
    pub derived_atoms: HashMap<PredicateId, PropositionalAssignmentSet>,
    pub fluent_functions: HashMap<FunctionSkeletonId, NumericAssignmentSet>,
}

/// A complete binding for one condition's own `parameters` list, in partition order
/// (position `i` corresponds to `graph.param_columns[i]`).
pub type LocalBinding = Vec<ObjectId>;

/// Builds the dynamic consistency graph for one `(condition, state)` pair (spec §4.6
/// step 4): the static graph's adjacency, intersected with edges whose binary
/// fluent/derived/numeric conditions the current state satisfies.
fn dynamic_adjacency(
    repository: &Repository,
    static_facts: &crate::assignment_set::StaticFacts,
    dynamic: &DynamicFacts,
    condition: &ConjunctiveCondition,
    graph: &StaticConsistencyGraph,
    outer_binding: &[(u32, ObjectId)],
) -> Vec<NatSet> {
    let binary_literals: Vec<_> = condition
        .fluent_literals
        .iter()
        .chain(condition.derived_literals.iter())
        .filter(|l| {
            let atom = repository.atoms.get(repository.literals.get(l.as_usize()).atom.as_usize());
            local_refs(graph, &atom.terms).len() == 2
        })
        .copied()
        .collect();
    let binary_constraints: Vec<_> = condition
        .numeric_constraints
        .iter()
        .map(|c| repository.numeric_constraints.get(c.as_usize()))
        .filter(|c| local_refs(graph, &c.term_list).len() == 2)
        .collect();

    let mut adjacency = graph.adjacency.clone();
    if binary_literals.is_empty() && binary_constraints.is_empty() {
        return adjacency;
    }

    let arity = graph.arity;
    for i in 0..arity {
        for j in (i + 1)..arity {
            let column_i = graph.param_columns[i];
            let column_j = graph.param_columns[j];
            for a in graph.partition_range(i) {
                let (_, o_i) = graph.vertex_info[a];
                for b in graph.partition_range(j) {
                    if !adjacency[a].contains(b) {
                        continue;
                    }
                    let (_, o_j) = graph.vertex_info[b];
                    let mut assignment: Vec<(u32, ObjectId)> = outer_binding.to_vec();
                    assignment.push((column_i, o_i));
                    assignment.push((column_j, o_j));

                    let mut ok = true;
                    for &literal in &binary_literals {
                        let atom = repository.atoms.get(repository.literals.get(literal.as_usize()).atom.as_usize());
                        if local_refs(graph, &atom.terms) != std::collections::BTreeSet::from([column_i, column_j]) {
                            continue;
                        }
                        let lookup = |p: PredicateId| dynamic.fluent_atoms.get(&p).or_else(|| dynamic.derived_atoms.get(&p)).or_else(|| static_facts.atoms.get(&p));
                        if !literal_consistent(repository, lookup, literal, &assignment) {
                            ok = false;
                            break;
                        }
                    }
                    if ok {
                        for constraint in &binary_constraints {
                            if local_refs(graph, &constraint.term_list) != std::collections::BTreeSet::from([column_i, column_j]) {
                                continue;
                            }
                            let bound = terms_bound_columns(&constraint.term_list, &assignment);
                            if !constraint_consistent(repository, &dynamic.fluent_functions, constraint, &bound) {
                                ok = false;
                                break;
                            }
                        }
                    }
                    if !ok {
                        adjacency[a].remove(b);
                        adjacency[b].remove(a);
                    }
                }
            }
        }
    }
    adjacency
}

fn local_refs(graph: &StaticConsistencyGraph, terms: &[crate::repository::Term]) -> std::collections::BTreeSet<u32> {
    let columns: std::collections::BTreeSet<u32> = graph.param_columns.iter().copied().collect();
    crate::assignment_set::referenced_parameters(terms).into_iter().filter(|p| columns.contains(p)).collect()
}

/// Enumerates every complete binding for `condition` against the given graph and
/// dynamic facts (spec §4.6). `outer_binding` carries already-bound outer parameters
/// (non-empty only for a conditional effect's own quantifier expansion).
#[allow(clippy::too_many_arguments)]
pub fn generate_bindings(
    repository: &Repository,
    static_facts: &crate::assignment_set::StaticFacts,
    dynamic: &DynamicFacts,
    condition: &ConjunctiveCondition,
    graph: &StaticConsistencyGraph,
    outer_binding: &[(u32, ObjectId)],
    static_atoms: &NatSet,
    fluent_state: &NatSet,
    derived_state: &NatSet,
    numerics: &[f64],
    deadline: &DeadlineToken,
) -> Result<Vec<LocalBinding>> {
    // Step 1: nullary guards.
    let outer_as_full = resolve_outer_as_binding(outer_binding);
    if !nullary_guards_hold(repository, condition, static_atoms, fluent_state, derived_state, numerics, &outer_as_full) {
        return Ok(Vec::new());
    }

    // Step 2: arity 0.
    if graph.arity == 0 {
        return Ok(vec![Vec::new()]);
    }

    // Step 3: arity 1.
    if graph.arity == 1 {
        let mut out = Vec::new();
        for v in graph.partition_range(0) {
            if deadline.expired() {
                return Err(MimirError::Cancelled);
            }
            let (_, object) = graph.vertex_info[v];
            let mut assignment: Vec<(u32, ObjectId)> = outer_binding.to_vec();
            assignment.push((graph.param_columns[0], object));
            let full = resolve_outer_as_binding(&assignment);
            if condition_eval::holds(repository, static_atoms, fluent_state, derived_state, numerics, condition, &full) {
                out.push(vec![object]);
            }
        }
        return Ok(out);
    }

    // Step 4-5: build the dynamic graph, enumerate k-cliques.
    let adjacency = dynamic_adjacency(repository, static_facts, dynamic, condition, graph, outer_binding);
    let mut results = Vec::new();
    let mut stack: Vec<usize> = Vec::with_capacity(graph.arity);
    enumerate_cliques(graph, &adjacency, 0, &mut stack, deadline, &mut |clique| {
        let objects: Vec<ObjectId> = clique.iter().map(|&v| graph.vertex_info[v].1).collect();
        let mut assignment: Vec<(u32, ObjectId)> = outer_binding.to_vec();
        for (i, &object) in objects.iter().enumerate() {
            assignment.push((graph.param_columns[i], object));
        }
        let full = resolve_outer_as_binding(&assignment);
        // Step 6: full re-verification (catches >= 3-ary literals/constraints the
        // 2-local filter could not decide).
        if condition_eval::holds(repository, static_atoms, fluent_state, derived_state, numerics, condition, &full) {
            results.push(objects);
        }
        Ok(())
    })?;

    Ok(results)
}

#[allow(clippy::too_many_arguments)]
fn nullary_guards_hold(
    repository: &Repository,
    condition: &ConjunctiveCondition,
    static_atoms: &NatSet,
    fluent_state: &NatSet,
    derived_state: &NatSet,
    numerics: &[f64],
    binding: &[ObjectId],
) -> bool {
    let nullary_only = ConjunctiveCondition {
        parameters: vec![],
        static_literals: vec![],
        fluent_literals: vec![],
        derived_literals: vec![],
        nullary_static_ground_literals: condition.nullary_static_ground_literals.clone(),
        nullary_fluent_ground_literals: condition.nullary_fluent_ground_literals.clone(),
        nullary_derived_ground_literals: condition.nullary_derived_ground_literals.clone(),
        numeric_constraints: vec![],
        nullary_numeric_constraints: condition.nullary_numeric_constraints.clone(),
    };
    condition_eval::holds(repository, static_atoms, fluent_state, derived_state, numerics, &nullary_only, binding)
}

/// Converts a sparse `(parameter_index, object)` assignment into a dense binding vector
/// sized to the largest referenced index + 1. Safe for evaluation purposes as long as
/// every term actually dereferenced lies within range, which holds by construction
/// since outer bindings always cover every parameter index lower than the ones a
/// conditional effect introduces.
pub(crate) fn resolve_outer_as_binding(assignment: &[(u32, ObjectId)]) -> Vec<ObjectId> {
    let max_index = assignment.iter().map(|(p, _)| *p).max();
    let Some(max_index) = max_index else { return Vec::new() };
    let mut binding = vec![ObjectId::from_usize(0); max_index as usize + 1];
    for &(p, o) in assignment {
        binding[p as usize] = o;
    }
    binding
}

/// Recursive branch-and-bound k-clique enumeration (spec §4.6 step 5): at depth `d`,
/// pick a vertex from partition `d` among the common neighborhood of all previously
/// picked vertices, prune empty branches early. Partition-lex order (spec §4.6
/// "Ordering") falls out for free since partitions are visited `0..k` and each
/// partition's vertex range is already in object-index order.
fn enumerate_cliques(
    graph: &StaticConsistencyGraph,
    adjacency: &[NatSet],
    depth: usize,
    stack: &mut Vec<usize>,
    deadline: &DeadlineToken,
    on_clique: &mut dyn FnMut(&[usize]) -> Result<()>,
) -> Result<()> {
    if depth == graph.arity {
        on_clique(stack)?;
        return Ok(());
    }
    if deadline.expired() {
        return Err(MimirError::Cancelled);
    }
    for v in graph.partition_range(depth) {
        if stack.iter().all(|&picked| adjacency[picked].contains(v)) {
            stack.push(v);
            enumerate_cliques(graph, adjacency, depth + 1, stack, deadline, on_clique)?;
            stack.pop();
        }
    }
    Ok(())
}
