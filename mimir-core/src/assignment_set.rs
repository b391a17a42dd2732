/*!

Propositional and numeric assignment sets (spec §4.4): dense lookup tables over
partial (one- or two-parameter) bindings, answering "can this literal / numeric
constraint be satisfied given only a partial binding?" without enumerating ground
atoms. These are what make consistency-graph construction and dynamic pruning
O(1)-per-check instead of O(ground atoms).

*/

use crate::repository::{AtomId, FunctionSkeletonId, LiteralId, ObjectId, PredicateId, Repository, Term};
use mimir_abs::{Bounds, NatSet};
use std::collections::HashMap;

/// `R(a, O) = (a+1)² · (O+1)²`: the reserved table size for arity `a` over `O` objects
/// (spec §4.4). One extra slot over the spec's `- 1` is harmless padding, not an
/// off-by-one: the formula's `-1` just notes the maximum valid rank is one less than
/// this product.
#[inline]
pub fn table_size(arity: usize, object_count: usize) -> usize {
    (arity + 1).pow(2) * (object_count + 1).pow(2)
}

/// The rank function of spec §4.4: `r = (i+1) + (a+1)(j+1) + (a+1)²(o_i+1) +
/// (a+1)²(O+1)(o_j+1)`. `i` (and its object `o_i`) is always present; `j`/`o_j` are
/// `None` for a single-vertex assignment ("absent", coded as the `-1` that the `+1`
/// folds to `0`).
#[inline]
pub fn rank(arity: usize, object_count: usize, i: usize, o_i: usize, j: Option<usize>, o_j: Option<usize>) -> usize {
    let a1 = arity + 1;
    let o1 = object_count + 1;
    let j_enc = j.map(|v| v + 1).unwrap_or(0);
    let oj_enc = o_j.map(|v| v + 1).unwrap_or(0);
    (i + 1) + a1 * j_enc + a1 * a1 * (o_i + 1) + a1 * a1 * o1 * oj_enc
}

/// A dense bitset over the rank space of one predicate, reused across every state (the
/// backing `NatSet` is cleared and repopulated rather than reallocated, spec §12
/// "assignment-set sizing ... reused across groundings").
#[derive(Clone)]
pub struct PropositionalAssignmentSet {
    arity: usize,
    object_count: usize,
    bits: NatSet,
}

impl PropositionalAssignmentSet {
    pub fn new(arity: usize, object_count: usize) -> Self {
        Self { arity, object_count, bits: NatSet::with_capacity(table_size(arity, object_count)) }
    }

    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Flips on every rank that partially agrees with `terms` (a ground atom's
    /// argument tuple): one single-vertex rank per position, plus one directed
    /// two-vertex rank per ordered pair of distinct positions — `a + a·(a−1)` updates
    /// total (spec §4.4), matching the symmetric storage `vertex_bit`/`edge_bit` rely
    /// on (no canonical `i < j` ordering is enforced on lookup).
    pub fn insert_ground_atom(&mut self, terms: &[ObjectId]) {
        for (i, o_i) in terms.iter().enumerate() {
            self.bits.insert(rank(self.arity, self.object_count, i, o_i.as_usize(), None, None));
        }
        for (i, o_i) in terms.iter().enumerate() {
            for (j, o_j) in terms.iter().enumerate() {
                if i == j {
                    continue;
                }
                self.bits.insert(rank(self.arity, self.object_count, i, o_i.as_usize(), Some(j), Some(o_j.as_usize())));
            }
        }
    }

    #[inline]
    pub fn vertex_bit(&self, i: usize, o_i: usize) -> bool {
        self.bits.contains(rank(self.arity, self.object_count, i, o_i, None, None))
    }

    #[inline]
    pub fn edge_bit(&self, i: usize, o_i: usize, j: usize, o_j: usize) -> bool {
        self.bits.contains(rank(self.arity, self.object_count, i, o_i, Some(j), Some(o_j)))
    }
}

/// Same rank scheme as [`PropositionalAssignmentSet`], but holding interval [`Bounds`]
/// instead of a bit (spec §4.4 "Numeric AssignmentSet").
#[derive(Clone)]
pub struct NumericAssignmentSet {
    arity: usize,
    object_count: usize,
    table: Vec<Bounds>,
    /// Union of every inserted value, used when a numeric constraint's function term
    /// shares none of the currently-bound parameters (so no rank in `table` applies).
    global: Bounds,
}

impl NumericAssignmentSet {
    pub fn new(arity: usize, object_count: usize) -> Self {
        Self {
            arity,
            object_count,
            table: vec![Bounds::empty(); table_size(arity, object_count)],
            global: Bounds::empty(),
        }
    }

    pub fn clear(&mut self) {
        self.table.iter_mut().for_each(|b| *b = Bounds::empty());
        self.global = Bounds::empty();
    }

    pub fn insert_ground_function_value(&mut self, terms: &[ObjectId], value: f64) {
        let point = Bounds::point(value);
        if point.is_empty() {
            return;
        }
        self.global.widen(point);
        for (i, o_i) in terms.iter().enumerate() {
            let idx = rank(self.arity, self.object_count, i, o_i.as_usize(), None, None);
            self.table[idx].widen(point);
        }
        for (i, o_i) in terms.iter().enumerate() {
            for (j, o_j) in terms.iter().enumerate() {
                if i == j {
                    continue;
                }
                let idx = rank(self.arity, self.object_count, i, o_i.as_usize(), Some(j), Some(o_j.as_usize()));
                self.table[idx].widen(point);
            }
        }
    }

    #[inline]
    pub fn vertex_bounds(&self, i: usize, o_i: usize) -> Bounds {
        self.table[rank(self.arity, self.object_count, i, o_i, None, None)]
    }

    #[inline]
    pub fn edge_bounds(&self, i: usize, o_i: usize, j: usize, o_j: usize) -> Bounds {
        self.table[rank(self.arity, self.object_count, i, o_i, Some(j), Some(o_j))]
    }

    #[inline]
    pub fn global_bounds(&self) -> Bounds {
        self.global
    }
}

/// `consistent(literal, vertex)` (spec §4.4): a positive literal needs the bit set; a
/// negative literal of arity ≤ 1 needs it clear (a single vertex then fully determines
/// the ground atom); a negative literal of higher arity cannot be decided from one
/// vertex alone, so this optimistically passes (the full conjunctive re-check in the
/// binding generator's step 6 is what actually rejects it).
#[inline]
pub fn consistent_literal_vertex(
    table: &PropositionalAssignmentSet,
    predicate_arity: usize,
    positive: bool,
    position: usize,
    object: ObjectId,
) -> bool {
    let is_set = table.vertex_bit(position, object.as_usize());
    if positive {
        is_set
    } else if predicate_arity <= 1 {
        !is_set
    } else {
        true
    }
}

/// `consistent(literal, edge)` (spec §4.4): same reasoning, but two positions now fully
/// determine arity-≤-2 predicates.
#[inline]
pub fn consistent_literal_edge(
    table: &PropositionalAssignmentSet,
    predicate_arity: usize,
    positive: bool,
    i: usize,
    o_i: ObjectId,
    j: usize,
    o_j: ObjectId,
) -> bool {
    let is_set = table.edge_bit(i, o_i.as_usize(), j, o_j.as_usize());
    if positive {
        is_set
    } else if predicate_arity <= 2 {
        !is_set
    } else {
        true
    }
}

/// One bound parameter position, in a numeric constraint's own `term_list` coordinate
/// space, paired with the concrete object it is bound to.
#[derive(Copy, Clone)]
pub struct BoundColumn {
    pub column: usize,
    pub object: ObjectId,
}

/// Walks a numeric expression, replacing every function term with the interval bounds
/// implied by `bound` (mapped through the constraint's own remap vector) and the
/// per-skeleton numeric tables, applying interval arithmetic at every internal node
/// (spec §4.4).
pub fn evaluate_expr_bounds(
    repository: &Repository,
    function_tables: &HashMap<FunctionSkeletonId, NumericAssignmentSet>,
    constraint: &crate::repository::NumericConstraint,
    bound: &[BoundColumn],
    expr: crate::repository::ExprId,
) -> Bounds {
    use crate::repository::Expr;
    match repository.exprs.get(expr.as_usize()) {
        Expr::Constant(value) => Bounds::point(value.into_inner()),
        Expr::Neg(inner) => evaluate_expr_bounds(repository, function_tables, constraint, bound, *inner).neg(),
        Expr::Binary { op, lhs, rhs } => {
            let l = evaluate_expr_bounds(repository, function_tables, constraint, bound, *lhs);
            let r = evaluate_expr_bounds(repository, function_tables, constraint, bound, *rhs);
            match op {
                crate::repository::BinaryOp::Add => l.add(r),
                crate::repository::BinaryOp::Sub => l.sub(r),
                crate::repository::BinaryOp::Mul => l.mul(r),
                crate::repository::BinaryOp::Div => l.div(r),
            }
        }
        Expr::Nary { op, operands } => {
            let mut iter = operands.iter().map(|e| evaluate_expr_bounds(repository, function_tables, constraint, bound, *e));
            let first = iter.next().unwrap_or(Bounds::point(match op {
                crate::repository::NaryOp::Add => 0.0,
                crate::repository::NaryOp::Mul => 1.0,
            }));
            iter.fold(first, |acc, b| match op {
                crate::repository::NaryOp::Add => acc.add(b),
                crate::repository::NaryOp::Mul => acc.mul(b),
            })
        }
        Expr::FunctionTerm(function_term) => {
            let function = repository.function_terms.get(function_term.as_usize());
            let table = match function_tables.get(&function.skeleton) {
                Some(t) => t,
                None => return Bounds::empty(),
            };
            let remap = constraint.remap_for(*function_term);
            let mapped: Vec<BoundColumn> = match remap {
                Some(remap) => bound
                    .iter()
                    .filter_map(|b| remap.get(b.column).copied().flatten().map(|f_col| BoundColumn { column: f_col as usize, object: b.object }))
                    .collect(),
                None => Vec::new(),
            };
            match mapped.len() {
                0 => table.global_bounds(),
                1 => table.vertex_bounds(mapped[0].column, mapped[0].object.as_usize()),
                _ => table.edge_bounds(mapped[0].column, mapped[0].object.as_usize(), mapped[1].column, mapped[1].object.as_usize()),
            }
        }
    }
}

/// Is `constraint` satisfiable given only the interval bounds implied by `bound`? Used
/// for both the static consistency graph (load-time pruning) and the dynamic graph
/// (per-state pruning); the full conjunctive re-check still applies exact evaluation
/// later for constraints of arity ≥ 3 (spec §4.4, §4.6 step 6).
pub fn constraint_consistent(
    repository: &Repository,
    function_tables: &HashMap<FunctionSkeletonId, NumericAssignmentSet>,
    constraint: &crate::repository::NumericConstraint,
    bound: &[BoundColumn],
) -> bool {
    let lhs = evaluate_expr_bounds(repository, function_tables, constraint, bound, constraint.lhs);
    let rhs = evaluate_expr_bounds(repository, function_tables, constraint, bound, constraint.rhs);
    Bounds::comparator_satisfiable(lhs, constraint.comparator, rhs)
}

/// Resolves `atom`'s term list against a partial variable binding
/// (`(parameter_index, object)` pairs), returning one [`BoundColumn`] per atom
/// position that is either a bound variable or an already-fixed object constant.
/// Positions whose variable is not yet in `assignment` are omitted.
pub fn atom_bound_columns(repository: &Repository, atom: AtomId, assignment: &[(u32, ObjectId)]) -> Vec<BoundColumn> {
    terms_bound_columns(&repository.atoms.get(atom.as_usize()).terms, assignment)
}

/// Same as [`atom_bound_columns`], generalized to any term list (an atom's arguments,
/// or a numeric constraint's canonical `term_list`).
pub fn terms_bound_columns(terms: &[Term], assignment: &[(u32, ObjectId)]) -> Vec<BoundColumn> {
    let mut bound = Vec::with_capacity(terms.len());
    for (position, term) in terms.iter().enumerate() {
        match term {
            Term::Object(object) => bound.push(BoundColumn { column: position, object: *object }),
            Term::Variable(_, parameter_index) => {
                if let Some((_, object)) = assignment.iter().find(|(p, _)| p == parameter_index) {
                    bound.push(BoundColumn { column: position, object: *object });
                }
            }
        }
    }
    bound
}

/// The set of distinct parameter indices a term list references (ignores bound
/// `Object` constants). Entries in a `ConjunctiveCondition`'s lifted literal lists
/// always reference at least one parameter — a fully-constant literal is ground and
/// lives in the condition's `nullary_*` lists instead.
pub fn referenced_parameters(terms: &[Term]) -> std::collections::BTreeSet<u32> {
    terms.iter().filter_map(|t| t.as_variable_index()).collect()
}

/// Resolves `=`'s two terms against a partial assignment, returning the equality's
/// truth value once both sides are bound, or `None` while at least one side is still
/// free (spec §13's open-question decision: equality is a native per-pair filter, not
/// a reified `Static` predicate routed through an assignment-set table — there is no
/// `PropositionalAssignmentSet` for `=` to look up in, since nothing ever interns an
/// equality "ground atom").
pub fn equality_value(atom_terms: &[Term], assignment: &[(u32, ObjectId)]) -> Option<bool> {
    let resolve = |t: &Term| match t {
        Term::Object(o) => Some(*o),
        Term::Variable(_, p) => assignment.iter().find(|(q, _)| q == p).map(|(_, o)| *o),
    };
    match (resolve(&atom_terms[0]), resolve(&atom_terms[1])) {
        (Some(a), Some(b)) => Some(a == b),
        _ => None,
    }
}

/// `consistent(literal, vertex|edge)` (spec §4.4), generalized over however many of the
/// literal's argument positions `assignment` currently pins down. A positive literal
/// needs the corresponding table bit set; a negative literal is only decidable once
/// every argument position is pinned (`bound.len() == predicate.arity`) — otherwise
/// some other, not-yet-bound position could still make the ground atom false, so the
/// check optimistically passes and the full conjunctive re-check (binding generator
/// step 6) makes the final call. `=` is special-cased ahead of the table lookup since
/// it is never backed by one.
pub fn literal_consistent<'a>(
    repository: &Repository,
    table_lookup: impl Fn(PredicateId) -> Option<&'a PropositionalAssignmentSet>,
    literal: LiteralId,
    assignment: &[(u32, ObjectId)],
) -> bool {
    let literal = repository.literals.get(literal.as_usize());
    let atom = repository.atoms.get(literal.atom.as_usize());
    let predicate = repository.predicates.get(atom.predicate.as_usize());

    if predicate.is_equality() {
        return match equality_value(&atom.terms, assignment) {
            Some(value) => value == literal.polarity,
            None => true,
        };
    }

    let bound = atom_bound_columns(repository, literal.atom, assignment);

    let is_set = match bound.len() {
        1 => table_lookup(atom.predicate).map(|t| t.vertex_bit(bound[0].column, bound[0].object.as_usize())).unwrap_or(false),
        2 => table_lookup(atom.predicate)
            .map(|t| t.edge_bit(bound[0].column, bound[0].object.as_usize(), bound[1].column, bound[1].object.as_usize()))
            .unwrap_or(false),
        _ => return true,
    };

    if literal.polarity {
        is_set
    } else if bound.len() == predicate.arity as usize {
        !is_set
    } else {
        true
    }
}

/// Builds one [`PropositionalAssignmentSet`] per predicate with at least one true
/// ground atom in `atoms`, replaying [`PropositionalAssignmentSet::insert_ground_atom`]
/// for each. A predicate with no true atoms is simply absent from the returned map,
/// which `literal_consistent`'s `unwrap_or(false)` already treats identically to an
/// explicit empty table, so there is no need to pre-size every predicate up front.
/// Shared by the axiom evaluator's per-stratum dynamic pruning and, eventually, by
/// applicable-action enumeration — both need the same "current state's atoms, sliced
/// by predicate" view the binding generator's dynamic graph consumes.
pub fn build_propositional_tables(repository: &Repository, atoms: &NatSet) -> HashMap<PredicateId, PropositionalAssignmentSet> {
    let object_count = repository.objects.count();
    let mut tables: HashMap<PredicateId, PropositionalAssignmentSet> = HashMap::new();
    for index in atoms.iter() {
        let atom = repository.ground_atoms.get(index);
        let predicate = repository.predicates.get(atom.predicate.as_usize());
        let table = tables.entry(atom.predicate).or_insert_with(|| PropositionalAssignmentSet::new(predicate.arity as usize, object_count));
        table.insert_ground_atom(&atom.terms);
    }
    tables
}

/// Builds one [`NumericAssignmentSet`] per function skeleton with at least one ground
/// function value in `numerics` (indexed by `GroundFunctionId`). Static and fluent
/// skeletons are covered uniformly — a state's `numerics` vector already carries both
/// kinds of value in one array (spec §3 "State"), so there is no need to separately
/// consult `StaticFacts` here.
pub fn build_numeric_tables(repository: &Repository, numerics: &[f64]) -> HashMap<FunctionSkeletonId, NumericAssignmentSet> {
    let object_count = repository.objects.count();
    let mut tables: HashMap<FunctionSkeletonId, NumericAssignmentSet> = HashMap::new();
    for (index, function) in repository.ground_functions.iter().enumerate() {
        let Some(&value) = numerics.get(index) else { continue };
        let table = tables.entry(function.skeleton).or_insert_with(|| NumericAssignmentSet::new(function.terms.len(), object_count));
        table.insert_ground_function_value(&function.terms, value);
    }
    tables
}

/// The predicates'/function skeletons' static ground facts, assembled once per
/// `Problem` (spec §12 "assignment-set sizing ... built once per schema"): a
/// `PropositionalAssignmentSet`/`NumericAssignmentSet` per *static* predicate/function
/// skeleton, populated from the problem's initial literals/function values and never
/// mutated again (static facts never change across states).
#[derive(Default)]
pub struct StaticFacts {
    pub atoms: HashMap<PredicateId, PropositionalAssignmentSet>,
    pub functions: HashMap<FunctionSkeletonId, NumericAssignmentSet>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_is_injective_for_small_arity() {
        let arity = 2;
        let objects = 3;
        let mut seen = std::collections::HashSet::new();
        for i in 0..=arity {
            for o_i in 0..=objects {
                for j in [None, Some(0), Some(1)] {
                    for o_j in [None, Some(0), Some(1)] {
                        let r = rank(arity, objects, i, o_i, j, o_j);
                        assert!(r < table_size(arity, objects));
                        seen.insert((i, o_i, j, o_j, r));
                    }
                }
            }
        }
        // Every distinct input tuple produced some rank; injectivity on *valid*
        // (j present iff o_j present) tuples is exercised in insert/lookup round-trip
        // below.
        assert!(!seen.is_empty());
    }

    #[test]
    fn insert_and_query_vertex_and_edge() {
        let mut set = PropositionalAssignmentSet::new(2, 4);
        set.insert_ground_atom(&[ObjectId::from_usize(1), ObjectId::from_usize(2)]);
        assert!(set.vertex_bit(0, 1));
        assert!(set.vertex_bit(1, 2));
        assert!(!set.vertex_bit(0, 2));
        assert!(set.edge_bit(0, 1, 1, 2));
        assert!(set.edge_bit(1, 2, 0, 1));
        assert!(!set.edge_bit(0, 2, 1, 1));
    }

    #[test]
    fn numeric_widen_and_lookup() {
        let mut set = NumericAssignmentSet::new(1, 2);
        set.insert_ground_function_value(&[ObjectId::from_usize(0)], 4.0);
        set.insert_ground_function_value(&[ObjectId::from_usize(0)], 6.0);
        let bounds = set.vertex_bounds(0, 0);
        assert_eq!(bounds.lower, 4.0);
        assert_eq!(bounds.upper, 6.0);
        assert!(set.vertex_bounds(0, 1).is_empty());
    }
}
