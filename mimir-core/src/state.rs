/*!

States and the successor-state function (spec §3 "State", §4.9).

*/

use crate::define_handle;
use crate::repository::{Expr, ExprId, FunctionSkeletonId, GroundAtomId, GroundFunction, GroundFunctionId, GroundLiteralId, ObjectId, Repository, Term};
use mimir_abs::{InternTable, NatSet};
use ordered_float::OrderedFloat;

define_handle!(
    /// Handle to an interned state's non-derived projection (spec §3 "a state's
    /// handle is its position in an interning store keyed by the non-derived
    /// projection").
    StateHandle
);

/// A full state: the two bitsets plus the numeric vector (spec §3). `numerics` is
/// indexed by `GroundFunctionId` and, for simplicity, carries both the (invariant)
/// static function values and the per-state fluent/auxiliary ones in one array — a
/// state's static slots are always identical to the Problem's static table, so
/// equality/hashing over the whole array is equivalent to comparing only the
/// fluent/auxiliary slots the spec's "non-derived projection" calls for, just
/// slightly more memory than the tightest possible representation (see DESIGN.md).
#[derive(Clone)]
pub struct State {
    pub fluent_atoms: NatSet,
    pub derived_atoms: NatSet,
    pub numerics: Vec<f64>,
}

impl State {
    pub fn holds_fluent_or_derived(&self, atom: GroundAtomId) -> bool {
        self.fluent_atoms.contains(atom.as_usize()) || self.derived_atoms.contains(atom.as_usize())
    }

    pub fn satisfies_literal(&self, literal: GroundLiteralId, repository: &Repository) -> bool {
        let literal = repository.ground_literals.get(literal.as_usize());
        let holds = self.holds_fluent_or_derived(literal.atom);
        holds == literal.polarity
    }
}

#[derive(Clone, Eq, PartialEq, Hash)]
struct NonDerivedKey {
    fluent_atoms: NatSet,
    numerics: Vec<OrderedFloat<f64>>,
}

/// The interning store for non-derived state projections (spec §3, §4.9 step 4): a
/// `StateHandle` identifies `(fluent_atoms, numerics)`; the derived extension is
/// cached separately, keyed by that same handle, and is absent until the axiom
/// evaluator has run once for it.
#[derive(Default)]
pub struct StateStore {
    keys: InternTable<NonDerivedKey>,
    derived_cache: Vec<Option<NatSet>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_non_derived(&mut self, fluent_atoms: NatSet, numerics: &[f64]) -> StateHandle {
        let key = NonDerivedKey { fluent_atoms, numerics: numerics.iter().map(|v| OrderedFloat(*v)).collect() };
        let index = self.keys.get_or_insert(key);
        if self.derived_cache.len() <= index {
            self.derived_cache.resize(index + 1, None);
        }
        StateHandle::from_usize(index)
    }

    pub fn derived(&self, handle: StateHandle) -> Option<&NatSet> {
        self.derived_cache[handle.as_usize()].as_ref()
    }

    pub fn set_derived(&mut self, handle: StateHandle, derived: NatSet) {
        self.derived_cache[handle.as_usize()] = Some(derived);
    }

    /// Materializes the full `State` behind `handle`. Cheap relative to grounding
    /// itself, but not free — callers on a hot path should prefer querying
    /// `fluent_atoms`/`numerics` via the key directly where only those are needed.
    pub fn state(&self, handle: StateHandle) -> State {
        let key = self.keys.get(handle.as_usize()).expect("StateStore::state: handle out of range");
        State {
            fluent_atoms: key.fluent_atoms.clone(),
            derived_atoms: self.derived_cache[handle.as_usize()].clone().unwrap_or_default(),
            numerics: key.numerics.iter().map(|v| v.into_inner()).collect(),
        }
    }

    pub fn fluent_atoms(&self, handle: StateHandle) -> &NatSet {
        &self.keys.get(handle.as_usize()).expect("StateStore: handle out of range").fluent_atoms
    }

    pub fn numerics(&self, handle: StateHandle) -> Vec<f64> {
        self.keys.get(handle.as_usize()).expect("StateStore: handle out of range").numerics.iter().map(|v| v.into_inner()).collect()
    }
}

#[inline]
fn resolve_term(term: Term, binding: &[ObjectId]) -> ObjectId {
    match term {
        Term::Object(object) => object,
        Term::Variable(_, parameter_index) => binding[parameter_index as usize],
    }
}

/// Resolves a fully-ground `(skeleton, objects)` tuple back to its interned
/// `GroundFunctionId`, if one was ever created (spec §4.1 "programming error"
/// territory is avoided here by returning `None` rather than panicking — an
/// expression may legitimately mention a function value nothing ever assigned).
pub fn ground_function_index(repository: &Repository, skeleton: FunctionSkeletonId, terms: Vec<ObjectId>) -> Option<GroundFunctionId> {
    repository.ground_functions.index_of(&GroundFunction { skeleton, terms }).map(GroundFunctionId::from_usize)
}

/// Exact evaluation of a numeric expression under a complete variable binding (spec
/// §3 "Undefined = NaN"; dividing by zero yields `NaN` rather than IEEE's `±∞`, and
/// any arithmetic touching `NaN` yields `NaN`, which plain `f64` already gives us for
/// every operator except division by zero).
pub fn evaluate_expr_exact(repository: &Repository, binding: &[ObjectId], numerics: &[f64], expr: ExprId) -> f64 {
    match repository.exprs.get(expr.as_usize()) {
        Expr::Constant(value) => value.into_inner(),
        Expr::Neg(inner) => -evaluate_expr_exact(repository, binding, numerics, *inner),
        Expr::Binary { op, lhs, rhs } => {
            let l = evaluate_expr_exact(repository, binding, numerics, *lhs);
            let r = evaluate_expr_exact(repository, binding, numerics, *rhs);
            match op {
                crate::repository::BinaryOp::Add => l + r,
                crate::repository::BinaryOp::Sub => l - r,
                crate::repository::BinaryOp::Mul => l * r,
                crate::repository::BinaryOp::Div => {
                    if r == 0.0 {
                        f64::NAN
                    } else {
                        l / r
                    }
                }
            }
        }
        Expr::Nary { op, operands } => {
            let mut values = operands.iter().map(|e| evaluate_expr_exact(repository, binding, numerics, *e));
            let init = match op {
                crate::repository::NaryOp::Add => 0.0,
                crate::repository::NaryOp::Mul => 1.0,
            };
            let first = values.next().unwrap_or(init);
            values.fold(first, |acc, v| match op {
                crate::repository::NaryOp::Add => acc + v,
                crate::repository::NaryOp::Mul => acc * v,
            })
        }
        Expr::FunctionTerm(function_term) => {
            let function = repository.function_terms.get(function_term.as_usize());
            let objects: Vec<ObjectId> = function.terms.iter().map(|&t| resolve_term(t, binding)).collect();
            match ground_function_index(repository, function.skeleton, objects) {
                Some(id) => numerics.get(id.as_usize()).copied().unwrap_or(f64::NAN),
                None => f64::NAN,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable_on_identical_projections() {
        let mut store = StateStore::new();
        let mut atoms = NatSet::new();
        atoms.insert(0);
        atoms.insert(2);
        let h1 = store.intern_non_derived(atoms.clone(), &[1.0, f64::NAN]);
        let h2 = store.intern_non_derived(atoms, &[1.0, f64::NAN]);
        assert_eq!(h1.as_usize(), h2.as_usize());
    }

    #[test]
    fn derived_cache_absent_until_set() {
        let mut store = StateStore::new();
        let h = store.intern_non_derived(NatSet::new(), &[]);
        assert!(store.derived(h).is_none());
        let mut derived = NatSet::new();
        derived.insert(5);
        store.set_derived(h, derived);
        assert!(store.derived(h).unwrap().contains(5));
    }
}
