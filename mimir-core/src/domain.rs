/*!

The `Domain` builder (spec §4.2). A `Domain` never owns a `Repository` — per the design
notes (spec §9), "the Repository ... [is an] explicit process-wide value passed by
reference; no singletons" — so every downstream component (translator, grounder, ...)
takes `&Repository` alongside `&Domain` rather than reaching through an embedded
pointer. The entity lists a `Domain` does own are just the validated, sorted handle
lists a caller (in production, the parser; here, the demo binary and tests) accumulated
while populating the shared `Repository`.

*/

use crate::error::{MimirError, Result};
use crate::repository::{ActionSchemaId, AxiomId, FunctionKind, FunctionSkeletonId, ObjectId, PredicateId, PredicateKind, Repository};
use mimir_abs::IString;

#[derive(Default)]
pub struct DomainBuilder {
    name: IString,
    constants: Vec<ObjectId>,
    static_predicates: Vec<PredicateId>,
    fluent_predicates: Vec<PredicateId>,
    derived_predicates: Vec<PredicateId>,
    static_functions: Vec<FunctionSkeletonId>,
    fluent_functions: Vec<FunctionSkeletonId>,
    auxiliary_function: Option<FunctionSkeletonId>,
    actions: Vec<ActionSchemaId>,
    axioms: Vec<AxiomId>,
}

impl DomainBuilder {
    pub fn new(name: IString) -> Self {
        Self { name, ..Default::default() }
    }

    pub fn add_constant(&mut self, object: ObjectId) -> &mut Self {
        self.constants.push(object);
        self
    }

    pub fn add_static_predicate(&mut self, predicate: PredicateId) -> &mut Self {
        self.static_predicates.push(predicate);
        self
    }

    pub fn add_fluent_predicate(&mut self, predicate: PredicateId) -> &mut Self {
        self.fluent_predicates.push(predicate);
        self
    }

    pub fn add_derived_predicate(&mut self, predicate: PredicateId) -> &mut Self {
        self.derived_predicates.push(predicate);
        self
    }

    pub fn add_static_function(&mut self, function: FunctionSkeletonId) -> &mut Self {
        self.static_functions.push(function);
        self
    }

    pub fn add_fluent_function(&mut self, function: FunctionSkeletonId) -> &mut Self {
        self.fluent_functions.push(function);
        self
    }

    pub fn set_auxiliary_function(&mut self, function: FunctionSkeletonId) -> &mut Self {
        self.auxiliary_function = Some(function);
        self
    }

    pub fn add_action(&mut self, action: ActionSchemaId) -> &mut Self {
        self.actions.push(action);
        self
    }

    pub fn add_axiom(&mut self, axiom: AxiomId) -> &mut Self {
        self.axioms.push(axiom);
        self
    }

    /// Sorts each accumulated list by handle index, verifies that the predicate,
    /// function-skeleton, action-schema, and axiom lists are each exactly dense
    /// `0..n` against the given `Repository`'s counts, and seals into an immutable
    /// `Domain` (spec §4.2 steps 1-3).
    pub fn finalize(self, repository: &Repository) -> Result<Domain> {
        let mut predicates: Vec<PredicateId> = self
            .static_predicates
            .iter()
            .chain(self.fluent_predicates.iter())
            .chain(self.derived_predicates.iter())
            .copied()
            .collect();
        predicates.sort_by_key(|p| p.as_usize());
        check_dense(&predicates, |p| p.as_usize(), repository.predicates.count(), "Predicate")?;

        let mut functions: Vec<FunctionSkeletonId> = self
            .static_functions
            .iter()
            .chain(self.fluent_functions.iter())
            .chain(self.auxiliary_function.iter())
            .copied()
            .collect();
        functions.sort_by_key(|f| f.as_usize());
        check_dense(&functions, |f| f.as_usize(), repository.function_skeletons.count(), "FunctionSkeleton")?;

        let mut actions = self.actions.clone();
        actions.sort_by_key(|a| a.as_usize());
        check_dense(&actions, |a| a.as_usize(), repository.action_schemas.count(), "ActionSchema")?;

        let mut axioms = self.axioms.clone();
        axioms.sort_by_key(|a| a.as_usize());
        check_dense(&axioms, |a| a.as_usize(), repository.axioms.count(), "Axiom")?;

        let mut constants = self.constants.clone();
        constants.sort_by_key(|o| o.as_usize());

        Ok(Domain {
            name: self.name,
            constants,
            static_predicates: self.static_predicates,
            fluent_predicates: self.fluent_predicates,
            derived_predicates: self.derived_predicates,
            static_functions: self.static_functions,
            fluent_functions: self.fluent_functions,
            auxiliary_function: self.auxiliary_function,
            actions,
            axioms,
        })
    }
}

/// Verifies `ids` (already sorted by index) is exactly `{0, 1, ..., expected_count-1}`.
/// Every `define_handle!`-generated type exposes `as_usize`, but there is no shared
/// trait for it (the macro generates an inherent method per type), so callers pass it
/// in as `T::as_usize`.
pub(crate) fn check_dense<T: Copy>(ids: &[T], index_of: impl Fn(T) -> usize, expected_count: usize, kind: &str) -> Result<()> {
    if ids.len() != expected_count {
        return Err(MimirError::InvariantViolation {
            message: format!(
                "{kind} list has {} entries but the Repository holds {expected_count}",
                ids.len()
            ),
        });
    }
    for (expected, actual) in ids.iter().enumerate() {
        let actual = index_of(*actual);
        if actual != expected {
            return Err(MimirError::InvariantViolation {
                message: format!("{kind} indices are not dense: expected {expected}, found {actual}"),
            });
        }
    }
    Ok(())
}

/// An immutable, finalized domain. Holds only validated handle lists into a
/// `Repository` supplied alongside it everywhere it's used.
pub struct Domain {
    pub name: IString,
    pub constants: Vec<ObjectId>,
    pub static_predicates: Vec<PredicateId>,
    pub fluent_predicates: Vec<PredicateId>,
    pub derived_predicates: Vec<PredicateId>,
    pub static_functions: Vec<FunctionSkeletonId>,
    pub fluent_functions: Vec<FunctionSkeletonId>,
    pub auxiliary_function: Option<FunctionSkeletonId>,
    pub actions: Vec<ActionSchemaId>,
    pub axioms: Vec<AxiomId>,
}

impl Domain {
    /// Looks up a predicate's kind by scanning the (small) per-kind lists built at
    /// `finalize` time. Used when deciding which literals are eligible for
    /// load-time static-graph pruning (spec §4.5).
    pub fn predicate_kind(&self, predicate: PredicateId) -> PredicateKind {
        if self.static_predicates.contains(&predicate) {
            PredicateKind::Static
        } else if self.fluent_predicates.contains(&predicate) {
            PredicateKind::Fluent
        } else if self.derived_predicates.contains(&predicate) {
            PredicateKind::Derived
        } else {
            unreachable!("predicate not registered with any kind by DomainBuilder::finalize")
        }
    }

    pub fn function_kind(&self, function: FunctionSkeletonId) -> FunctionKind {
        if self.static_functions.contains(&function) {
            FunctionKind::Static
        } else if self.fluent_functions.contains(&function) {
            FunctionKind::Fluent
        } else if self.auxiliary_function == Some(function) {
            FunctionKind::Auxiliary
        } else {
            unreachable!("function skeleton not registered with any kind by DomainBuilder::finalize")
        }
    }
}
