/*!

The `Problem` builder (spec §4.2). Parameterized by the `Domain` whose `Repository` it
extends: a `Problem` is built against the *same* `Repository` value the `Domain` was
built against (shared interning, spec §4.2), so every object/ground-atom/ground-function
the problem introduces shares handles with anything structurally identical the domain
already created.

*/

use crate::domain::{check_dense, Domain};
use crate::error::{MimirError, Result};
use crate::repository::{
    AxiomId, ConjunctiveConditionId, GroundFunctionId, GroundLiteralId, ObjectId, Repository,
};
use mimir_abs::IString;

#[derive(Default)]
pub struct ProblemBuilder {
    name: IString,
    objects: Vec<ObjectId>,
    initial_fluent_literals: Vec<GroundLiteralId>,
    initial_function_values: Vec<(GroundFunctionId, f64)>,
    /// Problem-level `:derived` axioms. PDDL allows axioms in the problem file in
    /// addition to the domain file; these are unioned with `Domain::axioms` wherever
    /// axioms are stratified (open-question decision, see DESIGN.md).
    axioms: Vec<AxiomId>,
    /// The goal conjunction. Because a basic PDDL goal has no free variables, it is
    /// represented the same way any arity-0 `ConjunctiveCondition` is: every literal
    /// and numeric constraint lives in the condition's `nullary_*` fields, so
    /// `is_goal` is exactly the binding generator's "nullary guards" check (spec
    /// §4.6 step 1) applied to this one condition.
    goal: Option<ConjunctiveConditionId>,
    has_declared_metric: bool,
}

impl ProblemBuilder {
    pub fn new(name: IString) -> Self {
        Self { name, ..Default::default() }
    }

    pub fn add_object(&mut self, object: ObjectId) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Adds a positive initial fluent literal. Per spec §4.9 failure semantics,
    /// negative literals in the initial state are rejected (`InvalidInitialState`),
    /// so this only accepts `GroundLiteral`s whose polarity is positive.
    pub fn add_initial_literal(&mut self, literal: GroundLiteralId, repository: &Repository) -> Result<&mut Self> {
        if !repository.ground_literals.get(literal.as_usize()).polarity {
            return Err(MimirError::InvalidInitialState {
                message: "negative literals are not permitted in the initial state".to_string(),
            });
        }
        self.initial_fluent_literals.push(literal);
        Ok(self)
    }

    pub fn add_initial_function_value(&mut self, function: GroundFunctionId, value: f64) -> &mut Self {
        self.initial_function_values.push((function, value));
        self
    }

    pub fn add_axiom(&mut self, axiom: AxiomId) -> &mut Self {
        self.axioms.push(axiom);
        self
    }

    pub fn set_goal(&mut self, goal: ConjunctiveConditionId) -> &mut Self {
        self.goal = Some(goal);
        self
    }

    pub fn declare_metric(&mut self) -> &mut Self {
        self.has_declared_metric = true;
        self
    }

    /// Sorts objects by index and verifies `domain.constants ++ problem.objects`
    /// densely covers the `Repository`'s object index space (spec §4.2 steps 1-3).
    pub fn finalize(self, domain: &Domain, repository: &Repository) -> Result<Problem> {
        let mut all_objects: Vec<ObjectId> = domain.constants.iter().chain(self.objects.iter()).copied().collect();
        all_objects.sort_by_key(|o| o.as_usize());
        check_dense(&all_objects, |o| o.as_usize(), repository.objects.count(), "Object")?;

        let goal = self.goal.ok_or_else(|| MimirError::InvariantViolation {
            message: "problem has no goal condition".to_string(),
        })?;

        let mut objects = self.objects;
        objects.sort_by_key(|o| o.as_usize());

        let mut initial_fluent_literals = self.initial_fluent_literals;
        initial_fluent_literals.sort_by_key(|l| l.as_usize());
        initial_fluent_literals.dedup();

        Ok(Problem {
            name: self.name,
            objects,
            initial_fluent_literals,
            initial_function_values: self.initial_function_values,
            axioms: self.axioms,
            goal,
            has_declared_metric: self.has_declared_metric,
        })
    }
}

/// An immutable, finalized problem instance over some `Domain`'s `Repository`.
pub struct Problem {
    pub name: IString,
    /// Problem-specific objects; the full object universe is `domain.constants ++
    /// problem.objects`.
    pub objects: Vec<ObjectId>,
    pub initial_fluent_literals: Vec<GroundLiteralId>,
    pub initial_function_values: Vec<(GroundFunctionId, f64)>,
    pub axioms: Vec<AxiomId>,
    pub goal: ConjunctiveConditionId,
    pub has_declared_metric: bool,
}

impl Problem {
    /// The full object universe for this problem: `domain.constants ++ objects`, in
    /// dense-index order (equivalently, every object handle `0..repository.objects
    /// .count()`).
    pub fn all_objects(&self, domain: &Domain) -> Vec<ObjectId> {
        let mut all: Vec<ObjectId> = domain.constants.iter().chain(self.objects.iter()).copied().collect();
        all.sort_by_key(|o| o.as_usize());
        all
    }
}
