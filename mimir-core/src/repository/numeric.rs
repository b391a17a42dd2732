/*!

Numeric expressions, numeric constraints, and numeric effects (spec §3 "Numeric
expressions", "Numeric constraint").

Semantics follow IEEE-style arithmetic with the spec's stated conventions: dividing by
zero yields `NaN`, and any arithmetic involving `NaN` yields `NaN`. "Undefined" and
"NaN" are the same value throughout this module.

*/

use crate::define_handle;
use crate::repository::function::FunctionTermId;
use crate::repository::terms::Term;
use mimir_abs::Comparator;
use ordered_float::OrderedFloat;

define_handle!(
    /// Handle to an interned [`Expr`].
    ExprId
);

define_handle!(
    /// Handle to an interned [`NumericConstraint`].
    NumericConstraintId
);

define_handle!(
    /// Handle to an interned [`NumericEffect`].
    NumericEffectId
);

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NaryOp {
    Add,
    Mul,
}

/// A tagged sum over the numeric-expression grammar (spec §3). `Constant` wraps an
/// `OrderedFloat` purely so `Expr` can be `Hash + Eq` for interning; every evaluation
/// path in the grounder works with plain `f64` and `NaN` propagates exactly as IEEE
/// arithmetic and the spec's conventions dictate.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Expr {
    Constant(OrderedFloat<f64>),
    Binary { op: BinaryOp, lhs: ExprId, rhs: ExprId },
    Nary { op: NaryOp, operands: Vec<ExprId> },
    Neg(ExprId),
    FunctionTerm(FunctionTermId),
}

/// `(comparator, lhs_expr, rhs_expr, term_list)`. `term_list` is the deduplicated union
/// of every term mentioned in `lhs_expr ∪ rhs_expr`, in canonical (first-occurrence)
/// order.
///
/// `function_remaps` holds, for every distinct function term appearing in the
/// expressions, the translator's Pass 2 remapping vector (spec §4.3): for each column
/// of `term_list`, either the matching column in that function term's own term list, or
/// `None` ("absent") if the constraint's term does not appear in that function term at
/// all.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumericConstraint {
    pub comparator: Comparator,
    pub lhs: ExprId,
    pub rhs: ExprId,
    pub term_list: Vec<Term>,
    pub function_remaps: Vec<(FunctionTermId, Vec<Option<u32>>)>,
}

impl NumericConstraint {
    pub fn remap_for(&self, function_term: FunctionTermId) -> Option<&[Option<u32>]> {
        self.function_remaps
            .iter()
            .find(|(id, _)| *id == function_term)
            .map(|(_, remap)| remap.as_slice())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Assign,
    Increase,
    Decrease,
    ScaleUp,
    ScaleDown,
}

/// `(assign_op, target_function, rhs_expr)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NumericEffect {
    pub op: AssignOp,
    pub target: FunctionTermId,
    pub rhs: ExprId,
}

impl AssignOp {
    /// Applies this assignment, given the function's current value (`NaN` if
    /// undefined) and the freshly-evaluated right-hand side.
    pub fn apply(&self, current: f64, rhs: f64) -> f64 {
        match self {
            AssignOp::Assign => rhs,
            AssignOp::Increase => current + rhs,
            AssignOp::Decrease => current - rhs,
            AssignOp::ScaleUp => current * rhs,
            AssignOp::ScaleDown => {
                if rhs == 0.0 {
                    f64::NAN
                } else {
                    current / rhs
                }
            }
        }
    }
}
