/*!

Error taxonomy (spec §7). Every public operation returns `Result<T, MimirError>`; the
kinds below are the complete enumeration the spec prescribes, each carrying whatever
structured payload it needs to be actionable without re-deriving context the caller
already had.

The teacher's top-level crate reaches for `simple-error` for ad hoc string errors,
which suits one-off internal assertions but not a publicly-matched taxonomy with
per-variant payloads (a stratification cycle, an out-of-range handle, ...); this crate
uses `thiserror` instead, the same choice the `tinyzkp` example in this retrieval pack
makes for its own structured API errors. See DESIGN.md for the full rationale.

*/

use crate::repository::PredicateId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MimirError {
    /// A builder's density check failed, or a handle pointed out of range. A
    /// programming error, not recoverable; bubbles straight to the caller (spec §7).
    #[error("invariant violated: {message}")]
    InvariantViolation { message: String },

    /// The derived-predicate dependency graph has a negative cycle; reported with the
    /// offending cycle, one predicate index per step (spec §4.8, §7).
    #[error("axioms are not stratifiable: cycle through predicates {cycle:?}")]
    UnstratifiableAxioms { cycle: Vec<PredicateId> },

    /// A negative literal appeared in the initial state, or a ground atom mentioned an
    /// undeclared object (spec §4.9, §7).
    #[error("invalid initial state: {message}")]
    InvalidInitialState { message: String },

    /// A PDDL feature outside the non-goals slipped past the parser (spec §1, §7).
    #[error("unsupported construct: {message}")]
    UnsupportedConstruct { message: String },

    /// An expression evaluated to `NaN` where a defined value was required. Action
    /// costs fall back to `Options::action_cost_default`; state-updating numeric
    /// effects instead propagate `NaN` into the state rather than erroring (spec §7),
    /// so this variant is only ever raised by callers that explicitly require a
    /// defined value.
    #[error("numeric expression evaluated to NaN where a defined value was required")]
    NumericUndefined,

    /// The caller-supplied deadline elapsed during a long enumeration (clique search,
    /// axiom fixed point). Bubbled without side effects on any state store (spec §5,
    /// §7); scratch workspaces may be left populated, since they are cleared on next
    /// entry rather than on exit.
    #[error("cancelled: deadline reached")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, MimirError>;
