/*!

Recognized configuration options (spec §6 "Configuration").

*/

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Options {
    /// Reject any requirement token the implementation does not model; otherwise warn
    /// and continue.
    pub strict: bool,
    /// Suppress parser/translator diagnostics on stderr.
    pub quiet: bool,
    /// Cost assigned when a ground action's cost expression evaluates to `NaN`.
    pub action_cost_default: i64,
    /// Cooperative cancellation bound for grounder/evaluator calls.
    pub deadline: Option<Duration>,
}

impl Default for Options {
    fn default() -> Self {
        Options { strict: false, quiet: false, action_cost_default: 1, deadline: None }
    }
}

impl Options {
    pub fn deadline_token(&self) -> DeadlineToken {
        DeadlineToken { expires_at: self.deadline.map(|d| Instant::now() + d) }
    }
}

/// A cooperative cancellation checkpoint. Long loops (clique enumeration, the axiom
/// fixed point) consult this at iteration boundaries and return `Cancelled` without
/// mutating their output, rather than checking the wall clock on every inner step
/// (spec §5).
#[derive(Copy, Clone, Debug)]
pub struct DeadlineToken {
    expires_at: Option<Instant>,
}

impl DeadlineToken {
    pub fn none() -> Self {
        DeadlineToken { expires_at: None }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}
