/*!

A thin facade over `tracing`, matching the teacher's `mod2_abs::log` macro surface
(`critical!`, `error!`, `warning!`, `info!`, `debug!`, `trace!`). Keeping a private
facade here means the grounding engine can be moved onto a different logging backend
later without touching call sites, the same motivation the teacher states for the
`IString` alias.

*/

pub use tracing;

#[macro_export]
macro_rules! critical {
    ($($arg:tt)*) => { $crate::log::tracing::error!(target: "mimir", $($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::log::tracing::error!(target: "mimir", $($arg)*) };
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => { $crate::log::tracing::warn!(target: "mimir", $($arg)*) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::log::tracing::info!(target: "mimir", $($arg)*) };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::log::tracing::debug!(target: "mimir", $($arg)*) };
}

#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => { $crate::log::tracing::trace!(target: "mimir", $($arg)*) };
}

/// Installs a process-wide `tracing` subscriber that prints to stderr. Intended for the
/// demo binary and for tests; library code never installs a subscriber itself.
pub fn init_default_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
