//! Public surface for the tanklog fill-up logbook.
//!
//! This crate re-exports the building blocks and provides a small
//! initialization helper to keep consumer setup consistent.

/// Re-export for convenience.
pub use tanklog_config as config;
pub use tanklog_core as core;
/// Re-export for convenience.
pub use tanklog_store as store;

#[inline]
/// Initialize logging using env_logger.
///
/// Binaries are expected to call this early in startup so log output is
/// wired up before the first store call.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
