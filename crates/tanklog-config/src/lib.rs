//! Store connection configuration for tanklog.
//!
//! Credentials and project identity are injected from the environment and
//! handed to the store backends as an opaque value, never hard-coded.

mod error;
mod model;

/// Public error type returned by configuration resolution.
pub use error::ConfigError;
/// Store connection settings.
pub use model::StoreConfig;
