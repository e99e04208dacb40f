//! Error types for configuration resolution.

use thiserror::Error;

/// Errors returned while resolving store configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    /// A variable is set but unusable.
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}
