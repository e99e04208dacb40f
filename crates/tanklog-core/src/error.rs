//! Error types for fill-up validation and lifecycle operations.

use tanklog_store::StoreError;
use thiserror::Error;

/// Errors produced while validating form input for a fill-up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("missing value for {0}")]
    Missing(&'static str),
    /// A numeric field did not parse as a number.
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    /// A numeric field must be greater than zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    /// A date did not match the dd/mm/yyyy calendar format.
    #[error("malformed date {value:?}: expected dd/mm/yyyy")]
    MalformedDate { value: String },
}

/// Errors returned by fill-up lifecycle operations.
#[derive(Debug, Error)]
pub enum FillUpError {
    /// Input validation rejected the submission before any store call.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Loading records from the store failed.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
    /// Persisting a new record failed; local state is unchanged.
    #[error("write failed: {0}")]
    WriteFailed(#[source] StoreError),
    /// Deleting a record failed; local state is unchanged.
    #[error("delete failed: {0}")]
    DeleteFailed(#[source] StoreError),
}
