//! Error types for record store operations.

use thiserror::Error;

/// Errors returned by record store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with a non-success status.
    #[error("store rejected request ({status}): {message}")]
    Api { status: u16, message: String },
    /// No document with the requested id.
    #[error("document not found: {0}")]
    NotFound(String),
    /// A document or response could not be decoded.
    #[error("malformed document: {0}")]
    Decode(String),
    /// A field value kind the backend cannot represent.
    #[error("unsupported field value for {0}")]
    Unsupported(String),
}
