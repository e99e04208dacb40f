//! Fill-up lifecycle, autonomy computation, and chronological ordering.
//!
//! This crate owns the record model and the journal that keeps a local
//! ordered mirror of the remote fill-up collection.

pub mod autonomy;
pub mod date;
pub mod error;
pub mod journal;
pub mod model;

/// Validation and lifecycle error types.
pub use error::{FillUpError, ValidationError};
/// Lifecycle manager and its delete-confirmation token.
pub use journal::{Confirmation, DEFAULT_COLLECTION, FuelJournal};
/// Record model.
pub use model::{FillUpRecord, FuelType};
