//! Record store interface and backends.
//!
//! The remote collaborator is a document database reachable over the
//! network. This crate owns the interface the lifecycle layer consumes,
//! the Firestore REST implementation, and an in-memory implementation for
//! tests and offline runs.

mod error;
mod firestore;
mod memory;
mod store;

/// Public error type returned by store backends.
pub use error::StoreError;
/// Firestore REST backend.
pub use firestore::FirestoreStore;
/// Volatile in-memory backend.
pub use memory::MemoryStore;
/// Store interface and document types.
pub use store::{Direction, Fields, RecordStore, StoredDocument};
