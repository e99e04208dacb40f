//! Record store interface consumed by the lifecycle layer.

use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Document fields as stored in one collection entry.
pub type Fields = Map<String, Value>;

/// Sort direction for ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

/// A stored document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-assigned opaque id.
    pub id: String,
    /// Document fields.
    pub fields: Fields,
}

/// Remote document collection abstraction.
///
/// Implementations assign ids on insert; callers never generate them.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a document and return the store-assigned id.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// List a collection ordered by one field.
    async fn query_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Remove a document by id.
    ///
    /// Fails with [`StoreError::NotFound`] if the id does not exist.
    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
