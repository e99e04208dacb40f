//! In-memory record store for tests and offline runs.

use crate::error::StoreError;
use crate::store::{Direction, Fields, RecordStore, StoredDocument};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use uuid::Uuid;

/// Volatile record store keeping collections in process memory.
///
/// Ordered queries compare raw field values the way the remote store does:
/// numbers numerically, strings lexicographically. A `dd/mm/yyyy` date
/// string therefore does not order chronologically here either; callers
/// that need calendar order must sort on parsed dates themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.lock();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                fields,
            });
        debug!("inserted document (collection={collection}, id={id})");
        Ok(id)
    }

    async fn query_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.lock();
        let mut documents = collections.get(collection).cloned().unwrap_or_default();
        documents.sort_by(|a, b| {
            let ordering = compare_values(a.fields.get(order_field), b.fields.get(order_field));
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        });
        debug!(
            "queried collection (collection={}, order_field={}, count={})",
            collection,
            order_field,
            documents.len()
        );
        Ok(documents)
    }

    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.lock();
        let documents = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let index = documents
            .iter()
            .position(|document| document.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        documents.remove(index);
        debug!("removed document (collection={collection}, id={id})");
        Ok(())
    }
}

/// Order raw field values: absent values first, numbers before strings.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(a), Value::Number(b)) => a
                .as_f64()
                .partial_cmp(&b.as_f64())
                .unwrap_or(Ordering::Equal),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Number(_), _) => Ordering::Less,
            (_, Value::Number(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields(date: &str, km: f64) -> Fields {
        let mut fields = Fields::new();
        fields.insert("date".to_string(), json!(date));
        fields.insert("km".to_string(), json!(km));
        fields
    }

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let first = store
            .insert("fillingup", fields("01/01/2024", 100.0))
            .await
            .expect("insert");
        let second = store
            .insert("fillingup", fields("02/01/2024", 120.0))
            .await
            .expect("insert");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn query_orders_date_strings_lexicographically() {
        let store = MemoryStore::new();
        // Chronologically April comes first, lexicographically it does not.
        store
            .insert("fillingup", fields("21/04/2024", 100.0))
            .await
            .expect("insert");
        store
            .insert("fillingup", fields("05/05/2024", 120.0))
            .await
            .expect("insert");
        let documents = store
            .query_ordered("fillingup", "date", Direction::Ascending)
            .await
            .expect("query");
        let dates: Vec<&str> = documents
            .iter()
            .map(|document| document.fields["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["05/05/2024", "21/04/2024"]);
    }

    #[tokio::test]
    async fn query_orders_numbers_numerically() {
        let store = MemoryStore::new();
        store
            .insert("fillingup", fields("01/01/2024", 120.0))
            .await
            .expect("insert");
        store
            .insert("fillingup", fields("01/01/2024", 15.0))
            .await
            .expect("insert");
        let documents = store
            .query_ordered("fillingup", "km", Direction::Descending)
            .await
            .expect("query");
        let kms: Vec<f64> = documents
            .iter()
            .map(|document| document.fields["km"].as_f64().unwrap())
            .collect();
        assert_eq!(kms, vec![120.0, 15.0]);
    }

    #[tokio::test]
    async fn remove_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let id = store
            .insert("fillingup", fields("01/01/2024", 100.0))
            .await
            .expect("insert");
        let error = store
            .remove_by_id("fillingup", "no-such-id")
            .await
            .expect_err("must fail");
        assert!(matches!(error, StoreError::NotFound(_)));

        store
            .remove_by_id("fillingup", &id)
            .await
            .expect("remove existing");
        let documents = store
            .query_ordered("fillingup", "date", Direction::Ascending)
            .await
            .expect("query");
        assert_eq!(documents, Vec::new());
    }
}
