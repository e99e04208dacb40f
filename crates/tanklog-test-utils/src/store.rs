use async_trait::async_trait;
use parking_lot::Mutex;
use tanklog_store::{Direction, Fields, RecordStore, StoreError, StoredDocument};

/// Record store double with per-operation failure switches and call
/// counters. Queries return documents in insertion order, deliberately
/// ignoring the requested ordering.
#[derive(Default)]
pub struct ScriptedStore {
    fail_insert: bool,
    fail_query: bool,
    fail_remove: bool,
    state: Mutex<ScriptedState>,
}

#[derive(Default)]
struct ScriptedState {
    documents: Vec<StoredDocument>,
    insert_calls: usize,
    query_calls: usize,
    remove_calls: usize,
    next_id: usize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_insert() -> Self {
        Self {
            fail_insert: true,
            ..Self::default()
        }
    }

    pub fn failing_query() -> Self {
        Self {
            fail_query: true,
            ..Self::default()
        }
    }

    pub fn failing_remove() -> Self {
        Self {
            fail_remove: true,
            ..Self::default()
        }
    }

    pub fn with_documents(documents: Vec<StoredDocument>) -> Self {
        Self {
            state: Mutex::new(ScriptedState {
                documents,
                ..ScriptedState::default()
            }),
            ..Self::default()
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().insert_calls
    }

    pub fn query_calls(&self) -> usize {
        self.state.lock().query_calls
    }

    pub fn remove_calls(&self) -> usize {
        self.state.lock().remove_calls
    }

    pub fn documents(&self) -> Vec<StoredDocument> {
        self.state.lock().documents.clone()
    }

    fn unavailable() -> StoreError {
        StoreError::Api {
            status: 503,
            message: "scripted failure".to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn insert(&self, _collection: &str, fields: Fields) -> Result<String, StoreError> {
        let mut state = self.state.lock();
        state.insert_calls += 1;
        if self.fail_insert {
            return Err(Self::unavailable());
        }
        state.next_id += 1;
        let id = format!("doc-{}", state.next_id);
        state.documents.push(StoredDocument {
            id: id.clone(),
            fields,
        });
        Ok(id)
    }

    async fn query_ordered(
        &self,
        _collection: &str,
        _order_field: &str,
        _direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let mut state = self.state.lock();
        state.query_calls += 1;
        if self.fail_query {
            return Err(Self::unavailable());
        }
        Ok(state.documents.clone())
    }

    async fn remove_by_id(&self, _collection: &str, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.remove_calls += 1;
        if self.fail_remove {
            return Err(Self::unavailable());
        }
        let index = state
            .documents
            .iter()
            .position(|document| document.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        state.documents.remove(index);
        Ok(())
    }
}
