//! Fill-up lifecycle: create, load, and delete against a record store.

use crate::autonomy;
use crate::date;
use crate::error::{FillUpError, ValidationError};
use crate::model::{FillUpRecord, FuelType};
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;
use tanklog_store::{Direction, RecordStore};
use tokio::sync::Mutex;

/// Collection name used by the original deployment.
pub const DEFAULT_COLLECTION: &str = "fillingup";

/// Proof that the caller obtained an explicit user confirmation.
///
/// [`FuelJournal::delete`] is destructive and requires this token; a
/// caller constructs it only after its own confirmation step (a dialog, a
/// prompt, a `--yes` flag). Keeping the gate in the signature decouples
/// the two-step contract from any presentation mechanism.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    /// Assert that the user confirmed the destructive action.
    pub fn granted() -> Self {
        Self(())
    }
}

/// Lifecycle manager owning the local ordered list of fill-ups.
///
/// The list mirrors the remote collection and is mutated only after a
/// confirmed remote acknowledgment. State-changing operations are
/// serialized through a single in-flight gate, so one operation's local
/// update can never interleave with another's network completion.
pub struct FuelJournal {
    store: Arc<dyn RecordStore>,
    collection: String,
    records: RwLock<Vec<FillUpRecord>>,
    gate: Mutex<()>,
}

impl FuelJournal {
    /// Create a journal over the default collection.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_collection(store, DEFAULT_COLLECTION)
    }

    /// Create a journal over a specific collection.
    pub fn with_collection(store: Arc<dyn RecordStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            records: RwLock::new(Vec::new()),
            gate: Mutex::new(()),
        }
    }

    /// Snapshot of the local ordered list.
    pub fn records(&self) -> Vec<FillUpRecord> {
        self.records.read().clone()
    }

    /// Load every record from the store, ordered ascending by date.
    ///
    /// The store is asked for date-ordered results, but ordering is always
    /// recomputed locally: the collection orders the raw `dd/mm/yyyy`
    /// string, which is not chronological.
    pub async fn load_all(&self) -> Result<Vec<FillUpRecord>, FillUpError> {
        let _gate = self.gate.lock().await;
        let documents = self
            .store
            .query_ordered(&self.collection, "date", Direction::Ascending)
            .await
            .map_err(FillUpError::StoreUnavailable)?;
        let mut records = Vec::with_capacity(documents.len());
        for document in &documents {
            let record = FillUpRecord::from_document(&document.id, &document.fields)
                .map_err(FillUpError::StoreUnavailable)?;
            records.push(record);
        }
        date::sort_chronological(&mut records);
        debug!(
            "loaded fill-ups (collection={}, count={})",
            self.collection,
            records.len()
        );
        *self.records.write() = records.clone();
        Ok(records)
    }

    /// Validate form input, persist a new fill-up, and insert it locally.
    ///
    /// All four fields are validated before any store call; on a store
    /// failure the local list is left unchanged and the error is
    /// surfaced.
    pub async fn create(
        &self,
        date: &str,
        fuel: &str,
        km: &str,
        liters: &str,
    ) -> Result<FillUpRecord, FillUpError> {
        let date = date::parse_date(date)?;
        let fuel = parse_fuel(fuel)?;
        let km = parse_number("km", km)?;
        let liters = parse_number("liters", liters)?;
        let autonomy = autonomy::compute(km, liters)?;

        let mut record = FillUpRecord {
            id: String::new(),
            date,
            fuel,
            km,
            liters,
            autonomy,
        };

        let _gate = self.gate.lock().await;
        record.id = self
            .store
            .insert(&self.collection, record.to_fields())
            .await
            .map_err(FillUpError::WriteFailed)?;
        info!(
            "stored fill-up (collection={}, id={}, date={})",
            self.collection,
            record.id,
            date::format_date(record.date)
        );
        let mut records = self.records.write();
        records.push(record.clone());
        date::sort_chronological(&mut records);
        Ok(record)
    }

    /// Delete a record by id after an explicit confirmation.
    ///
    /// On failure, including an id unknown to the store, the local list is
    /// left unchanged.
    pub async fn delete(&self, id: &str, _confirmed: Confirmation) -> Result<(), FillUpError> {
        let _gate = self.gate.lock().await;
        self.store
            .remove_by_id(&self.collection, id)
            .await
            .map_err(FillUpError::DeleteFailed)?;
        self.records.write().retain(|record| record.id != id);
        info!("deleted fill-up (collection={}, id={})", self.collection, id);
        Ok(())
    }
}

fn parse_fuel(raw: &str) -> Result<FuelType, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing("fuel"));
    }
    Ok(FuelType::from(raw.to_string()))
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing(field));
    }
    let value: f64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}
