//! Firestore REST backend for the record store interface.

use crate::error::StoreError;
use crate::store::{Direction, Fields, RecordStore, StoredDocument};
use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value, json};
use tanklog_config::StoreConfig;

/// Production base endpoint for the Firestore REST v1 API.
const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Record store backed by the Firestore REST v1 API.
///
/// Project identity and the API key come from injected configuration and
/// are passed per request, matching the original deployment's setup.
pub struct FirestoreStore {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    database: String,
    api_key: String,
}

impl FirestoreStore {
    /// Build a store from injected configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config
                .endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            project_id: config.project_id.clone(),
            database: config.database.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Root path of the documents resource.
    fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.endpoint, self.project_id, self.database
        )
    }
}

#[async_trait]
impl RecordStore for FirestoreStore {
    async fn insert(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let url = format!("{}/{}", self.documents_root(), collection);
        let body = json!({ "fields": encode_fields(&fields)? });
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let document: Value = response.json().await?;
        let name = document
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode("create response missing document name".to_string()))?;
        let id = id_from_name(name).to_string();
        debug!("inserted document (collection={collection}, id={id})");
        Ok(id)
    }

    async fn query_ordered(
        &self,
        collection: &str,
        order_field: &str,
        direction: Direction,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let url = format!("{}:runQuery", self.documents_root());
        let direction = match direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "orderBy": [{
                    "field": { "fieldPath": order_field },
                    "direction": direction,
                }],
            }
        });
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let rows: Vec<Value> = response.json().await?;
        let mut documents = Vec::new();
        for row in &rows {
            // runQuery interleaves result rows with readTime-only rows.
            let Some(document) = row.get("document") else {
                continue;
            };
            let name = document
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| StoreError::Decode("query row missing document name".to_string()))?;
            documents.push(StoredDocument {
                id: id_from_name(name).to_string(),
                fields: decode_fields(document.get("fields"))?,
            });
        }
        debug!(
            "queried collection (collection={}, count={})",
            collection,
            documents.len()
        );
        Ok(documents)
    }

    async fn remove_by_id(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}/{}", self.documents_root(), collection, id);
        let response = self
            .client
            .delete(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                // Without this precondition Firestore deletes of a missing
                // document succeed silently.
                ("currentDocument.exists", "true"),
            ])
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            debug!("removed document (collection={collection}, id={id})");
            return Ok(());
        }
        let message = response.text().await.unwrap_or_default();
        // A missing document surfaces as NOT_FOUND or as a failed
        // precondition depending on the API path.
        if status == reqwest::StatusCode::NOT_FOUND || message.contains("FAILED_PRECONDITION") {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Trailing segment of a full document resource name.
fn id_from_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Encode plain JSON fields into Firestore typed values.
fn encode_fields(fields: &Fields) -> Result<Value, StoreError> {
    let mut encoded = Map::new();
    for (name, value) in fields {
        encoded.insert(name.clone(), encode_value(name, value)?);
    }
    Ok(Value::Object(encoded))
}

fn encode_value(name: &str, value: &Value) -> Result<Value, StoreError> {
    match value {
        Value::Null => Ok(json!({ "nullValue": null })),
        Value::Bool(flag) => Ok(json!({ "booleanValue": flag })),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                // Firestore transports integers as decimal strings.
                Ok(json!({ "integerValue": int.to_string() }))
            } else if let Some(float) = number.as_f64() {
                Ok(json!({ "doubleValue": float }))
            } else {
                Err(StoreError::Unsupported(name.to_string()))
            }
        }
        Value::String(text) => Ok(json!({ "stringValue": text })),
        Value::Array(_) | Value::Object(_) => Err(StoreError::Unsupported(name.to_string())),
    }
}

/// Decode Firestore typed values back into plain JSON fields.
fn decode_fields(fields: Option<&Value>) -> Result<Fields, StoreError> {
    let mut decoded = Fields::new();
    let Some(Value::Object(fields)) = fields else {
        return Ok(decoded);
    };
    for (name, value) in fields {
        decoded.insert(name.clone(), decode_value(name, value)?);
    }
    Ok(decoded)
}

fn decode_value(name: &str, value: &Value) -> Result<Value, StoreError> {
    let Some(typed) = value.as_object() else {
        return Err(StoreError::Decode(format!(
            "field {name} is not a typed value"
        )));
    };
    let Some((kind, inner)) = typed.iter().next() else {
        return Err(StoreError::Decode(format!("field {name} has no value kind")));
    };
    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "stringValue" | "doubleValue" | "timestampValue" => Ok(inner.clone()),
        "integerValue" => match inner {
            // The production API transports integers as decimal strings;
            // the emulator answers with plain numbers.
            Value::String(raw) => raw
                .parse::<i64>()
                .map(|int| json!(int))
                .map_err(|_| StoreError::Decode(format!("field {name}: bad integer {raw:?}"))),
            Value::Number(_) => Ok(inner.clone()),
            _ => Err(StoreError::Decode(format!("field {name}: bad integer"))),
        },
        _ => Err(StoreError::Unsupported(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scalar_fields_round_trip_through_typed_values() {
        let mut fields = Fields::new();
        fields.insert("date".to_string(), json!("01/01/2024"));
        fields.insert("km".to_string(), json!(185.5));
        fields.insert("liters".to_string(), json!(16));
        fields.insert("paid".to_string(), json!(true));
        fields.insert("note".to_string(), Value::Null);

        let encoded = encode_fields(&fields).expect("encode");
        let decoded = decode_fields(Some(&encoded)).expect("decode");
        assert_eq!(decoded, fields);
    }

    #[test]
    fn integers_travel_as_decimal_strings() {
        let encoded = encode_value("liters", &json!(16)).expect("encode");
        assert_eq!(encoded, json!({ "integerValue": "16" }));
        let decoded = decode_value("liters", &encoded).expect("decode");
        assert_eq!(decoded, json!(16));
    }

    #[test]
    fn nested_values_are_unsupported() {
        let error = encode_value("tags", &json!(["a", "b"])).expect_err("must fail");
        assert!(matches!(error, StoreError::Unsupported(_)));
    }

    #[test]
    fn document_id_is_the_trailing_name_segment() {
        let name = "projects/demo/databases/(default)/documents/fillingup/oHGUWHcjAVAgm5UaHgF1";
        assert_eq!(id_from_name(name), "oHGUWHcjAVAgm5UaHgF1");
        assert_eq!(id_from_name("bare-id"), "bare-id");
    }

    #[test]
    fn missing_fields_decode_to_an_empty_document() {
        let decoded = decode_fields(None).expect("decode");
        assert_eq!(decoded, Fields::new());
    }
}
