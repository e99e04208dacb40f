//! Fill-up record model and store-document field mapping.

use crate::autonomy;
use crate::date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tanklog_store::{Fields, StoreError};

/// Fuel type labels, open-ended beyond the common three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuelType {
    Gasoline,
    Ethanol,
    Diesel,
    /// Any other label entered in the form.
    Other(String),
}

impl FuelType {
    /// Canonical label stored in the `fuel` field.
    pub fn label(&self) -> &str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Ethanol => "Ethanol",
            FuelType::Diesel => "Diesel",
            FuelType::Other(label) => label,
        }
    }
}

impl From<String> for FuelType {
    fn from(label: String) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "gasoline" => FuelType::Gasoline,
            "ethanol" => FuelType::Ethanol,
            "diesel" => FuelType::Diesel,
            _ => FuelType::Other(label),
        }
    }
}

impl From<FuelType> for String {
    fn from(fuel: FuelType) -> Self {
        fuel.label().to_string()
    }
}

impl FromStr for FuelType {
    type Err = Infallible;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Ok(FuelType::from(label.to_string()))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One refueling event as kept in the local ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillUpRecord {
    /// Store-assigned document id.
    pub id: String,
    /// Fill-up calendar date.
    pub date: NaiveDate,
    /// Fuel type label.
    pub fuel: FuelType,
    /// Distance covered since the previous fill-up, in km.
    pub km: f64,
    /// Volume added, in liters.
    pub liters: f64,
    /// Derived km per liter, rounded to two decimals.
    pub autonomy: f64,
}

impl FillUpRecord {
    /// Encode the record into store document fields.
    ///
    /// `date` travels as the zero-padded `dd/mm/yyyy` string and
    /// `autonomy` as its fixed two-decimal rendering, matching the
    /// documents the collection already holds.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("date".to_string(), Value::String(date::format_date(self.date)));
        fields.insert("fuel".to_string(), Value::String(self.fuel.label().to_string()));
        fields.insert("km".to_string(), json!(self.km));
        fields.insert("liters".to_string(), json!(self.liters));
        fields.insert(
            "autonomy".to_string(),
            Value::String(autonomy::format_autonomy(self.autonomy)),
        );
        fields
    }

    /// Decode a store document into a record.
    ///
    /// Numeric fields are accepted both as numbers and as numeric strings:
    /// older documents stored raw form text.
    pub fn from_document(id: &str, fields: &Fields) -> Result<Self, StoreError> {
        let raw_date = string_field(id, fields, "date")?;
        let date = date::parse_date(raw_date)
            .map_err(|err| StoreError::Decode(format!("document {id}: {err}")))?;
        let fuel = FuelType::from(string_field(id, fields, "fuel")?.to_string());
        Ok(Self {
            id: id.to_string(),
            date,
            fuel,
            km: number_field(id, fields, "km")?,
            liters: number_field(id, fields, "liters")?,
            autonomy: number_field(id, fields, "autonomy")?,
        })
    }
}

fn string_field<'a>(id: &str, fields: &'a Fields, name: &str) -> Result<&'a str, StoreError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Decode(format!("document {id}: missing string field {name}")))
}

fn number_field(id: &str, fields: &Fields, name: &str) -> Result<f64, StoreError> {
    let value = fields
        .get(name)
        .ok_or_else(|| StoreError::Decode(format!("document {id}: missing field {name}")))?;
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| StoreError::Decode(format!("document {id}: bad number in {name}"))),
        Value::String(raw) => raw.trim().parse().map_err(|_| {
            StoreError::Decode(format!("document {id}: {name} is not numeric: {raw:?}"))
        }),
        _ => Err(StoreError::Decode(format!(
            "document {id}: unexpected value in {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FillUpRecord {
        FillUpRecord {
            id: "oHGUWHcjAVAgm5UaHgF1".to_string(),
            date: date::parse_date("11/11/2024").expect("date"),
            fuel: FuelType::Gasoline,
            km: 185.0,
            liters: 16.0,
            autonomy: 11.56,
        }
    }

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(FuelType::from("Gasoline".to_string()), FuelType::Gasoline);
        assert_eq!(FuelType::from("diesel".to_string()), FuelType::Diesel);
        assert_eq!(FuelType::from("ETHANOL".to_string()), FuelType::Ethanol);
        assert_eq!(
            FuelType::from("Gasolina".to_string()),
            FuelType::Other("Gasolina".to_string())
        );
    }

    #[test]
    fn encodes_wire_field_shapes() {
        let fields = sample().to_fields();
        assert_eq!(fields["date"], json!("11/11/2024"));
        assert_eq!(fields["fuel"], json!("Gasoline"));
        assert_eq!(fields["km"], json!(185.0));
        assert_eq!(fields["liters"], json!(16.0));
        assert_eq!(fields["autonomy"], json!("11.56"));
    }

    #[test]
    fn decodes_its_own_encoding() {
        let record = sample();
        let decoded =
            FillUpRecord::from_document(&record.id, &record.to_fields()).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn accepts_numbers_stored_as_strings() {
        let mut fields = sample().to_fields();
        fields.insert("km".to_string(), json!("185"));
        fields.insert("liters".to_string(), json!("16"));
        let decoded = FillUpRecord::from_document("legacy", &fields).expect("decode");
        assert_eq!(decoded.km, 185.0);
        assert_eq!(decoded.liters, 16.0);
    }

    #[test]
    fn missing_field_fails_to_decode() {
        let mut fields = sample().to_fields();
        fields.remove("liters");
        let error = FillUpRecord::from_document("broken", &fields).expect_err("must fail");
        assert!(matches!(error, StoreError::Decode(_)));
    }

    #[test]
    fn malformed_stored_date_fails_to_decode() {
        let mut fields = sample().to_fields();
        fields.insert("date".to_string(), json!("not a date"));
        let error = FillUpRecord::from_document("broken", &fields).expect_err("must fail");
        assert!(matches!(error, StoreError::Decode(_)));
    }
}
