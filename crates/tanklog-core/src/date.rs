//! Calendar date parsing, formatting, and chronological ordering.

use crate::error::ValidationError;
use crate::model::FillUpRecord;
use chrono::NaiveDate;

/// Wire format used by the collection: zero-padded day/month/year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `dd/mm/yyyy` date as entered in the form.
///
/// Non-numeric components, missing separators, and impossible calendar
/// dates all fail with a [`ValidationError`].
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing("date"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ValidationError::MalformedDate {
        value: raw.to_string(),
    })
}

/// Render a date in the canonical zero-padded wire form.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Sort records ascending by date.
///
/// The sort is stable: records sharing a date keep their relative order,
/// which is the store's iteration order.
pub fn sort_chronological(records: &mut [FillUpRecord]) {
    records.sort_by_key(|record| record.date);
}
