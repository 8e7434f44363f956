//! Observation rows from the reference (ground truth) CSV dataset.

use crate::reference::date_normalizer::normalize_date;
use chrono::NaiveDateTime;

/// Column holding the observation timestamp (`DD.MM.YYYY HH:MM`).
pub const DATE_COLUMN: &str = "Date";
/// Column holding the 3-hour precipitation sum in millimetres.
pub const PRECIPITATION_3H_COLUMN: &str = "rr3h(mm)";

/// One row of the reference dataset.
///
/// `date` and `precipitation_3h` are kept verbatim; the full row is available
/// through [`ReferenceRecord::field`] in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRecord {
    pub date: String,
    pub precipitation_3h: String,
    fields: Vec<(String, String)>,
}

impl ReferenceRecord {
    pub(crate) fn new(date: String, precipitation_3h: String, fields: Vec<(String, String)>) -> Self {
        Self {
            date,
            precipitation_3h,
            fields,
        }
    }

    /// Builds a record carrying only the two columns used for reconciliation.
    pub fn from_values(date: &str, precipitation_3h: &str) -> Self {
        Self {
            date: date.to_string(),
            precipitation_3h: precipitation_3h.to_string(),
            fields: vec![
                (DATE_COLUMN.to_string(), date.to_string()),
                (PRECIPITATION_3H_COLUMN.to_string(), precipitation_3h.to_string()),
            ],
        }
    }

    /// Value of an arbitrary column of the source row.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The observation time, `None` when the date text is malformed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        normalize_date(&self.date)
    }

    /// Parsed precipitation, `None` when the text is not a finite number.
    pub fn precipitation_value(&self) -> Option<f64> {
        self.precipitation_3h
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}
