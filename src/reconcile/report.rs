//! Results of a reconciliation pass.

use crate::reconcile::config::{Season, TemperatureBand};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

/// A value outside its tolerance or plausibility band.
///
/// Mismatches are collected, never raised: one bad record must not hide the others.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// Derived 3-hour forecast precipitation differs too much from the reference.
    Precipitation {
        reference_date: String,
        reference_time: NaiveDateTime,
        forecast_time: DateTime<Utc>,
        reference_mm: f64,
        derived_mm: f64,
        difference_mm: f64,
    },
    /// Forecast temperature outside the seasonal band.
    Temperature {
        time: DateTime<Utc>,
        temperature: f64,
        month0: u32,
        season: Season,
        band: TemperatureBand,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Precipitation {
                reference_date,
                forecast_time,
                reference_mm,
                derived_mm,
                difference_mm,
                ..
            } => write!(
                f,
                "precipitation at {} (forecast {}): reference {:.1} mm, forecast {:.1} mm, off by {:.2} mm",
                reference_date,
                forecast_time.format("%Y-%m-%d %H:%M"),
                reference_mm,
                derived_mm,
                difference_mm
            ),
            Mismatch::Temperature {
                time,
                temperature,
                season,
                band,
                ..
            } => write!(
                f,
                "temperature at {}: {:.1} °C outside {} band {}",
                time.format("%Y-%m-%d %H:%M"),
                temperature,
                season,
                band
            ),
        }
    }
}

/// Outcome of comparing a reference dataset against one forecast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationReport {
    /// Reference records that survived filtering and were looked up in the forecast.
    pub checked_records: usize,
    /// Checked records that found a forecast entry inside the match window.
    pub matched_records: usize,
    /// Records without a usable precipitation value (sentinel or non-numeric).
    pub excluded_records: usize,
    /// Records whose date could not be parsed.
    pub skipped_records: usize,
    /// Records outside the recent-overlap window.
    pub outside_window_records: usize,
    /// Forecast entries whose temperature was checked.
    pub checked_entries: usize,
    pub mismatches: Vec<Mismatch>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn precipitation_mismatches(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| matches!(m, Mismatch::Precipitation { .. }))
    }

    pub fn temperature_mismatches(&self) -> impl Iterator<Item = &Mismatch> {
        self.mismatches
            .iter()
            .filter(|m| matches!(m, Mismatch::Temperature { .. }))
    }
}

impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} reference records checked, {} matched ({} excluded, {} malformed, {} outside window)",
            self.checked_records,
            self.matched_records,
            self.excluded_records,
            self.skipped_records,
            self.outside_window_records
        )?;
        writeln!(f, "{} forecast temperatures checked", self.checked_entries)?;
        if self.mismatches.is_empty() {
            write!(f, "no mismatches")
        } else {
            write!(f, "{} mismatches:", self.mismatches.len())?;
            for m in &self.mismatches {
                write!(f, "\n  - {}", m)?;
            }
            Ok(())
        }
    }
}
