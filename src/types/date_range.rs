//! Date range selection for forecast and history requests.

use crate::types::forecast::ForecastEntry;
use chrono::{Duration, NaiveDate};
use thiserror::Error;

/// Number of days ahead the forecast selector allows.
pub const FORECAST_DAYS_AHEAD: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },

    #[error("Date range {start}..={end} is outside the forecast window {window_start}..={window_end}")]
    OutsideForecastWindow {
        start: NaiveDate,
        end: NaiveDate,
        window_start: NaiveDate,
        window_end: NaiveDate,
    },
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// The default selection for forecasts: today through one week ahead.
    pub fn forecast_window(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Duration::days(FORECAST_DAYS_AHEAD),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Checks that the range can be served by the forecast API, i.e. lies inside
    /// [`DateRange::forecast_window`] for `today`.
    pub fn validate_forecast(&self, today: NaiveDate) -> Result<(), DateRangeError> {
        let window = Self::forecast_window(today);
        if window.contains(self.start) && window.contains(self.end) {
            Ok(())
        } else {
            Err(DateRangeError::OutsideForecastWindow {
                start: self.start,
                end: self.end,
                window_start: window.start,
                window_end: window.end,
            })
        }
    }

    /// Keeps the entries whose UTC date lies inside the range, in their original order.
    pub fn filter_entries<'a>(&self, entries: &'a [ForecastEntry]) -> Vec<&'a ForecastEntry> {
        entries
            .iter()
            .filter(|e| self.contains(e.time.date_naive()))
            .collect()
    }
}
