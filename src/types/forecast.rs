//! Row-oriented forecast data as returned by the MET Norway Locationforecast API.
//!
//! The same [`ForecastEntry`] shape is produced for historical archive data after
//! transposition, so everything downstream (reconciliation, tables) works on one type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A complete Locationforecast response (`GeoJSON` feature).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    pub properties: ForecastProperties,
}

impl ForecastDocument {
    pub fn timeseries(&self) -> &[ForecastEntry] {
        &self.properties.timeseries
    }

    pub fn into_timeseries(self) -> Vec<ForecastEntry> {
        self.properties.timeseries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, altitude]`, altitude may be missing.
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub meta: Option<ForecastMeta>,
    pub timeseries: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMeta {
    pub updated_at: DateTime<Utc>,
}

/// One timestamped prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub data: ForecastData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    pub instant: Instant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_1_hours: Option<PrecipitationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_2_hours: Option<PrecipitationPeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_3_hours: Option<PrecipitationPeriod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    #[serde(default)]
    pub details: InstantDetails,
}

/// Instantaneous values. The compact product omits some of these for
/// later time steps, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstantDetails {
    #[serde(default)]
    pub air_temperature: Option<f64>,
    #[serde(default)]
    pub relative_humidity: Option<f64>,
    #[serde(default)]
    pub air_pressure_at_sea_level: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_from_direction: Option<f64>,
    #[serde(default)]
    pub cloud_area_fraction: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PeriodSummary>,
    #[serde(default)]
    pub details: PeriodDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub symbol_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodDetails {
    #[serde(default)]
    pub precipitation_amount: Option<f64>,
}

/// The precipitation buckets a forecast entry may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipitationHorizon {
    OneHour,
    TwoHours,
    ThreeHours,
}

impl ForecastEntry {
    pub fn new(time: DateTime<Utc>, details: InstantDetails) -> Self {
        Self {
            time,
            data: ForecastData {
                instant: Instant { details },
                next_1_hours: None,
                next_2_hours: None,
                next_3_hours: None,
            },
        }
    }

    /// Sets the precipitation amount of one bucket, replacing any previous value.
    pub fn with_precipitation(mut self, horizon: PrecipitationHorizon, amount: Option<f64>) -> Self {
        let period = Some(PrecipitationPeriod {
            summary: None,
            details: PeriodDetails {
                precipitation_amount: amount,
            },
        });
        match horizon {
            PrecipitationHorizon::OneHour => self.data.next_1_hours = period,
            PrecipitationHorizon::TwoHours => self.data.next_2_hours = period,
            PrecipitationHorizon::ThreeHours => self.data.next_3_hours = period,
        }
        self
    }

    pub fn details(&self) -> &InstantDetails {
        &self.data.instant.details
    }

    pub fn temperature(&self) -> Option<f64> {
        self.details().air_temperature
    }

    /// Precipitation amount of a bucket, `None` when the bucket or its amount is absent.
    pub fn precipitation(&self, horizon: PrecipitationHorizon) -> Option<f64> {
        let period = match horizon {
            PrecipitationHorizon::OneHour => self.data.next_1_hours.as_ref(),
            PrecipitationHorizon::TwoHours => self.data.next_2_hours.as_ref(),
            PrecipitationHorizon::ThreeHours => self.data.next_3_hours.as_ref(),
        };
        period.and_then(|p| p.details.precipitation_amount)
    }
}
