//! Client for the Open-Meteo historical weather archive.
//!
//! The archive answers with parallel arrays (`hourly.time[i]`,
//! `hourly.temperature_2m[i]`, ...). [`transpose_hourly`] turns those into the
//! row-oriented [`ForecastEntry`] shape so historical data can go through the same
//! tables and checks as forecasts.

use crate::clients::error::FetchError;
use crate::types::date_range::DateRange;
use crate::types::forecast::{ForecastEntry, InstantDetails, PrecipitationHorizon};
use crate::types::lat_lon::LatLon;
use crate::utils::{ensure_valid, read_json, send_checked};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use log::info;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Hourly variables requested from the archive, in request order.
pub const HOURLY_FIELDS: [&str; 7] = [
    "temperature_2m",
    "relative_humidity_2m",
    "pressure_msl",
    "wind_speed_10m",
    "wind_direction_10m",
    "cloud_cover",
    "precipitation",
];

const ARCHIVE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub hourly: HourlyColumns,
}

/// Column-oriented hourly data. A column the API did not return is `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyColumns {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub pressure_msl: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub wind_direction_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub cloud_cover: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,
}

/// Transposes parallel hourly arrays into one [`ForecastEntry`] per timestamp.
///
/// Archive timestamps are local to the location; `utc_offset_seconds` (as
/// reported next to them) converts them to UTC. Hourly precipitation becomes
/// the entry's 1-hour bucket.
///
/// # Errors
///
/// [`FetchError::Format`] when a column's length differs from `time`'s or a
/// timestamp cannot be parsed.
pub fn transpose_hourly(
    columns: &HourlyColumns,
    utc_offset_seconds: i32,
) -> Result<Vec<ForecastEntry>, FetchError> {
    let rows = columns.time.len();
    let named = [
        ("temperature_2m", &columns.temperature_2m),
        ("relative_humidity_2m", &columns.relative_humidity_2m),
        ("pressure_msl", &columns.pressure_msl),
        ("wind_speed_10m", &columns.wind_speed_10m),
        ("wind_direction_10m", &columns.wind_direction_10m),
        ("cloud_cover", &columns.cloud_cover),
        ("precipitation", &columns.precipitation),
    ];
    for (name, column) in named {
        if let Some(values) = column {
            if values.len() != rows {
                return Err(FetchError::Format {
                    url: "hourly".to_string(),
                    message: format!(
                        "column '{}' has {} values, 'time' has {}",
                        name,
                        values.len(),
                        rows
                    ),
                });
            }
        }
    }

    let value_at = |column: &Option<Vec<Option<f64>>>, i: usize| {
        column.as_ref().and_then(|values| values[i])
    };
    let offset = Duration::seconds(i64::from(utc_offset_seconds));

    columns
        .time
        .iter()
        .enumerate()
        .map(|(i, raw_time)| {
            let local = NaiveDateTime::parse_from_str(raw_time, ARCHIVE_TIME_FORMAT).map_err(
                |e| FetchError::Format {
                    url: "hourly.time".to_string(),
                    message: format!("invalid timestamp '{}': {}", raw_time, e),
                },
            )?;
            let time: DateTime<Utc> = (local - offset).and_utc();

            let details = InstantDetails {
                air_temperature: value_at(&columns.temperature_2m, i),
                relative_humidity: value_at(&columns.relative_humidity_2m, i),
                air_pressure_at_sea_level: value_at(&columns.pressure_msl, i),
                wind_speed: value_at(&columns.wind_speed_10m, i),
                wind_from_direction: value_at(&columns.wind_direction_10m, i),
                cloud_area_fraction: value_at(&columns.cloud_cover, i),
            };
            let mut entry = ForecastEntry::new(time, details);
            if columns.precipitation.is_some() {
                entry = entry.with_precipitation(
                    PrecipitationHorizon::OneHour,
                    value_at(&columns.precipitation, i),
                );
            }
            Ok(entry)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ArchiveClient {
    client: Client,
    endpoint: String,
}

impl ArchiveClient {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Fetches hourly observations for every day of `range` and returns them row-oriented.
    pub async fn fetch(
        &self,
        location: LatLon,
        range: DateRange,
    ) -> Result<Vec<ForecastEntry>, FetchError> {
        ensure_valid(location)?;
        let start_date = range.start().format("%Y-%m-%d").to_string();
        let end_date = range.end().format("%Y-%m-%d").to_string();
        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&hourly={}&wind_speed_unit=ms&timezone=auto",
            self.endpoint,
            location.lat,
            location.lon,
            start_date,
            end_date,
            HOURLY_FIELDS.join(",")
        );
        info!("Fetching archive data from {}", url);

        let response = send_checked(self.client.get(&url), &url).await?;
        let archive: ArchiveResponse = read_json(response, &url).await?;

        transpose_hourly(&archive.hourly, archive.utc_offset_seconds).map_err(|e| match e {
            FetchError::Format { message, .. } => FetchError::Format { url, message },
            other => other,
        })
    }
}
