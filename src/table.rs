//! Tabular view of forecast and archive entries.

use crate::types::forecast::{ForecastEntry, PrecipitationHorizon};
use chrono::SecondsFormat;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Column order of the frames built by [`entries_to_dataframe`].
pub const TABLE_COLUMNS: [&str; 7] = [
    "time",
    "temperature",
    "humidity",
    "pressure",
    "wind_speed",
    "wind_direction",
    "precipitation",
];

/// Builds one row per entry. `time` is an RFC 3339 UTC string, `precipitation`
/// the 1-hour amount; missing values are null.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use weatherfetch::{entries_to_dataframe, ForecastEntry, InstantDetails};
///
/// let entry = ForecastEntry::new(
///     Utc.with_ymd_and_hms(2024, 3, 21, 12, 0, 0).unwrap(),
///     InstantDetails { air_temperature: Some(-2.0), ..Default::default() },
/// );
/// let df = entries_to_dataframe(&[entry]).unwrap();
/// assert_eq!(df.height(), 1);
/// ```
pub fn entries_to_dataframe(entries: &[ForecastEntry]) -> PolarsResult<DataFrame> {
    let time: Vec<String> = entries
        .iter()
        .map(|e| e.time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .collect();
    let column = |get: fn(&ForecastEntry) -> Option<f64>| -> Vec<Option<f64>> {
        entries.iter().map(get).collect()
    };

    df!(
        "time" => time,
        "temperature" => column(|e| e.details().air_temperature),
        "humidity" => column(|e| e.details().relative_humidity),
        "pressure" => column(|e| e.details().air_pressure_at_sea_level),
        "wind_speed" => column(|e| e.details().wind_speed),
        "wind_direction" => column(|e| e.details().wind_from_direction),
        "precipitation" => column(|e| e.precipitation(PrecipitationHorizon::OneHour)),
    )
}

/// Writes a frame as a semicolon separated CSV file with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b';')
        .finish(df)?;
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
