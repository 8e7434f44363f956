//! The main entry point: one client for forecasts, history, location search and
//! forecast reconciliation against reference observations.

use crate::clients::archive_client::{ArchiveClient, DEFAULT_ARCHIVE_URL};
use crate::clients::forecast_client::{
    ForecastClient, DEFAULT_COMPLETE_FORECAST_URL, DEFAULT_FORECAST_URL,
};
use crate::clients::geocoding_client::{GeocodingClient, DEFAULT_GEOCODING_URL};
use crate::error::WeatherFetchError;
use crate::reconcile::config::ReconcileConfig;
use crate::reconcile::engine::reconcile;
use crate::reconcile::report::ReconciliationReport;
use crate::reference::csv_loader::load_reference_records;
use crate::table::entries_to_dataframe;
use crate::types::date_range::DateRange;
use crate::types::forecast::{ForecastDocument, ForecastEntry};
use crate::types::lat_lon::LatLon;
use crate::types::location::LocationSearchResult;
use crate::types::reference_record::ReferenceRecord;
use crate::utils::build_http_client;
use bon::bon;
use chrono::{NaiveDate, Utc};
use log::info;
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};

/// User agent sent with every request unless the builder overrides it.
pub const DEFAULT_USER_AGENT: &str = "WeatherApp/1.0 (weather-data-fetch)";

/// Client for the forecast, archive and geocoding services.
///
/// All endpoints default to the public services; override them through
/// [`WeatherFetch::builder`] to point at mirrors or test servers.
///
/// # Examples
///
/// ```rust,no_run
/// # use weatherfetch::{WeatherFetch, WeatherFetchError, LatLon};
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherFetchError> {
/// let client = WeatherFetch::builder().build()?;
/// let forecast = client.forecast(LatLon::new(66.2167, 13.6167)).await?;
/// println!("{} forecast entries", forecast.timeseries().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherFetch {
    forecast: ForecastClient,
    archive: ArchiveClient,
    geocoding: GeocodingClient,
}

#[bon]
impl WeatherFetch {
    /// Creates a client. Every setting is optional.
    ///
    /// # Arguments
    ///
    /// * `.user_agent(&str)`: Identifies the application. Defaults to [`DEFAULT_USER_AGENT`].
    /// * `.forecast_url(&str)`: Compact forecast endpoint.
    /// * `.complete_forecast_url(&str)`: Complete forecast endpoint, only used by availability checks.
    /// * `.archive_url(&str)`: Historical archive endpoint.
    /// * `.geocoding_url(&str)`: Location search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherFetchError::Fetch`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        user_agent: Option<&str>,
        forecast_url: Option<&str>,
        complete_forecast_url: Option<&str>,
        archive_url: Option<&str>,
        geocoding_url: Option<&str>,
    ) -> Result<Self, WeatherFetchError> {
        let client = build_http_client(user_agent.unwrap_or(DEFAULT_USER_AGENT))?;
        Ok(Self {
            forecast: ForecastClient::new(
                client.clone(),
                forecast_url.unwrap_or(DEFAULT_FORECAST_URL),
                complete_forecast_url.unwrap_or(DEFAULT_COMPLETE_FORECAST_URL),
            ),
            archive: ArchiveClient::new(client.clone(), archive_url.unwrap_or(DEFAULT_ARCHIVE_URL)),
            geocoding: GeocodingClient::new(client, geocoding_url.unwrap_or(DEFAULT_GEOCODING_URL)),
        })
    }

    /// Fetches the full forecast document for a location.
    pub async fn forecast(&self, location: LatLon) -> Result<ForecastDocument, WeatherFetchError> {
        Ok(self.forecast.fetch(location).await?)
    }

    /// Fetches the forecast and keeps the entries whose UTC date falls in `range`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherFetchError::DateRange`] before any request if `range`
    /// is not inside the forecast window starting `today`.
    pub async fn forecast_for_range(
        &self,
        location: LatLon,
        range: DateRange,
        today: NaiveDate,
    ) -> Result<Vec<ForecastEntry>, WeatherFetchError> {
        range.validate_forecast(today)?;
        let document = self.forecast.fetch(location).await?;
        Ok(range
            .filter_entries(document.timeseries())
            .into_iter()
            .cloned()
            .collect())
    }

    /// Fetches hourly historical observations for every day of `range`.
    pub async fn history(
        &self,
        location: LatLon,
        range: DateRange,
    ) -> Result<Vec<ForecastEntry>, WeatherFetchError> {
        Ok(self.archive.fetch(location, range).await?)
    }

    /// Same as [`WeatherFetch::history`], as a table (see [`crate::entries_to_dataframe`]).
    pub async fn history_frame(
        &self,
        location: LatLon,
        range: DateRange,
    ) -> Result<DataFrame, WeatherFetchError> {
        let entries = self.history(location, range).await?;
        Ok(entries_to_dataframe(&entries)?)
    }

    /// Searches locations by name. Queries under two characters return nothing.
    pub async fn search_location(
        &self,
        query: &str,
    ) -> Result<Vec<LocationSearchResult>, WeatherFetchError> {
        Ok(self.geocoding.search(query).await?)
    }

    /// Whether forecasts can be served for `location`.
    pub async fn check_availability(&self, location: LatLon) -> bool {
        self.forecast.check_availability(location).await
    }

    /// Loads a reference observation file on the blocking thread pool.
    pub async fn load_reference(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<ReferenceRecord>, WeatherFetchError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let records = tokio::task::spawn_blocking(move || load_reference_records(&path)).await??;
        Ok(records)
    }

    /// Checks the current forecast for `config.location` against a reference file.
    ///
    /// The forecast is fetched once, the file is loaded, and the comparison runs
    /// relative to the current time.
    ///
    /// # Errors
    ///
    /// Fails on fetch or file errors. Mismatches are not errors; they are
    /// listed in the returned report.
    pub async fn reconcile_reference(
        &self,
        path: impl AsRef<Path>,
        config: &ReconcileConfig,
    ) -> Result<ReconciliationReport, WeatherFetchError> {
        let document = self.forecast.fetch(config.location).await?;
        info!("Checking forecast for {} against {}", config.location, path.as_ref().display());
        let records = self.load_reference(path).await?;
        Ok(reconcile(&records, document.timeseries(), Utc::now(), config))
    }
}
