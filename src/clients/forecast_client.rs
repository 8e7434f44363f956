//! Client for the MET Norway Locationforecast 2.0 API.

use crate::clients::error::FetchError;
use crate::types::forecast::ForecastDocument;
use crate::types::lat_lon::LatLon;
use crate::utils::{ensure_valid, read_json, round_coordinate, send_checked};
use futures_util::future::select_ok;
use log::{debug, info};
use reqwest::Client;

pub const DEFAULT_FORECAST_URL: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/compact";
pub const DEFAULT_COMPLETE_FORECAST_URL: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/complete";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    endpoint: String,
    complete_endpoint: String,
}

impl ForecastClient {
    pub fn new(client: Client, endpoint: &str, complete_endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
            complete_endpoint: complete_endpoint.to_string(),
        }
    }

    fn url_for(endpoint: &str, location: LatLon) -> String {
        format!(
            "{}?lat={}&lon={}",
            endpoint,
            round_coordinate(location.lat),
            round_coordinate(location.lon)
        )
    }

    /// Fetches the forecast document for a location. A single request, no retry.
    ///
    /// # Errors
    ///
    /// * [`FetchError::InvalidCoordinates`] before any request for out-of-range input.
    /// * [`FetchError::NetworkRequest`] / [`FetchError::HttpStatus`] when the request fails.
    /// * [`FetchError::Format`] when the body is not a document with `properties.timeseries`.
    pub async fn fetch(&self, location: LatLon) -> Result<ForecastDocument, FetchError> {
        ensure_valid(location)?;
        let url = Self::url_for(&self.endpoint, location);
        info!("Fetching forecast from {}", url);

        let response = send_checked(self.client.get(&url), &url).await?;
        let document: ForecastDocument = read_json(response, &url).await?;

        debug!(
            "Forecast for {} has {} entries",
            location,
            document.timeseries().len()
        );
        Ok(document)
    }

    async fn probe(&self, url: String) -> Result<(), FetchError> {
        send_checked(self.client.get(&url), &url).await.map(|_| ())
    }

    /// Whether forecasts can be served for a location.
    ///
    /// The compact and complete products are requested concurrently; the first
    /// successful answer decides. The other request is dropped, not awaited.
    pub async fn check_availability(&self, location: LatLon) -> bool {
        if ensure_valid(location).is_err() {
            return false;
        }
        let probes = [
            Box::pin(self.probe(Self::url_for(&self.endpoint, location))),
            Box::pin(self.probe(Self::url_for(&self.complete_endpoint, location))),
        ];
        match select_ok(probes).await {
            Ok(_) => true,
            Err(e) => {
                debug!("No forecast available for {}: {}", location, e);
                false
            }
        }
    }
}
