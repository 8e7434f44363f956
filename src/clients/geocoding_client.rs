//! Location search through the OpenStreetMap Nominatim API.

use crate::clients::error::FetchError;
use crate::types::lat_lon::LatLon;
use crate::types::location::LocationSearchResult;
use crate::utils::{read_json, send_checked};
use log::{info, warn};
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Queries shorter than this are not sent.
pub const MIN_QUERY_LENGTH: usize = 2;
const RESULT_LIMIT: &str = "5";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: Value,
    display_name: String,
    #[serde(default)]
    address: Option<NominatimAddress>,
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    #[serde(default)]
    country: Option<String>,
}

impl NominatimPlace {
    fn into_result(self) -> Option<LocationSearchResult> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lon = self.lon.trim().parse::<f64>().ok()?;
        let coordinates = LatLon::new(lat, lon);
        if !coordinates.is_valid() {
            return None;
        }

        let id = match self.place_id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        let name = self
            .display_name
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        let country = self.address.and_then(|a| a.country).unwrap_or_default();

        Some(LocationSearchResult {
            id,
            name,
            country,
            coordinates,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    endpoint: String,
}

impl GeocodingClient {
    pub fn new(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    /// Searches places by free text, returning at most five results.
    ///
    /// Queries shorter than [`MIN_QUERY_LENGTH`] characters return an empty list
    /// without contacting the service. Places whose coordinates cannot be parsed are dropped.
    pub async fn search(&self, query: &str) -> Result<Vec<LocationSearchResult>, FetchError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Ok(Vec::new());
        }

        let request = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("limit", RESULT_LIMIT),
                ("addressdetails", "1"),
            ])
            .header(ACCEPT_LANGUAGE, "en");
        let url = format!("{}?q={}", self.endpoint, query);
        info!("Searching location '{}'", query);

        let response = send_checked(request, &url).await?;
        let places: Vec<NominatimPlace> = read_json(response, &url).await?;

        Ok(places
            .into_iter()
            .filter_map(|place| {
                let display_name = place.display_name.clone();
                let result = place.into_result();
                if result.is_none() {
                    warn!("Dropping search result '{}' with invalid coordinates", display_name);
                }
                result
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::test_server::spawn_fixture_server;
    use crate::utils::build_http_client;

    async fn fixture_client() -> GeocodingClient {
        let base = spawn_fixture_server().await;
        GeocodingClient::new(
            build_http_client("WeatherApp/1.0 (test)").unwrap(),
            &format!("{}/search", base),
        )
    }

    #[tokio::test]
    async fn test_search_maps_results() -> Result<(), FetchError> {
        let client = fixture_client().await;
        let results = client.search("Hemnes").await?;

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0],
            LocationSearchResult {
                id: "123456".to_string(),
                name: "Hemnes".to_string(),
                country: "Norway".to_string(),
                coordinates: LatLon::new(66.2167, 13.6167),
            }
        );
        assert_eq!(results[1].id, "987");
        assert_eq!(results[1].name, "Somewhere at sea");
        assert_eq!(results[1].country, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_short_query_skips_request() -> Result<(), FetchError> {
        // Unroutable endpoint: any request would fail
        let client = GeocodingClient::new(
            build_http_client("WeatherApp/1.0 (test)")?,
            "http://127.0.0.1:9/search",
        );
        assert!(client.search(" H ").await?.is_empty());
        assert!(client.search("").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = GeocodingClient::new(
            build_http_client("WeatherApp/1.0 (test)").unwrap(),
            "http://127.0.0.1:9/search",
        );
        let err = client.search("Hemnes").await.unwrap_err();
        assert!(matches!(err, FetchError::NetworkRequest(..)));
    }
}
