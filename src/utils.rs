use crate::clients::error::FetchError;
use crate::types::lat_lon::LatLon;
use log::warn;
use reqwest::{Client, RequestBuilder, Response};

/// Builds the shared HTTP client. Every request carries `user_agent`, which the
/// MET Norway and Nominatim terms of service require.
pub(crate) fn build_http_client(user_agent: &str) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .build()
        .map_err(FetchError::ClientBuild)
}

/// Sends a request and turns transport failures and non-success statuses into [`FetchError`].
pub(crate) async fn send_checked(request: RequestBuilder, url: &str) -> Result<Response, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

    match response.error_for_status() {
        Ok(resp) => Ok(resp),
        Err(e) => {
            warn!("HTTP error for {}: {:?}", url, e);
            Err(if let Some(status) = e.status() {
                FetchError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                FetchError::NetworkRequest(url.to_string(), e)
            })
        }
    }
}

/// Reads a response body and deserializes it, reporting shape problems as
/// [`FetchError::Format`].
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, FetchError> {
    let body = response
        .text()
        .await
        .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;
    serde_json::from_str(&body).map_err(|e| FetchError::Format {
        url: url.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn ensure_valid(location: LatLon) -> Result<(), FetchError> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(FetchError::InvalidCoordinates {
            lat: location.lat,
            lon: location.lon,
        })
    }
}

/// Rounds to four decimals, the finest precision MET Norway accepts.
pub(crate) fn round_coordinate(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
