use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response format from {url}: {message}")]
    Format { url: String, message: String },

    #[error("Invalid coordinates {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
}
