use crate::clients::error::FetchError;
use crate::reference::error::ReferenceDataError;
use crate::types::date_range::DateRangeError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error("Failed to build table: {0}")]
    Polars(#[from] PolarsError),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
