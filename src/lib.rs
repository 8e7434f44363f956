mod clients;
mod error;
mod reconcile;
mod reference;
mod table;
mod types;
mod utils;
mod weather_fetch;

pub use error::WeatherFetchError;
pub use weather_fetch::*;

pub use clients::archive_client::*;
pub use clients::error::FetchError;
pub use clients::forecast_client::*;
pub use clients::geocoding_client::*;

pub use reconcile::config::*;
pub use reconcile::engine::*;
pub use reconcile::report::*;

pub use reference::csv_loader::*;
pub use reference::date_normalizer::normalize_date;
pub use reference::error::ReferenceDataError;

pub use table::*;

pub use types::date_range::*;
pub use types::forecast::*;
pub use types::lat_lon::*;
pub use types::location::LocationSearchResult;
pub use types::reference_record::*;
