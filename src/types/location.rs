use crate::types::lat_lon::LatLon;
use serde::{Deserialize, Serialize};

/// A place returned by a location search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResult {
    /// Provider specific identifier (Nominatim `place_id`).
    pub id: String,
    /// Short name, the first segment of the provider's display name.
    pub name: String,
    /// Country name in English, empty when the provider did not report one.
    pub country: String,
    pub coordinates: LatLon,
}
