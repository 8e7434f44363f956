//! Geographical coordinates and the free-form text input accepted for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// # Examples
///
/// ```
/// use weatherfetch::LatLon;
///
/// let hemnes = LatLon::new(66.2167, 13.6167);
/// assert_eq!(hemnes.lat, 66.2167);
/// assert_eq!(hemnes.to_string(), "66.216700, 13.616700");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Tries to parse coordinates typed by a user.
    ///
    /// Accepted forms are `"52.229676, 21.012229"`, `"52.229676,21.012229"` and
    /// `"52.229676 21.012229"`. Returns `None` unless the input holds exactly two
    /// numbers forming a valid latitude and longitude.
    ///
    /// # Examples
    ///
    /// ```
    /// use weatherfetch::LatLon;
    ///
    /// assert_eq!(
    ///     LatLon::parse("52.229676, 21.012229"),
    ///     Some(LatLon::new(52.229676, 21.012229))
    /// );
    /// assert_eq!(LatLon::parse("200, 21"), None);
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let [lat, lon] = parts.as_slice() else {
            return None;
        };

        let lat = lat.parse::<f64>().ok()?;
        let lon = lon.parse::<f64>().ok()?;

        if !is_valid_latitude(lat) || !is_valid_longitude(lon) {
            return None;
        }

        Some(Self { lat, lon })
    }

    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.lat) && is_valid_longitude(self.lon)
    }
}

/// Formats as `"lat, lon"` with six decimals.
impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

pub fn is_valid_latitude(lat: f64) -> bool {
    !lat.is_nan() && (-90.0..=90.0).contains(&lat)
}

pub fn is_valid_longitude(lon: f64) -> bool {
    !lon.is_nan() && (-180.0..=180.0).contains(&lon)
}
