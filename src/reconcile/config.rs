//! Tunables of a reconciliation pass.

use crate::types::lat_lon::LatLon;
use bon::Builder;
use chrono::Duration;
use std::fmt;

/// Hemnes, Norway: location of the CM39 reference station.
pub const HEMNES: LatLon = LatLon {
    lat: 66.2167,
    lon: 13.6167,
};

/// Reserved precipitation value meaning "no measurement".
pub const NO_DATA_SENTINEL: f64 = 65535.0;

/// An open temperature interval in °C; both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    pub min: f64,
    pub max: f64,
}

impl TemperatureBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, temperature: f64) -> bool {
        self.min < temperature && temperature < self.max
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    /// June through September.
    Summer,
    /// December through March.
    Winter,
    /// April, May, October and November.
    Shoulder,
}

impl Season {
    /// Season for a 0-based month index (0 = January).
    pub fn from_month0(month0: u32) -> Self {
        match month0 {
            5..=8 => Season::Summer,
            0..=2 | 11.. => Season::Winter,
            _ => Season::Shoulder,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Shoulder => "shoulder",
        };
        write!(f, "{}", name)
    }
}

/// Plausible temperature band per season for the reference location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalBands {
    pub summer: TemperatureBand,
    pub winter: TemperatureBand,
    pub shoulder: TemperatureBand,
}

impl SeasonalBands {
    pub fn for_season(&self, season: Season) -> TemperatureBand {
        match season {
            Season::Summer => self.summer,
            Season::Winter => self.winter,
            Season::Shoulder => self.shoulder,
        }
    }
}

impl Default for SeasonalBands {
    fn default() -> Self {
        Self {
            summer: TemperatureBand::new(-5.0, 30.0),
            winter: TemperatureBand::new(-25.0, 10.0),
            shoulder: TemperatureBand::new(-15.0, 20.0),
        }
    }
}

/// Configuration of a reconciliation pass.
///
/// Every field has a default, so `ReconcileConfig::builder().build()` yields the
/// standard check for the Hemnes reference station.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use weatherfetch::{LatLon, ReconcileConfig};
///
/// let config = ReconcileConfig::builder()
///     .location(LatLon::new(59.91, 10.75))
///     .precipitation_margin_mm(0.5)
///     .recent_only(false)
///     .build();
/// assert_eq!(config.match_window, Duration::minutes(5));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ReconcileConfig {
    /// Location the forecast is fetched for.
    #[builder(default = HEMNES)]
    pub location: LatLon,

    /// Maximum distance between a reference timestamp and a forecast timestamp.
    #[builder(default = Duration::minutes(5))]
    pub match_window: Duration,

    /// Largest accepted absolute difference between derived and reference precipitation.
    #[builder(default = 1.0)]
    pub precipitation_margin_mm: f64,

    #[builder(default = NO_DATA_SENTINEL)]
    pub no_data_sentinel: f64,

    /// Only compare reference records that fall inside `recent_window` before "now".
    #[builder(default = true)]
    pub recent_only: bool,

    #[builder(default = Duration::hours(24))]
    pub recent_window: Duration,

    #[builder(default)]
    pub temperature_bands: SeasonalBands,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
