//! The reconciliation pass: reference precipitation against a forecast, plus a
//! temperature plausibility check over the whole forecast.
//!
//! Everything here is pure; fetching and loading happen in [`crate::WeatherFetch`].

use crate::reconcile::config::{ReconcileConfig, Season, SeasonalBands};
use crate::reconcile::report::{Mismatch, ReconciliationReport};
use crate::types::forecast::{ForecastEntry, PrecipitationHorizon};
use crate::types::reference_record::ReferenceRecord;
use chrono::{DateTime, Datelike, Duration, Utc};
use log::{debug, info};

/// 3-hour precipitation total of a forecast entry.
///
/// Coarser buckets win when they carry rain: the 3 h amount if present and
/// positive, else the 2 h amount if present and positive, else the 1 h amount
/// (0 when absent).
pub fn derive_three_hour_precipitation(entry: &ForecastEntry) -> f64 {
    let positive = |horizon| entry.precipitation(horizon).filter(|v: &f64| *v > 0.0);

    positive(PrecipitationHorizon::ThreeHours)
        .or_else(|| positive(PrecipitationHorizon::TwoHours))
        .or_else(|| entry.precipitation(PrecipitationHorizon::OneHour))
        .unwrap_or(0.0)
}

/// First entry, in forecast order, whose time is within `window` of `time`.
///
/// This is deliberately not a nearest-neighbour search: an earlier entry that
/// satisfies the window wins over a later, closer one.
pub fn find_match<'a>(
    time: DateTime<Utc>,
    forecast: &'a [ForecastEntry],
    window: Duration,
) -> Option<&'a ForecastEntry> {
    forecast
        .iter()
        .find(|entry| (entry.time - time).abs() <= window)
}

/// Checks one entry's temperature against the band of its (0-based) month.
/// Entries without a temperature pass.
pub fn check_temperature(entry: &ForecastEntry, bands: &SeasonalBands) -> Option<Mismatch> {
    let temperature = entry.temperature()?;
    let month0 = entry.time.month0();
    let season = Season::from_month0(month0);
    let band = bands.for_season(season);

    if band.contains(temperature) {
        None
    } else {
        Some(Mismatch::Temperature {
            time: entry.time,
            temperature,
            month0,
            season,
            band,
        })
    }
}

/// Runs one reconciliation pass.
///
/// Reference records are filtered (no-data sentinel, malformed dates, optional
/// recent-overlap window), matched to the forecast with [`find_match`], and
/// compared using [`derive_three_hour_precipitation`]. Every forecast entry is
/// then checked with [`check_temperature`]. All violations end up in the
/// returned report.
pub fn reconcile(
    reference: &[ReferenceRecord],
    forecast: &[ForecastEntry],
    now: DateTime<Utc>,
    config: &ReconcileConfig,
) -> ReconciliationReport {
    let mut report = ReconciliationReport::default();
    let window_start = now - config.recent_window;

    for record in reference {
        let Some(reference_mm) = record
            .precipitation_value()
            .filter(|v| *v != config.no_data_sentinel)
        else {
            report.excluded_records += 1;
            continue;
        };

        let Some(reference_time) = record.timestamp() else {
            debug!("Skipping reference record with malformed date '{}'", record.date);
            report.skipped_records += 1;
            continue;
        };
        let reference_utc = reference_time.and_utc();

        if config.recent_only && (reference_utc < window_start || reference_utc > now) {
            report.outside_window_records += 1;
            continue;
        }

        report.checked_records += 1;

        let Some(entry) = find_match(reference_utc, forecast, config.match_window) else {
            continue;
        };
        report.matched_records += 1;

        let derived_mm = derive_three_hour_precipitation(entry);
        let difference_mm = (derived_mm - reference_mm).abs();
        if difference_mm > config.precipitation_margin_mm {
            let mismatch = Mismatch::Precipitation {
                reference_date: record.date.clone(),
                reference_time,
                forecast_time: entry.time,
                reference_mm,
                derived_mm,
                difference_mm,
            };
            debug!("Mismatch: {}", mismatch);
            report.mismatches.push(mismatch);
        }
    }

    for entry in forecast {
        if entry.temperature().is_some() {
            report.checked_entries += 1;
        }
        if let Some(mismatch) = check_temperature(entry, &config.temperature_bands) {
            debug!("Mismatch: {}", mismatch);
            report.mismatches.push(mismatch);
        }
    }

    info!(
        "Reconciliation: {} of {} checked records matched, {} mismatches",
        report.matched_records,
        report.checked_records,
        report.mismatches.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::forecast::InstantDetails;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn entry(time: DateTime<Utc>, temperature: Option<f64>) -> ForecastEntry {
        ForecastEntry::new(
            time,
            InstantDetails {
                air_temperature: temperature,
                ..Default::default()
            },
        )
    }

    fn offline_config() -> ReconcileConfig {
        ReconcileConfig::builder().recent_only(false).build()
    }

    #[test]
    fn test_derive_prefers_positive_three_hour() {
        let e = entry(at(2024, 3, 21, 12, 0), None)
            .with_precipitation(PrecipitationHorizon::OneHour, Some(0.2))
            .with_precipitation(PrecipitationHorizon::TwoHours, Some(0.9))
            .with_precipitation(PrecipitationHorizon::ThreeHours, Some(1.5));
        assert_eq!(derive_three_hour_precipitation(&e), 1.5);
    }

    #[test]
    fn test_derive_falls_back_to_two_hour_when_three_is_zero() {
        let e = entry(at(2024, 3, 21, 12, 0), None)
            .with_precipitation(PrecipitationHorizon::OneHour, Some(0.2))
            .with_precipitation(PrecipitationHorizon::TwoHours, Some(0.9))
            .with_precipitation(PrecipitationHorizon::ThreeHours, Some(0.0));
        assert_eq!(derive_three_hour_precipitation(&e), 0.9);
    }

    #[test]
    fn test_derive_falls_back_to_one_hour() {
        let e = entry(at(2024, 3, 21, 12, 0), None)
            .with_precipitation(PrecipitationHorizon::OneHour, Some(0.2))
            .with_precipitation(PrecipitationHorizon::TwoHours, Some(0.0));
        assert_eq!(derive_three_hour_precipitation(&e), 0.2);
    }

    #[test]
    fn test_derive_defaults_to_zero() {
        let e = entry(at(2024, 3, 21, 12, 0), None);
        assert_eq!(derive_three_hour_precipitation(&e), 0.0);

        let empty_bucket = entry(at(2024, 3, 21, 12, 0), None)
            .with_precipitation(PrecipitationHorizon::ThreeHours, None);
        assert_eq!(derive_three_hour_precipitation(&empty_bucket), 0.0);
    }

    #[test]
    fn test_match_window_edges() {
        let t = at(2024, 3, 21, 12, 0);
        let forecast = vec![entry(t, None)];
        let window = Duration::minutes(5);

        assert!(find_match(t + Duration::minutes(4), &forecast, window).is_some());
        assert!(find_match(t - Duration::minutes(5), &forecast, window).is_some());
        assert!(find_match(t + Duration::minutes(6), &forecast, window).is_none());
    }

    #[test]
    fn test_match_takes_first_satisfying_entry_not_nearest() {
        let t = at(2024, 3, 21, 12, 0);
        let forecast = vec![
            entry(t - Duration::minutes(4), Some(1.0)),
            entry(t, Some(2.0)),
        ];
        let matched = find_match(t, &forecast, Duration::minutes(5)).unwrap();
        assert_eq!(matched.temperature(), Some(1.0));
    }

    #[test]
    fn test_sentinel_records_are_excluded() {
        let forecast = vec![entry(at(2024, 3, 21, 12, 0), Some(0.0))
            .with_precipitation(PrecipitationHorizon::OneHour, Some(0.0))];
        let reference = vec![
            ReferenceRecord::from_values("21.03.2024 12:00", "65535"),
            ReferenceRecord::from_values("21.03.2024 12:00", "n/a"),
        ];

        let report = reconcile(&reference, &forecast, at(2024, 3, 21, 13, 0), &offline_config());
        assert_eq!(report.excluded_records, 2);
        assert_eq!(report.checked_records, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_mismatches_accumulate() {
        let forecast = vec![
            entry(at(2024, 3, 21, 12, 0), Some(0.0))
                .with_precipitation(PrecipitationHorizon::ThreeHours, Some(1.0)),
            entry(at(2024, 3, 21, 15, 0), Some(0.0))
                .with_precipitation(PrecipitationHorizon::ThreeHours, Some(0.5)),
        ];
        let reference = vec![
            ReferenceRecord::from_values("21.03.2024 12:00", "1.5"),
            ReferenceRecord::from_values("21.03.2024 15:00", "4.0"),
        ];

        let report = reconcile(&reference, &forecast, at(2024, 3, 21, 16, 0), &offline_config());
        assert_eq!(report.checked_records, 2);
        assert_eq!(report.matched_records, 2);
        assert_eq!(report.mismatches.len(), 1);
        match &report.mismatches[0] {
            Mismatch::Precipitation {
                reference_date,
                derived_mm,
                reference_mm,
                difference_mm,
                ..
            } => {
                assert_eq!(reference_date, "21.03.2024 15:00");
                assert_eq!(*derived_mm, 0.5);
                assert_eq!(*reference_mm, 4.0);
                assert_eq!(*difference_mm, 3.5);
            }
            other => panic!("Expected precipitation mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_margin_is_inclusive() {
        let forecast = vec![entry(at(2024, 3, 21, 12, 0), None)
            .with_precipitation(PrecipitationHorizon::ThreeHours, Some(2.0))];
        let reference = vec![ReferenceRecord::from_values("21.03.2024 12:00", "1.0")];

        let report = reconcile(&reference, &forecast, at(2024, 3, 21, 13, 0), &offline_config());
        assert_eq!(report.matched_records, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_malformed_dates_are_skipped() {
        let reference = vec![
            ReferenceRecord::from_values("yesterday", "0.5"),
            ReferenceRecord::from_values("21.03.2024 12:00", "0.5"),
        ];
        let report = reconcile(&reference, &[], at(2024, 3, 21, 13, 0), &offline_config());
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.checked_records, 1);
        assert_eq!(report.matched_records, 0);
    }

    #[test]
    fn test_recent_window_filters_old_and_future_records() {
        let reference = vec![
            ReferenceRecord::from_values("19.03.2024 12:00", "0.5"),
            ReferenceRecord::from_values("21.03.2024 09:00", "0.5"),
            ReferenceRecord::from_values("22.03.2024 09:00", "0.5"),
        ];
        let config = ReconcileConfig::default();
        let report = reconcile(&reference, &[], at(2024, 3, 21, 13, 0), &config);
        assert_eq!(report.outside_window_records, 2);
        assert_eq!(report.checked_records, 1);
    }

    #[test]
    fn test_temperature_plausibility() {
        let bands = SeasonalBands::default();

        // July is month index 6
        let hot_july = entry(at(2024, 7, 10, 12, 0), Some(32.0));
        assert!(check_temperature(&hot_july, &bands).is_some());

        // January is month index 0
        let cold_january = entry(at(2024, 1, 10, 12, 0), Some(-10.0));
        assert!(check_temperature(&cold_january, &bands).is_none());

        let mild_october = entry(at(2024, 10, 10, 12, 0), Some(21.0));
        match check_temperature(&mild_october, &bands) {
            Some(Mismatch::Temperature { month0, season, .. }) => {
                assert_eq!(month0, 9);
                assert_eq!(season, Season::Shoulder);
            }
            other => panic!("Expected temperature mismatch, got {:?}", other),
        }

        let no_reading = entry(at(2024, 7, 10, 12, 0), None);
        assert!(check_temperature(&no_reading, &bands).is_none());
    }

    #[test]
    fn test_every_entry_is_temperature_checked() {
        let forecast = vec![
            entry(at(2024, 7, 10, 12, 0), Some(32.0)),
            entry(at(2024, 7, 10, 13, 0), Some(15.0)),
            entry(at(2024, 7, 10, 14, 0), Some(-6.0)),
        ];
        let report = reconcile(&[], &forecast, at(2024, 7, 10, 12, 0), &offline_config());
        assert_eq!(report.checked_entries, 3);
        assert_eq!(report.temperature_mismatches().count(), 2);
        assert_eq!(report.precipitation_mismatches().count(), 0);
    }
}
