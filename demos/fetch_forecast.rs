//! demos/fetch_forecast.rs
//!
//! Fetches the forecast for a location and prints the entries of the selected days.
//!
//! cargo run --example fetch_forecast -- --location "66.2167, 13.6167" --days 2

use argh::FromArgs;
use chrono::{Duration, Utc};
use std::error::Error;
use weatherfetch::{entries_to_dataframe, DateRange, LatLon, WeatherFetch, HEMNES};

#[derive(FromArgs)]
/// Print the forecast for a location
struct Args {
    /// coordinates as "lat, lon" (default: Hemnes, Norway)
    #[argh(option, short = 'l')]
    location: Option<String>,

    /// number of days starting today, at most 8
    #[argh(option, short = 'd', default = "1")]
    days: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();
    let location = match &args.location {
        Some(raw) => LatLon::parse(raw).ok_or_else(|| format!("Invalid coordinates '{}'", raw))?,
        None => HEMNES,
    };

    let client = WeatherFetch::builder().build()?;
    let today = Utc::now().date_naive();
    let range = DateRange::new(today, today + Duration::days(args.days.max(1) - 1))?;

    let entries = client.forecast_for_range(location, range, today).await?;
    println!("Forecast for {} ({} entries):", location, entries.len());
    println!("{}", entries_to_dataframe(&entries)?);

    Ok(())
}
