//! demos/history_to_csv.rs
//!
//! Downloads hourly history for a date range and writes it as a semicolon separated CSV.
//!
//! cargo run --example history_to_csv -- --start 2024-03-01 --end 2024-03-07 -o hemnes.csv

use argh::FromArgs;
use chrono::NaiveDate;
use std::error::Error;
use std::path::PathBuf;
use weatherfetch::{write_csv, DateRange, LatLon, WeatherFetch, HEMNES};

#[derive(FromArgs)]
/// Export hourly historical weather to CSV
struct Args {
    /// first day, YYYY-MM-DD
    #[argh(option)]
    start: NaiveDate,

    /// last day, YYYY-MM-DD
    #[argh(option)]
    end: NaiveDate,

    /// coordinates as "lat, lon" (default: Hemnes, Norway)
    #[argh(option, short = 'l')]
    location: Option<String>,

    /// output file
    #[argh(option, short = 'o', default = "PathBuf::from(\"history.csv\")")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args: Args = argh::from_env();

    let location = match &args.location {
        Some(raw) => LatLon::parse(raw).ok_or_else(|| format!("Invalid coordinates '{}'", raw))?,
        None => HEMNES,
    };
    let range = DateRange::new(args.start, args.end)?;

    let client = WeatherFetch::builder().build()?;
    let mut frame = client.history_frame(location, range).await?;
    println!("{}", frame.head(Some(5)));
    write_csv(&mut frame, &args.output)?;

    Ok(())
}
