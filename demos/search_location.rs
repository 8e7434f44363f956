//! demos/search_location.rs
//!
//! Looks up places by name and checks whether forecasts exist for the first hit.
//!
//! cargo run --example search_location -- Hemnes

use argh::FromArgs;
use std::error::Error;
use weatherfetch::WeatherFetch;

#[derive(FromArgs)]
/// Search a location by name
struct Args {
    /// place name, at least two characters
    #[argh(positional)]
    query: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args: Args = argh::from_env();

    let client = WeatherFetch::builder().build()?;
    let results = client.search_location(&args.query).await?;
    if results.is_empty() {
        println!("No places found for '{}'", args.query);
        return Ok(());
    }

    for place in &results {
        println!("{:>12}  {} ({}) at {}", place.id, place.name, place.country, place.coordinates);
    }

    let first = &results[0];
    let available = client.check_availability(first.coordinates).await;
    println!(
        "Forecast for {}: {}",
        first.name,
        if available { "available" } else { "unavailable" }
    );
    Ok(())
}
