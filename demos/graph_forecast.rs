//! demos/graph_forecast.rs
//!
//! Plots the next days of forecast temperature and precipitation for Hemnes.
//!
//! cargo run --example graph_forecast --features examples

use chrono::{Duration, Utc};
use plotlars::{Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use std::error::Error;
use weatherfetch::{entries_to_dataframe, DateRange, WeatherFetch, HEMNES};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = WeatherFetch::builder().build()?;
    let today = Utc::now().date_naive();
    let range = DateRange::new(today, today + Duration::days(2))?;

    let entries = client.forecast_for_range(HEMNES, range, today).await?;
    let frame = entries_to_dataframe(&entries)?;

    plot_forecast(&frame);
    println!("Plot shown in browser.");
    Ok(())
}

fn plot_forecast(data: &DataFrame) {
    TimeSeriesPlot::builder()
        .data(data)
        .x("time")
        .y("temperature")
        .additional_series(vec!["precipitation"])
        .colors(vec![Rgb(235, 117, 0), Rgb(69, 157, 230)])
        .lines(vec![Line::Solid, Line::Dot])
        .plot_title(Text::from("Hemnes forecast").size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("time (UTC)")
        .y_title("°C / mm")
        .build()
        .plot();
}
