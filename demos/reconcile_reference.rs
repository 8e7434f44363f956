//! demos/reconcile_reference.rs
//!
//! Checks the current Hemnes forecast against a reference observation file.
//!
//! cargo run --example reconcile_reference -- data/hemnes.csv --all

use argh::FromArgs;
use std::error::Error;
use std::path::PathBuf;
use weatherfetch::{ReconcileConfig, WeatherFetch};

#[derive(FromArgs)]
/// Reconcile the forecast with reference observations
struct Args {
    /// semicolon separated reference file
    #[argh(positional)]
    reference: PathBuf,

    /// compare every record instead of only the last 24 hours
    #[argh(switch)]
    all: bool,

    /// accepted precipitation difference in mm
    #[argh(option, default = "1.0")]
    margin: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let args: Args = argh::from_env();

    let config = ReconcileConfig::builder()
        .recent_only(!args.all)
        .precipitation_margin_mm(args.margin)
        .build();

    let client = WeatherFetch::builder().build()?;
    let report = client.reconcile_reference(&args.reference, &config).await?;
    println!("{}", report);

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
