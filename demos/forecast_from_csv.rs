//! Forecasts from a Home Assistant pressure sensor history export.
//!
//! Usage: `cargo run --example forecast_from_csv -- history.csv <elevation_m> <temperature_c>`

use chrono::Utc;
use std::env;
use zambretti::{SeriesLoader, Zambretti, ZambrettiError};

#[tokio::main]
async fn main() -> Result<(), ZambrettiError> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "history.csv".to_string());
    let elevation: f64 = args.next().and_then(|v| v.parse().ok()).unwrap_or(0.0);
    let temperature: f64 = args.next().and_then(|v| v.parse().ok()).unwrap_or(15.0);

    let series = SeriesLoader::home_assistant().load_async(&path).await?;
    println!("Loaded {} readings from {}", series.len(), path);

    let forecast = Zambretti::new()
        .forecast()
        .elevation(elevation)
        .temperature(temperature)
        .series(&series)
        .now(Utc::now())
        .call()?;
    println!("{}", forecast);

    Ok(())
}
