use chrono::{Duration, Utc};
use zambretti::{ForecastError, PressureSeries, WindDirection, Zambretti};

fn main() -> Result<(), ForecastError> {
    let now = Utc::now();
    // Readings from a barometer at 90 m, one every half hour, oldest first.
    let readings = [1012.4, 1011.9, 1011.1, 1010.2, 1009.0, 1007.9];
    let series = PressureSeries::from_points(
        readings
            .into_iter()
            .enumerate()
            .map(|(i, pressure)| (now - Duration::minutes(150 - 30 * i as i64), pressure)),
    );

    let zambretti = Zambretti::new();
    let sea_level = series.convert_to_sea_level(90.0, 18.0);
    println!("Trend: {}", zambretti.calculate_trend(&sea_level, now)?);

    let forecast = zambretti
        .forecast()
        .elevation(90.0)
        .temperature(18.0)
        .series(&series)
        .now(now)
        .wind_direction(WindDirection::South)
        .call()?;
    println!("Forecast: {}", forecast);

    Ok(())
}
