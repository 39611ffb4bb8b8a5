//! This module provides the `Zambretti` forecast engine. It classifies the pressure trend
//! over the last three hours and turns trend and sea-level pressure into a forecast phrase.

use crate::forecast::error::ForecastError;
use crate::forecast::lookup_table::{lookup_phrase, FORECAST_UNAVAILABLE, TREND_UNDETERMINED};
use crate::types::into_utc_trait::IntoUtcDateTime;
use crate::types::pressure_series::PressureSeries;
use crate::types::trend::Trend;
use crate::types::wind_direction::WindDirection;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// Width of the trailing window the trend is computed over, in hours.
pub const TREND_WINDOW_HOURS: u32 = 3;

/// Minimum number of readings inside the trend window.
pub const MIN_TREND_READINGS: usize = 6;

/// Change in hPa that separates a steady pressure from a falling or rising one.
const TREND_THRESHOLD: f64 = 1.6;

/// Pressure band (hPa, inclusive) a trend is evaluated within.
#[derive(Debug, Clone, Copy)]
struct PressureBand {
    min: f64,
    max: f64,
}

// Band limits are constants of the published algorithm.
const FALLING_BAND: PressureBand = PressureBand {
    min: 985.0,
    max: 1050.0,
};
const STEADY_BAND: PressureBand = PressureBand {
    min: 960.0,
    max: 1033.0,
};
const RISING_BAND: PressureBand = PressureBand {
    min: 947.0,
    max: 1030.0,
};

/// The Zambretti forecaster.
///
/// The engine holds no state: every call works only on the data passed in, so one
/// instance can be shared between threads and reused freely. The reference time `now`
/// is always supplied by the caller; the engine never reads the system clock.
///
/// # Examples
///
/// ```
/// use zambretti::{PressureSeries, WindDirection, Zambretti, ForecastError};
/// use chrono::{Duration, TimeZone, Utc};
///
/// # fn main() -> Result<(), ForecastError> {
/// let now = Utc.with_ymd_and_hms(2024, 11, 19, 12, 0, 0).unwrap();
/// let series = PressureSeries::from_points(
///     [1050.0, 1040.0, 1030.0, 1020.0, 1010.0, 1000.0]
///         .into_iter()
///         .enumerate()
///         .map(|(i, p)| (now - Duration::minutes(170 - 30 * i as i64), p)),
/// );
///
/// let forecast = Zambretti::new()
///     .forecast()
///     .elevation(90.0)
///     .temperature(25.0)
///     .series(&series)
///     .now(now)
///     .wind_direction(WindDirection::North)
///     .call()?;
///
/// assert_eq!(forecast, "Showery, Becoming More Unsettled");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Zambretti;

#[bon]
impl Zambretti {
    pub fn new() -> Self {
        Self
    }

    /// Classifies the pressure trend over the three hours before `now`.
    ///
    /// Readings older than the window are discarded and the rest sorted by time. The
    /// edge difference (see [`PressureSeries::difference_of_edges`]) is then taken within
    /// three overlapping pressure bands and checked in a fixed order, first match wins:
    ///
    /// 1. falling band (985-1050 hPa) dropped more than 1.6 hPa: [`Trend::Falling`]
    /// 2. rising band (947-1030 hPa) rose more than 1.6 hPa: [`Trend::Rising`]
    /// 3. steady band (960-1033 hPa) moved less than 1.6 hPa: [`Trend::Steady`]
    /// 4. otherwise [`Trend::Unknown`]
    ///
    /// A band is only filtered once the steps before it failed to match, so a falling
    /// match never looks at the rising band.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientData`] if fewer than six readings fall inside
    /// the window, or if a band that gets checked holds fewer than three of them.
    pub fn calculate_trend(
        &self,
        series: &PressureSeries,
        now: impl IntoUtcDateTime,
    ) -> Result<Trend, ForecastError> {
        let recent = series.truncate_to_last_hours(TREND_WINDOW_HOURS, now);
        if recent.len() < MIN_TREND_READINGS {
            return Err(ForecastError::InsufficientData {
                required: MIN_TREND_READINGS,
                found: recent.len(),
            });
        }
        let recent = recent.sorted_by_time();

        // The bands overlap, so the order of these checks decides the outcome.
        let trend = if band_difference(&recent, FALLING_BAND, Trend::Falling)? < -TREND_THRESHOLD
        {
            Trend::Falling
        } else if band_difference(&recent, RISING_BAND, Trend::Rising)? > TREND_THRESHOLD {
            Trend::Rising
        } else {
            let difference = band_difference(&recent, STEADY_BAND, Trend::Steady)?;
            if difference > -TREND_THRESHOLD && difference < TREND_THRESHOLD {
                Trend::Steady
            } else {
                Trend::Unknown
            }
        };

        debug!("Pressure trend over {} readings: {}", recent.len(), trend);
        Ok(trend)
    }

    /// Forecasts the weather for the coming hours from the recent pressure history.
    ///
    /// The series is corrected to sea level first and the trend classified on the
    /// corrected values. The latest corrected pressure then gives a forecast code that
    /// is looked up in the Zambretti table.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.elevation(f64)`: **Required.** Station elevation above sea level, in meters.
    /// * `.temperature(f64)`: **Required.** Ambient temperature at the station, in °C.
    /// * `.series(&PressureSeries)`: **Required.** Raw station pressure readings, in any order.
    /// * `.now(DateTime<Utc>)`: **Required.** The instant the three-hour window ends at.
    /// * `.wind_direction(WindDirection)`: Optional. Shifts the forecast code by the direction's offset.
    ///
    /// # Returns
    ///
    /// The forecast phrase. Two outcomes are not errors but plain phrases: an
    /// undetermined trend gives [`TREND_UNDETERMINED`], and a code outside the table
    /// gives [`FORECAST_UNAVAILABLE`].
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientData`] if fewer than six readings fall within
    /// the three hours before `now`.
    #[builder]
    pub fn forecast(
        &self,
        elevation: f64,
        temperature: f64,
        series: &PressureSeries,
        now: DateTime<Utc>,
        wind_direction: Option<WindDirection>,
    ) -> Result<&'static str, ForecastError> {
        let corrected = series.convert_to_sea_level(elevation, temperature);
        let trend = self.calculate_trend(&corrected, now)?;

        let latest_pressure = corrected
            .latest()
            .map(|observation| observation.pressure)
            // `calculate_trend` has already seen six readings, so this cannot be empty.
            .ok_or_else(|| ForecastError::InsufficientData {
                required: MIN_TREND_READINGS,
                found: corrected.len(),
            })?;

        let Some(code) = Self::forecast_code(trend, latest_pressure, wind_direction) else {
            return Ok(TREND_UNDETERMINED);
        };

        match lookup_phrase(trend, code) {
            Some(phrase) => {
                debug!(
                    "Forecast code {} for {} trend at {} hPa: {}",
                    code, trend, latest_pressure, phrase
                );
                Ok(phrase)
            }
            None => {
                warn!(
                    "Forecast code {} for {} trend at {} hPa is outside the Zambretti table",
                    code, trend, latest_pressure
                );
                Ok(FORECAST_UNAVAILABLE)
            }
        }
    }

    /// Computes the Zambretti forecast code for a trend and sea-level pressure (hPa).
    ///
    /// # Returns
    ///
    /// * `Some(code)` for falling, steady and rising trends, wind offset included.
    /// * `None` for [`Trend::Unknown`], which has no code.
    ///
    /// # Examples
    ///
    /// ```
    /// use zambretti::{Trend, WindDirection, Zambretti};
    ///
    /// assert_eq!(Zambretti::forecast_code(Trend::Rising, 1017.43, None), Some(22));
    /// assert_eq!(
    ///     Zambretti::forecast_code(Trend::Rising, 1017.43, Some(WindDirection::South)),
    ///     Some(24)
    /// );
    /// assert_eq!(Zambretti::forecast_code(Trend::Unknown, 1017.43, None), None);
    /// ```
    pub fn forecast_code(
        trend: Trend,
        latest_pressure: f64,
        wind_direction: Option<WindDirection>,
    ) -> Option<i32> {
        let base = match trend {
            Trend::Falling => 127.0 - 0.12 * latest_pressure,
            Trend::Steady => 144.0 - 0.13 * latest_pressure,
            Trend::Rising => 185.0 - 0.16 * latest_pressure,
            Trend::Unknown => return None,
        };
        let offset = wind_direction.map_or(0, |direction| direction.offset());
        Some(base.floor() as i32 + offset)
    }
}

/// Edge difference of the readings inside `band`.
fn band_difference(
    series: &PressureSeries,
    band: PressureBand,
    trend: Trend,
) -> Result<f64, ForecastError> {
    let in_band = series.filter_by_value_range(band.min, band.max);
    let difference = in_band.difference_of_edges().inspect_err(|e| {
        debug!("{} band {}-{} hPa: {}", trend, band.min, band.max, e);
    })?;
    debug!(
        "{} band {}-{} hPa: {} readings, edge difference {}",
        trend,
        band.min,
        band.max,
        in_band.len(),
        difference
    );
    Ok(difference)
}
