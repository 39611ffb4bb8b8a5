//! Contains `PressureSeries`, the ordered collection of pressure readings the forecast
//! engine works on, together with its time and value filtering operations.

use crate::forecast::error::ForecastError;
use crate::types::into_utc_trait::IntoUtcDateTime;
use crate::types::observation::Observation;
use crate::utils::{mean, round_to_hundredths};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Number of readings averaged at each end of a series by [`PressureSeries::difference_of_edges`].
pub const EDGE_WINDOW: usize = 3;

/// An ordered sequence of pressure [`Observation`]s.
///
/// No ordering is assumed on construction. Every operation returns a new series and
/// leaves the original untouched, so a series can be shared freely between callers.
///
/// Two series are equal when their observations are equal element by element.
///
/// # Examples
///
/// ```
/// use zambretti::PressureSeries;
/// use chrono::{Duration, TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 11, 19, 12, 0, 0).unwrap();
/// let series = PressureSeries::from_points([
///     (now - Duration::minutes(20), 1013.0),
///     (now - Duration::hours(4), 1009.0),
///     (now - Duration::hours(1), 1011.5),
/// ]);
///
/// let recent = series.sorted_by_time().truncate_to_last_hours(3, now);
/// assert_eq!(recent.len(), 2);
/// assert_eq!(recent.latest().map(|o| o.pressure), Some(1013.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureSeries {
    observations: Vec<Observation>,
}

impl PressureSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Builds a series from `(instant, pressure)` pairs.
    pub fn from_points<T, I>(points: I) -> Self
    where
        T: IntoUtcDateTime,
        I: IntoIterator<Item = (T, f64)>,
    {
        points.into_iter().map(Observation::from).collect()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the chronologically last observation, regardless of the series' order.
    ///
    /// When several observations share the latest timestamp, the one appearing last
    /// in the series wins, consistent with the stable ordering of [`Self::sorted_by_time`].
    pub fn latest(&self) -> Option<&Observation> {
        self.observations
            .iter()
            .max_by_key(|observation| observation.timestamp)
    }

    /// Returns a copy sorted ascending by timestamp. The sort is stable: readings
    /// sharing a timestamp keep their relative order.
    pub fn sorted_by_time(&self) -> PressureSeries {
        let mut observations = self.observations.clone();
        observations.sort_by_key(|observation| observation.timestamp);
        PressureSeries::new(observations)
    }

    /// Keeps only the observations taken within the last `hours` hours before `now`.
    ///
    /// The lower bound is inclusive: a reading exactly `hours` old is retained.
    /// Readings after `now` are kept as well; only the lower bound is applied.
    ///
    /// # Arguments
    ///
    /// * `hours` - Width of the trailing window. The Zambretti algorithm uses 3.
    /// * `now` - The reference instant the window ends at.
    pub fn truncate_to_last_hours(&self, hours: u32, now: impl IntoUtcDateTime) -> PressureSeries {
        let now = now.into_utc();
        let Some(cutoff) = Duration::try_hours(i64::from(hours))
            .and_then(|window| now.checked_sub_signed(window))
        else {
            // The window reaches past the earliest representable instant.
            return self.clone();
        };

        self.observations
            .iter()
            .filter(|observation| observation.timestamp >= cutoff)
            .copied()
            .collect()
    }

    /// Keeps the observations whose pressure lies within `[min, max]` (inclusive),
    /// preserving their order.
    pub fn filter_by_value_range(&self, min: f64, max: f64) -> PressureSeries {
        self.observations
            .iter()
            .filter(|observation| (min..=max).contains(&observation.pressure))
            .copied()
            .collect()
    }

    /// Corrects every reading to its equivalent sea-level pressure.
    ///
    /// Uses the barometric formula from the Zambretti algorithm,
    /// `p0 = p * (1 - 0.0065h / (T + 0.0065h + 273.15)) ^ -5.257`, rounded to two
    /// decimals. Timestamps are left unchanged.
    ///
    /// # Arguments
    ///
    /// * `elevation` - Station elevation above sea level in meters.
    /// * `temperature` - Ambient temperature at the station in degrees Celsius.
    pub fn convert_to_sea_level(&self, elevation: f64, temperature: f64) -> PressureSeries {
        let lapse = 0.0065 * elevation;
        let factor = (1.0 - lapse / (temperature + lapse + 273.15)).powf(-5.257);

        self.observations
            .iter()
            .map(|observation| {
                observation.with_pressure(round_to_hundredths(observation.pressure * factor))
            })
            .collect()
    }

    /// Difference between the mean of the last three and the mean of the first three
    /// readings, rounded to two decimals.
    ///
    /// Averaging the edges dampens momentary spikes that a plain last-minus-first
    /// difference would pick up. The series is taken in its current order, so sort it
    /// with [`Self::sorted_by_time`] first.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientData`] when the series holds fewer than three readings.
    pub fn difference_of_edges(&self) -> Result<f64, ForecastError> {
        let found = self.observations.len();
        if found < EDGE_WINDOW {
            return Err(ForecastError::InsufficientData {
                required: EDGE_WINDOW,
                found,
            });
        }

        let pressures: Vec<f64> = self.observations.iter().map(|o| o.pressure).collect();
        let initial = mean(&pressures[..EDGE_WINDOW]);
        let last = mean(&pressures[found - EDGE_WINDOW..]);
        Ok(round_to_hundredths(last - initial))
    }
}

impl FromIterator<Observation> for PressureSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        PressureSeries::new(iter.into_iter().collect())
    }
}

impl From<Vec<Observation>> for PressureSeries {
    fn from(observations: Vec<Observation>) -> Self {
        PressureSeries::new(observations)
    }
}

impl IntoIterator for PressureSeries {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.into_iter()
    }
}

impl<'a> IntoIterator for &'a PressureSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 19, 12, 0, 0).unwrap()
    }

    fn pressures(series: &PressureSeries) -> Vec<f64> {
        series.observations().iter().map(|o| o.pressure).collect()
    }

    #[test]
    fn test_sorted_by_time_orders_ascending_and_keeps_original() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1003.0),
            (now - Duration::hours(2), 1001.0),
            (now - Duration::hours(1), 1002.0),
        ]);

        let sorted = series.sorted_by_time();

        assert_eq!(pressures(&sorted), vec![1001.0, 1002.0, 1003.0]);
        assert_eq!(pressures(&series), vec![1003.0, 1001.0, 1002.0]);
    }

    #[test]
    fn test_sorted_by_time_is_stable_and_idempotent() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1010.0),
            (now - Duration::hours(1), 1001.0),
            (now, 1011.0),
            (now - Duration::hours(1), 1002.0),
        ]);

        let once = series.sorted_by_time();
        assert_eq!(pressures(&once), vec![1001.0, 1002.0, 1010.0, 1011.0]);
        assert_eq!(once.sorted_by_time(), once);
    }

    #[test]
    fn test_truncate_keeps_readings_within_window() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1023.0),
            (now - Duration::minutes(20), 1023.0),
            (now - Duration::minutes(79), 1023.0),
            (now - Duration::minutes(132), 1023.0),
            (now - Duration::minutes(179), 1023.0),
        ]);

        assert_eq!(series.truncate_to_last_hours(3, now), series);
    }

    #[test]
    fn test_truncate_drops_readings_older_than_window() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1023.0),
            (now - Duration::minutes(20), 1023.0),
            (now - Duration::minutes(179), 1023.0),
            (now - Duration::hours(3) - Duration::seconds(1), 1019.0),
            (now - Duration::minutes(372), 1018.0),
        ]);

        let expected = PressureSeries::from_points([
            (now, 1023.0),
            (now - Duration::minutes(20), 1023.0),
            (now - Duration::minutes(179), 1023.0),
        ]);
        assert_eq!(series.truncate_to_last_hours(3, now), expected);
    }

    #[test]
    fn test_truncate_boundary_is_inclusive() {
        let now = now();
        let boundary = now - Duration::hours(3);
        let series = PressureSeries::from_points([
            (boundary, 1020.0),
            (boundary - Duration::milliseconds(1), 1019.0),
        ]);

        let truncated = series.truncate_to_last_hours(3, now);
        assert_eq!(pressures(&truncated), vec![1020.0]);
    }

    #[test]
    fn test_filter_by_value_range_is_inclusive() {
        let now = now();
        let series = PressureSeries::from_points([
            (now - Duration::minutes(20), 1000.0),
            (now - Duration::minutes(79), 1010.0),
            (now - Duration::minutes(132), 1020.0),
            (now - Duration::minutes(179), 1030.0),
            (now - Duration::minutes(179), 1040.0),
            (now - Duration::minutes(179), 1050.0),
        ]);

        let filtered = series.filter_by_value_range(1001.0, 1030.0);
        assert_eq!(pressures(&filtered), vec![1010.0, 1020.0, 1030.0]);
    }

    #[test]
    fn test_filter_by_value_range_widening_never_removes() {
        let now = now();
        let series = PressureSeries::from_points(
            (0..20).map(|i| (now - Duration::minutes(i * 5), 980.0 + f64::from(i as u32) * 3.0)),
        );

        let narrow = series.filter_by_value_range(990.0, 1010.0);
        let wide = series.filter_by_value_range(985.0, 1020.0);
        for observation in narrow.observations() {
            assert!(wide.observations().contains(observation));
        }
        assert!(wide.len() >= narrow.len());
    }

    #[test]
    fn test_convert_to_sea_level() {
        let series = PressureSeries::from_points([(now() - Duration::minutes(20), 1000.0)]);

        let corrected = series.convert_to_sea_level(100.0, 10.0);
        assert_eq!(corrected.observations()[0].pressure, 1012.13);
        assert_eq!(corrected.observations()[0].timestamp, series.observations()[0].timestamp);
    }

    #[test]
    fn test_convert_to_sea_level_at_zero_elevation_is_identity() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1013.25),
            (now - Duration::hours(1), 987.4),
            (now - Duration::hours(2), 1041.07),
        ]);

        for temperature in [-40.0, 0.0, 15.0, 35.0] {
            assert_eq!(series.convert_to_sea_level(0.0, temperature), series);
        }
    }

    #[test]
    fn test_difference_of_edges_falling() -> Result<(), ForecastError> {
        let now = now();
        let series = PressureSeries::from_points([
            (now - Duration::minutes(179), 1054.0),
            (now - Duration::minutes(169), 1053.0),
            (now - Duration::minutes(159), 1052.0),
            (now - Duration::minutes(132), 1040.0),
            (now - Duration::minutes(79), 1039.0),
            (now - Duration::minutes(20), 1038.0),
        ]);

        assert_eq!(series.difference_of_edges()?, -14.0);
        Ok(())
    }

    #[test]
    fn test_difference_of_edges_rising() -> Result<(), ForecastError> {
        let now = now();
        let series = PressureSeries::from_points([
            (now - Duration::minutes(179), 1044.0),
            (now - Duration::minutes(169), 1045.0),
            (now - Duration::minutes(159), 1046.0),
            (now - Duration::minutes(132), 1050.0),
            (now - Duration::minutes(79), 1051.0),
            (now - Duration::minutes(20), 1052.0),
        ]);

        assert_eq!(series.difference_of_edges()?, 6.0);
        Ok(())
    }

    #[test]
    fn test_difference_of_edges_rounds_to_hundredths() -> Result<(), ForecastError> {
        let now = now();
        let series = PressureSeries::from_points([
            (now - Duration::minutes(30), 1006.0),
            (now - Duration::minutes(25), 1005.0),
            (now - Duration::minutes(20), 1004.9),
            (now - Duration::minutes(15), 1000.8),
            (now - Duration::minutes(10), 1000.5),
            (now - Duration::minutes(5), 1000.0),
        ]);

        assert!((series.difference_of_edges()? - -4.87).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_difference_of_edges_with_three_readings_is_zero() -> Result<(), ForecastError> {
        let series = PressureSeries::from_points([
            (now() - Duration::minutes(3), 1001.0),
            (now() - Duration::minutes(2), 1004.0),
            (now() - Duration::minutes(1), 1009.0),
        ]);

        assert_eq!(series.difference_of_edges()?, 0.0);
        Ok(())
    }

    #[test]
    fn test_difference_of_edges_requires_three_readings() {
        let series = PressureSeries::from_points([
            (now() - Duration::minutes(2), 1001.0),
            (now() - Duration::minutes(1), 1002.0),
        ]);

        assert_eq!(
            series.difference_of_edges(),
            Err(ForecastError::InsufficientData {
                required: 3,
                found: 2
            })
        );
        assert!(PressureSeries::default().difference_of_edges().is_err());
    }

    #[test]
    fn test_latest_ignores_series_order() {
        let now = now();
        let series = PressureSeries::from_points([
            (now, 1012.0),
            (now - Duration::hours(2), 1009.0),
        ]);

        assert_eq!(series.latest().map(|o| o.pressure), Some(1012.0));
        assert!(PressureSeries::default().latest().is_none());
    }
}
