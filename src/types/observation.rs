//! Defines the `Observation` type, a single timestamped barometric pressure reading.

use crate::types::into_utc_trait::IntoUtcDateTime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single pressure reading taken at a point in time.
///
/// The pressure unit is not enforced, but every reading in a series must use the
/// same one. The Zambretti constants in this crate assume hectopascals (hPa).
///
/// # Examples
///
/// ```
/// use zambretti::Observation;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 11, 19, 11, 33, 32).unwrap();
/// let reading = Observation::new(at, 988.6);
/// assert_eq!(reading.pressure, 988.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The instant the reading was taken.
    pub timestamp: DateTime<Utc>,
    /// The measured pressure, in hPa.
    pub pressure: f64,
}

impl Observation {
    /// Creates an observation from any chrono instant accepted by [`IntoUtcDateTime`].
    pub fn new(timestamp: impl IntoUtcDateTime, pressure: f64) -> Self {
        Self {
            timestamp: timestamp.into_utc(),
            pressure,
        }
    }

    /// Returns a copy of this observation carrying a different pressure value.
    pub(crate) fn with_pressure(self, pressure: f64) -> Self {
        Self { pressure, ..self }
    }
}

impl<T: IntoUtcDateTime> From<(T, f64)> for Observation {
    fn from((timestamp, pressure): (T, f64)) -> Self {
        Observation::new(timestamp, pressure)
    }
}
