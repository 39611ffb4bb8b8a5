//! Defines the `Trend` enum, the classification of recent pressure movement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction the atmospheric pressure has moved over the trailing three-hour window.
///
/// Produced by [`crate::Zambretti::calculate_trend`]. `Unknown` is a regular outcome for
/// ambiguous or extreme pressure regimes, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Pressure dropped by more than 1.6 hPa.
    Falling,
    /// Pressure changed by less than 1.6 hPa either way.
    Steady,
    /// Pressure rose by more than 1.6 hPa.
    Rising,
    /// None of the Zambretti pressure bands gave a conclusive reading.
    Unknown,
}

/// # Examples
///
/// ```
/// use zambretti::Trend;
///
/// assert_eq!(Trend::Falling.to_string(), "falling");
/// ```
impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trend::Falling => "falling",
            Trend::Steady => "steady",
            Trend::Rising => "rising",
            Trend::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
