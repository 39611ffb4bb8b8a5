//! Defines the `WindDirection` enum and the forecast code offset each direction applies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prevailing wind direction, used to nudge the Zambretti forecast code.
///
/// West and East share an offset of 1. That is how the published table reads and
/// it is kept as-is; changing it would shift forecasts for two of the four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindDirection {
    North,
    West,
    East,
    South,
}

impl WindDirection {
    /// The amount added to the forecast code when this wind direction is supplied.
    ///
    /// # Examples
    ///
    /// ```
    /// use zambretti::WindDirection;
    ///
    /// assert_eq!(WindDirection::North.offset(), 0);
    /// assert_eq!(WindDirection::South.offset(), 2);
    /// ```
    pub fn offset(&self) -> i32 {
        match self {
            WindDirection::North => 0,
            WindDirection::West => 1,
            WindDirection::East => 1,
            WindDirection::South => 2,
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindDirection::North => "north",
            WindDirection::West => "west",
            WindDirection::East => "east",
            WindDirection::South => "south",
        };
        write!(f, "{}", name)
    }
}
