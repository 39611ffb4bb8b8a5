//! The Zambretti forecast table, mapping a trend and forecast code to a forecast phrase.
//!
//! Each trend owns a contiguous block of codes: falling 1-9, steady 10-19, rising 20-32.
//! See the [Zambretti forecaster](https://en.wikipedia.org/wiki/Zambretti_Forecaster)
//! for background on where the table comes from.

use crate::types::trend::Trend;

/// Returned by [`crate::Zambretti::forecast`] when the pressure trend is [`Trend::Unknown`].
pub const TREND_UNDETERMINED: &str = "Could not determine the pressure trend from available data";

/// Returned by [`crate::Zambretti::forecast`] when the forecast code falls outside the table.
pub const FORECAST_UNAVAILABLE: &str = "Could not forecast the weather from available data";

const FALLING_FIRST_CODE: i32 = 1;
const FALLING: [&str; 9] = [
    "Settled Fine",
    "Fine Weather",
    "Fine, Becoming Less Settled",
    "Fairly Fine, Showery Later",
    "Showery, Becoming More Unsettled",
    "Unsettled, Rain Later",
    "Rain at Times, Worse Later",
    "Rain at Times, Becoming Very Unsettled",
    "Very Unsettled, Rain",
];

const STEADY_FIRST_CODE: i32 = 10;
const STEADY: [&str; 10] = [
    "Settled Fine",
    "Fine Weather",
    "Fine, Possibly Showers",
    "Fairly Fine, Showers Likely",
    "Showery, Bright Intervals",
    "Changeable, Some Rain",
    "Unsettled, Rain at Times",
    "Rain at Frequent Intervals",
    "Very Unsettled, Rain",
    "Stormy, Much Rain",
];

const RISING_FIRST_CODE: i32 = 20;
const RISING: [&str; 13] = [
    "Settled Fine",
    "Fine Weather",
    "Becoming Fine",
    "Fairly Fine, Improving",
    "Fairly Fine, Possibly Showers Early",
    "Showery Early, Improving",
    "Changeable, Mending",
    "Rather Unsettled, Clearing Later",
    "Unsettled, Probably Improving",
    "Unsettled, Short Fine Intervals",
    "Very Unsettled, Finer at Times",
    "Stormy, Possibly Improving",
    "Stormy, Much Rain",
];

/// Looks up the forecast phrase for a trend and forecast code.
///
/// # Returns
///
/// * `Some(phrase)` if `code` lies within the block owned by `trend`.
/// * `None` if the code is outside that block, or `trend` is [`Trend::Unknown`].
///
/// # Examples
///
/// ```
/// use zambretti::{lookup_phrase, Trend};
///
/// assert_eq!(lookup_phrase(Trend::Rising, 22), Some("Becoming Fine"));
/// // Code 22 belongs to the rising block only.
/// assert_eq!(lookup_phrase(Trend::Falling, 22), None);
/// ```
pub fn lookup_phrase(trend: Trend, code: i32) -> Option<&'static str> {
    let (first_code, phrases): (i32, &'static [&'static str]) = match trend {
        Trend::Falling => (FALLING_FIRST_CODE, &FALLING),
        Trend::Steady => (STEADY_FIRST_CODE, &STEADY),
        Trend::Rising => (RISING_FIRST_CODE, &RISING),
        Trend::Unknown => return None,
    };
    let index = usize::try_from(code.checked_sub(first_code)?).ok()?;
    phrases.get(index).copied()
}
