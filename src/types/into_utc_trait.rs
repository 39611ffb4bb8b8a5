use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Converts the common chrono instant types into a `DateTime<Utc>`.
///
/// Naive datetimes are interpreted as UTC, which matches how sensor exports
/// (e.g. Home Assistant history files) record their timestamps.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

/// Any zoned instant, including `Local`, `Utc` and `FixedOffset`.
impl<Tz: TimeZone> IntoUtcDateTime for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}
