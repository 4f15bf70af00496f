//! Date-time conversion and formatting helpers.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Utc};

/// Conversion helpers for an offset-less wall time.
pub trait DateTimeExt {
    /// The date as a `yyyyMMdd` integer, e.g. `20060102`.
    fn to_date_i32(&self) -> i32;

    /// The `yyyy-MM-dd HH:mm:ss` rendering, which sorts chronologically.
    fn format_sortable(&self) -> String;

    /// Seconds since the Unix epoch, treating the wall time as UTC.
    fn to_unix(&self) -> i64;

    /// Anchors the wall time in the system local time zone.
    ///
    /// `None` when the wall time does not exist in the local zone (a
    /// forward daylight-saving transition).
    fn to_offset(&self) -> Option<DateTime<FixedOffset>>;
}

impl DateTimeExt for NaiveDateTime {
    fn to_date_i32(&self) -> i32 {
        self.year() * 10_000 + self.month() as i32 * 100 + self.day() as i32
    }

    fn format_sortable(&self) -> String {
        self.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn to_unix(&self) -> i64 {
        self.and_utc().timestamp()
    }

    fn to_offset(&self) -> Option<DateTime<FixedOffset>> {
        crate::parse::local_offset(*self)
    }
}

/// Conversion helpers for an offset-carrying instant.
pub trait DateTimeOffsetExt {
    /// Seconds since the Unix epoch.
    fn to_unix(&self) -> i64;

    /// The equivalent UTC wall time.
    fn to_utc_date_time(&self) -> NaiveDateTime;
}

impl DateTimeOffsetExt for DateTime<FixedOffset> {
    fn to_unix(&self) -> i64 {
        self.timestamp()
    }

    fn to_utc_date_time(&self) -> NaiveDateTime {
        self.naive_utc()
    }
}

/// Converts a Unix seconds count to its UTC wall time.
///
/// Negative counts are not convertible; the original epoch helpers only
/// accept forward offsets from the epoch.
pub fn from_unix_seconds(seconds: i64) -> Option<NaiveDateTime> {
    if seconds < 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Converts a fractional Unix seconds count to its UTC wall time.
///
/// Non-finite or negative input is not convertible. Sub-second precision
/// is kept to the millisecond.
pub fn from_unix_seconds_f64(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let whole = seconds.trunc() as i64;
    let millis = (seconds.fract() * 1_000.0).round() as u32;
    DateTime::<Utc>::from_timestamp(whole, millis * 1_000_000).map(|dt| dt.naive_utc())
}

/// Converts a Unix seconds count to a zero-offset instant.
pub fn offset_from_unix_seconds(seconds: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|dt| dt.fixed_offset())
}
