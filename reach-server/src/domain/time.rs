//! Schedule timestamps and elapsed-time helpers.
//!
//! Schedule records carry full `YYYY-MM-DD HH:MM:SS` timestamps on a single
//! reference day. A search starts at a whole hour of that day, and every
//! event is measured as the elapsed time since that start.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Format of `departure_date` values in schedule data.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Error returned when parsing an invalid timestamp or start hour.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The day the bundled timetable describes.
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 3).unwrap_or_default()
}

/// Parse a schedule timestamp in [`TIMESTAMP_FORMAT`].
///
/// # Examples
///
/// ```
/// use reach_server::domain::parse_timestamp;
///
/// let ts = parse_timestamp("2024-11-03 09:45:00").unwrap();
/// assert_eq!(ts.to_string(), "2024-11-03 09:45:00");
///
/// assert!(parse_timestamp("2024-11-03 09:45").is_err());
/// assert!(parse_timestamp("").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(TimeError::new("timestamp is empty"));
    }
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .map_err(|_| TimeError::new("expected YYYY-MM-DD HH:MM:SS"))
}

/// Build a search start time at `hour:00:00` on `date`.
///
/// # Examples
///
/// ```
/// use reach_server::domain::{default_reference_date, start_time};
///
/// let start = start_time(default_reference_date(), 9).unwrap();
/// assert_eq!(start.to_string(), "2024-11-03 09:00:00");
///
/// assert!(start_time(default_reference_date(), 24).is_err());
/// ```
pub fn start_time(date: NaiveDate, hour: u32) -> Result<NaiveDateTime, TimeError> {
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }
    let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(|| TimeError::new("invalid hour"))?;
    Ok(date.and_time(time))
}

/// Elapsed time as fractional minutes.
pub fn as_minutes(elapsed: Duration) -> f64 {
    elapsed.num_seconds() as f64 / 60.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Formatting a parsed timestamp reproduces the input
        #[test]
        fn format_roundtrip(h in 0u32..24, m in 0u32..60, s in 0u32..60) {
            let text = format!("2024-11-03 {h:02}:{m:02}:{s:02}");
            let ts = parse_timestamp(&text).unwrap();
            prop_assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), text);
        }

        /// Start times are always on the hour
        #[test]
        fn start_on_the_hour(hour in 0u32..24) {
            let start = start_time(default_reference_date(), hour).unwrap();
            prop_assert_eq!(start.format("%M:%S").to_string(), "00:00");
        }
    }
}
