//! Search configuration for the reachability engine.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::{TimeError, default_reference_date, start_time};

/// Configuration parameters shared by every search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum gap between arriving at a cell and boarding there (minutes).
    /// Departures tighter than this are ignored.
    pub min_connection_mins: i64,

    /// Default time horizon when a request does not set one (minutes).
    pub max_elapsed_mins: i64,

    /// Default start hour when a request does not set one.
    pub start_hour: u32,

    /// The day the timetable describes. Start times are built on this date.
    pub reference_date: NaiveDate,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        min_connection_mins: i64,
        max_elapsed_mins: i64,
        start_hour: u32,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            min_connection_mins,
            max_elapsed_mins,
            start_hour,
            reference_date,
        }
    }

    /// Returns the minimum connection time as a Duration.
    pub fn min_connection(&self) -> Duration {
        Duration::minutes(self.min_connection_mins.clamp(0, MAX_MINUTES))
    }

    /// Returns the default horizon as a Duration.
    pub fn max_elapsed(&self) -> Duration {
        Duration::minutes(self.max_elapsed_mins.clamp(0, MAX_MINUTES))
    }

    /// Start time at `hour:00` on the reference date.
    pub fn start_at_hour(&self, hour: u32) -> Result<NaiveDateTime, TimeError> {
        start_time(self.reference_date, hour)
    }

    /// Start time at the default start hour.
    pub fn default_start(&self) -> Result<NaiveDateTime, TimeError> {
        self.start_at_hour(self.start_hour)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_connection_mins: 30,
            max_elapsed_mins: 240, // 4 hours
            start_hour: 9,
            reference_date: default_reference_date(),
        }
    }
}

/// Upper bound on any minute count turned into a Duration.
pub(crate) const MAX_MINUTES: i64 = 10_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.min_connection_mins, 30);
        assert_eq!(config.max_elapsed_mins, 240);
        assert_eq!(config.start_hour, 9);
        assert_eq!(
            config.reference_date,
            NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
        );
    }

    #[test]
    fn duration_methods() {
        let config = SearchConfig::default();

        assert_eq!(config.min_connection(), Duration::minutes(30));
        assert_eq!(config.max_elapsed(), Duration::minutes(240));
    }

    #[test]
    fn negative_minutes_clamp_to_zero() {
        let mut config = SearchConfig::default();
        config.min_connection_mins = -5;
        assert_eq!(config.min_connection(), Duration::zero());
    }

    #[test]
    fn start_times() {
        let config = SearchConfig::default();
        assert_eq!(
            config.default_start().unwrap().to_string(),
            "2024-11-03 09:00:00"
        );
        assert_eq!(
            config.start_at_hour(17).unwrap().to_string(),
            "2024-11-03 17:00:00"
        );
        assert!(config.start_at_hour(24).is_err());
    }

    #[test]
    fn custom_config() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let config = SearchConfig::new(10, 60, 6, date);

        assert_eq!(config.min_connection_mins, 10);
        assert_eq!(config.max_elapsed_mins, 60);
        assert_eq!(config.start_hour, 6);
        assert_eq!(
            config.default_start().unwrap().to_string(),
            "2025-01-01 06:00:00"
        );
    }
}
