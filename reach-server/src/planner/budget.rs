//! Per-query resource limits.

use chrono::Duration;

use crate::domain::{ModeSet, TransportMode};

use super::config::{MAX_MINUTES, SearchConfig};

/// Time, money and emission limits plus the allowed modes for one search.
///
/// A label whose elapsed time, cumulative money or cumulative CO2 exceeds
/// its limit is pruned. Limits are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budgets {
    pub max_elapsed_mins: i64,
    pub max_money_euros: f64,
    pub max_co2_kg: f64,
    pub allowed_modes: ModeSet,
}

impl Budgets {
    /// No limits at all beyond the engine's hard horizon.
    pub fn unlimited() -> Self {
        Self {
            max_elapsed_mins: MAX_MINUTES,
            max_money_euros: f64::INFINITY,
            max_co2_kg: f64::INFINITY,
            allowed_modes: ModeSet::all(),
        }
    }

    /// The configured default horizon, no money or CO2 limit, every mode.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::unlimited().with_max_elapsed_mins(config.max_elapsed_mins)
    }

    pub fn with_max_elapsed_mins(mut self, mins: i64) -> Self {
        self.max_elapsed_mins = mins;
        self
    }

    pub fn with_max_money(mut self, euros: f64) -> Self {
        self.max_money_euros = euros;
        self
    }

    pub fn with_max_co2(mut self, kg: f64) -> Self {
        self.max_co2_kg = kg;
        self
    }

    pub fn with_modes(mut self, modes: ModeSet) -> Self {
        self.allowed_modes = modes;
        self
    }

    pub fn without_mode(mut self, mode: TransportMode) -> Self {
        self.allowed_modes.remove(mode);
        self
    }

    /// The horizon as a Duration.
    pub fn max_elapsed(&self) -> Duration {
        Duration::minutes(self.max_elapsed_mins.clamp(0, MAX_MINUTES))
    }

    /// Check the limits are usable, returning a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_elapsed_mins < 0 {
            return Err("time budget must not be negative");
        }
        if self.max_money_euros.is_nan() || self.max_money_euros < 0.0 {
            return Err("money budget must be a non-negative number");
        }
        if self.max_co2_kg.is_nan() || self.max_co2_kg < 0.0 {
            return Err("CO2 budget must be a non-negative number");
        }
        Ok(())
    }
}

impl Default for Budgets {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
