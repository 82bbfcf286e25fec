//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{DestinationDetail, ReachabilityResult};

/// Query for a reachability map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReachabilityQuery {
    /// Starting cell id
    pub source: String,

    /// Whole hour on the reference date (defaults to the configured hour)
    pub start_hour: Option<u32>,

    /// Time budget in minutes (defaults to the configured horizon)
    pub max_minutes: Option<i64>,

    /// Money budget in euros
    pub max_money: Option<f64>,

    /// CO2 budget in kilograms
    pub max_co2: Option<f64>,

    /// Comma-separated allowed modes, e.g. "TRAIN,BUS" (defaults to all)
    pub modes: Option<String>,
}

/// Query for the detail of one destination.
///
/// Carries the same search parameters as [`ReachabilityQuery`] so that the
/// map search it follows can be served from cache.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationQuery {
    pub source: String,
    pub start_hour: Option<u32>,
    pub max_minutes: Option<i64>,
    pub max_money: Option<f64>,
    pub max_co2: Option<f64>,
    pub modes: Option<String>,

    /// Destination cell id
    pub destination: String,
}

impl DestinationQuery {
    /// Split into the search part and the destination.
    pub fn into_parts(self) -> (ReachabilityQuery, String) {
        let search = ReachabilityQuery {
            source: self.source,
            start_hour: self.start_hour,
            max_minutes: self.max_minutes,
            max_money: self.max_money,
            max_co2: self.max_co2,
            modes: self.modes,
        };
        (search, self.destination)
    }
}

/// A reachable cell in a map response.
#[derive(Debug, Serialize)]
pub struct ReachableCell {
    /// Cell id
    pub cell: String,

    /// Earliest arrival, minutes after the start
    pub elapsed_minutes: f64,
}

/// Response for a reachability map.
#[derive(Debug, Serialize)]
pub struct ReachabilityResponse {
    pub source: String,

    /// Absolute start time
    pub start: String,

    /// Reachable cells, earliest first
    pub reachable: Vec<ReachableCell>,

    /// Known cells that cannot be reached within the budgets
    pub unreachable_count: usize,
}

impl ReachabilityResponse {
    pub fn from_result(result: &ReachabilityResult) -> Self {
        let reachable = result
            .reachable()
            .into_iter()
            .map(|(cell, elapsed)| ReachableCell {
                cell: cell.to_string(),
                elapsed_minutes: crate::domain::as_minutes(elapsed),
            })
            .collect();

        Self {
            source: result.source().to_string(),
            start: result.start().to_string(),
            reachable,
            unreachable_count: result.unreachable_count(),
        }
    }
}

/// Response for a destination detail.
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub source: String,
    pub destination: String,

    /// Whether the destination can be reached within the budgets
    pub reachable: bool,

    /// Time, distance and cost of the settling path (if reachable)
    pub detail: Option<DestinationDetail>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
