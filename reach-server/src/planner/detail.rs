//! Per-destination summary derived from a finished search.

use serde::Serialize;

use crate::cost::CostModel;
use crate::domain::{CellId, DistanceVector};
use crate::geo::GeoLookup;

use super::result::ReachabilityResult;

/// What it takes to reach one destination from the search source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DestinationDetail {
    pub cell: CellId,
    pub elapsed_minutes: f64,
    /// Kilometres per mode along the settling path.
    pub distance_km: DistanceVector,
    pub total_distance_km: f64,
    pub straight_line_distance_km: f64,
    pub money_euros: f64,
    pub co2_kg: f64,
}

impl DestinationDetail {
    /// Summarise the settling path to `cell`. `None` if it was not reached.
    pub fn for_destination(
        result: &ReachabilityResult,
        geo: &GeoLookup,
        cost_model: &CostModel,
        cell: &CellId,
    ) -> Option<Self> {
        let arrival = result.arrival(cell)?;
        let cost = cost_model.cost_of(&arrival.distances);

        Some(Self {
            cell: cell.clone(),
            elapsed_minutes: result.elapsed_minutes(cell)?,
            distance_km: arrival.distances,
            total_distance_km: arrival.distances.total_km(),
            straight_line_distance_km: geo.straight_line_km(result.source(), cell),
            money_euros: cost.money_euros,
            co2_kg: cost.co2_kg,
        })
    }
}
