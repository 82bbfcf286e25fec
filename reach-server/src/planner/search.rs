//! Earliest-arrival reachability search.
//!
//! A label-setting search over the schedule, ordered by elapsed time from
//! the start. A priority queue with lazy deletion holds candidate labels;
//! the first label popped for a cell settles it and later ones are
//! discarded. Each label also carries the per-mode distance of its path so
//! money and CO2 budgets can be enforced while expanding.
//!
//! Expansion from a settled cell considers every visit departing from that
//! cell at least `min_connection` after arrival. For each such visit, every
//! other visit of the same trip that departs later than the current label is
//! an onward candidate, regardless of where it sits in the trip's input
//! order. Only the departure time decides direction of travel.
//!
//! Settling is on time alone. A cell reached first by a faster but costlier
//! path keeps that path's distances, even if a slower, cheaper path would
//! have left more budget for onward legs.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, trace};

use crate::cost::CostModel;
use crate::domain::{CellId, DistanceVector};
use crate::geo::GeoLookup;
use crate::schedule::ScheduleIndex;

use super::budget::Budgets;
use super::config::SearchConfig;
use super::result::{Arrival, ReachabilityResult, SearchStats};

/// Error from building a search request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// Request for a reachability search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Where the traveller starts.
    pub source: CellId,

    /// Absolute start time; elapsed times are measured from here.
    pub start: NaiveDateTime,

    /// Limits applied to every path.
    pub budgets: Budgets,
}

impl SearchRequest {
    /// Create a new search request, rejecting negative or NaN budgets.
    pub fn new(
        source: CellId,
        start: NaiveDateTime,
        budgets: Budgets,
    ) -> Result<Self, SearchError> {
        let request = Self {
            source,
            start,
            budgets,
        };
        request.validate()?;
        Ok(request)
    }

    /// Create a request starting at `hour:00` on the configured reference
    /// date.
    pub fn at_hour(
        source: CellId,
        hour: u32,
        budgets: Budgets,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        let start = config
            .start_at_hour(hour)
            .map_err(|e| SearchError::InvalidRequest(e.to_string()))?;
        Self::new(source, start, budgets)
    }

    /// Validate the search request.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.budgets
            .validate()
            .map_err(|reason| SearchError::InvalidRequest(reason.to_string()))
    }
}

/// A candidate arrival waiting in the queue.
#[derive(Debug, Clone)]
struct Label {
    elapsed: Duration,

    /// Push order, used to break ties between equal elapsed times.
    seq: u64,

    cell: CellId,
    distances: DistanceVector,
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.elapsed
            .cmp(&other.elapsed)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Mutable state of one search run.
struct Frontier {
    queue: BinaryHeap<Reverse<Label>>,
    settled: HashMap<CellId, Arrival>,
    next_seq: u64,
    stats: SearchStats,
}

impl Frontier {
    fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            settled: HashMap::new(),
            next_seq: 0,
            stats: SearchStats::default(),
        }
    }

    fn push(&mut self, cell: CellId, elapsed: Duration, distances: DistanceVector) {
        self.queue.push(Reverse(Label {
            elapsed,
            seq: self.next_seq,
            cell,
            distances,
        }));
        self.next_seq += 1;
        self.stats.pushed += 1;
    }

    /// Pop the next label that is not stale, settling its cell.
    fn settle_next(&mut self) -> Option<Label> {
        while let Some(Reverse(label)) = self.queue.pop() {
            let stale = self
                .settled
                .get(&label.cell)
                .is_some_and(|a| a.elapsed <= label.elapsed);
            if stale {
                self.stats.stale_pops += 1;
                continue;
            }

            self.settled.insert(
                label.cell.clone(),
                Arrival {
                    elapsed: label.elapsed,
                    distances: label.distances,
                },
            );
            self.stats.settled += 1;
            return Some(label);
        }
        None
    }

    /// True if `elapsed` beats whatever is recorded for `cell`.
    fn improves(&self, cell: &CellId, elapsed: Duration) -> bool {
        self.settled
            .get(cell)
            .is_none_or(|a| elapsed < a.elapsed)
    }
}

/// Reachability planner over one loaded dataset.
///
/// Holds only shared references, so a single planner can answer any number
/// of independent requests.
pub struct Planner<'a> {
    index: &'a ScheduleIndex,
    geo: &'a GeoLookup,
    cost: &'a CostModel,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(
        index: &'a ScheduleIndex,
        geo: &'a GeoLookup,
        cost: &'a CostModel,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            index,
            geo,
            cost,
            config,
        }
    }

    /// Compute the earliest elapsed arrival at every known cell.
    ///
    /// Never fails: an unknown source simply reaches nothing but itself.
    pub fn search(&self, request: &SearchRequest) -> ReachabilityResult {
        let mut frontier = Frontier::new();
        frontier.push(request.source.clone(), Duration::zero(), DistanceVector::zero());

        while let Some(label) = frontier.settle_next() {
            trace!(
                cell = %label.cell,
                elapsed_mins = label.elapsed.num_minutes(),
                "Settled cell"
            );
            self.expand(&label, request, &mut frontier);
        }

        let mut known: HashSet<CellId> = self.index.cells().cloned().collect();
        known.insert(request.source.clone());

        let stats = frontier.stats;
        debug!(
            source = %request.source,
            start = %request.start,
            settled = stats.settled,
            pushed = stats.pushed,
            stale_pops = stats.stale_pops,
            pruned_buffer = stats.pruned_buffer,
            pruned_mode = stats.pruned_mode,
            pruned_budget = stats.pruned_budget,
            pruned_time = stats.pruned_time,
            "Reachability search complete"
        );

        ReachabilityResult::new(
            request.source.clone(),
            request.start,
            known,
            frontier.settled,
            stats,
        )
    }

    /// Push every improving onward label reachable from `label`.
    fn expand(&self, label: &Label, request: &SearchRequest, frontier: &mut Frontier) {
        let budgets = &request.budgets;
        let max_elapsed = budgets.max_elapsed();
        let earliest_boarding = label.elapsed + self.config.min_connection();

        for departure in self.index.departures_from(&label.cell) {
            if departure.elapsed_since(request.start) < earliest_boarding {
                frontier.stats.pruned_buffer += 1;
                continue;
            }

            for onward in self.index.stops_of(&departure.trip) {
                if std::ptr::eq(onward, departure) {
                    continue;
                }

                if !budgets.allowed_modes.contains(onward.mode) {
                    frontier.stats.pruned_mode += 1;
                    continue;
                }

                let leg_km = self.geo.distance_km(&label.cell, &onward.cell);
                let distances = label.distances.add_leg(onward.mode, leg_km);
                let cost = self.cost.cost_of(&distances);
                if cost.money_euros > budgets.max_money_euros || cost.co2_kg > budgets.max_co2_kg
                {
                    frontier.stats.pruned_budget += 1;
                    continue;
                }

                let elapsed = onward.elapsed_since(request.start);
                if elapsed <= label.elapsed || elapsed > max_elapsed {
                    frontier.stats.pruned_time += 1;
                    continue;
                }

                if frontier.improves(&onward.cell, elapsed) {
                    frontier.push(onward.cell.clone(), elapsed, distances);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
