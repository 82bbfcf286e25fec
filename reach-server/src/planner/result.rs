//! The outcome of one reachability search.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};

use crate::domain::{CellId, DistanceVector, as_minutes};

/// How a cell was first reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrival {
    /// Time from the search start to the settling visit.
    pub elapsed: Duration,

    /// Distance travelled per mode along the settling path.
    pub distances: DistanceVector,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Labels that settled a cell.
    pub settled: usize,
    /// Labels pushed onto the queue, including the source.
    pub pushed: usize,
    /// Popped labels skipped because their cell was already settled.
    pub stale_pops: usize,
    /// Departures skipped for leaving inside the connection buffer.
    pub pruned_buffer: usize,
    /// Onward stops skipped for using a disallowed mode.
    pub pruned_mode: usize,
    /// Onward stops skipped for exceeding the money or CO2 budget.
    pub pruned_budget: usize,
    /// Onward stops skipped for being in the past or beyond the horizon.
    pub pruned_time: usize,
}

/// Earliest arrival for every known cell, relative to one source and start.
///
/// Every cell that appears in the schedule (plus the source) is known.
/// Known cells that were never settled are unreachable.
#[derive(Debug, Clone)]
pub struct ReachabilityResult {
    source: CellId,
    start: NaiveDateTime,
    known: HashSet<CellId>,
    arrivals: HashMap<CellId, Arrival>,
    stats: SearchStats,
}

impl ReachabilityResult {
    pub(crate) fn new(
        source: CellId,
        start: NaiveDateTime,
        known: HashSet<CellId>,
        arrivals: HashMap<CellId, Arrival>,
        stats: SearchStats,
    ) -> Self {
        Self {
            source,
            start,
            known,
            arrivals,
            stats,
        }
    }

    pub fn source(&self) -> &CellId {
        &self.source
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn arrival(&self, cell: &CellId) -> Option<&Arrival> {
        self.arrivals.get(cell)
    }

    /// Earliest elapsed time to `cell`, or `None` if unreachable or unknown.
    pub fn elapsed(&self, cell: &CellId) -> Option<Duration> {
        self.arrivals.get(cell).map(|a| a.elapsed)
    }

    /// Earliest elapsed time in fractional minutes.
    pub fn elapsed_minutes(&self, cell: &CellId) -> Option<f64> {
        self.elapsed(cell).map(as_minutes)
    }

    /// Distance vector of the path that settled `cell`.
    pub fn distances(&self, cell: &CellId) -> Option<&DistanceVector> {
        self.arrivals.get(cell).map(|a| &a.distances)
    }

    pub fn is_reachable(&self, cell: &CellId) -> bool {
        self.arrivals.contains_key(cell)
    }

    pub fn is_known(&self, cell: &CellId) -> bool {
        self.known.contains(cell)
    }

    /// Reachable cells, earliest first. Ties are ordered by cell id.
    pub fn reachable(&self) -> Vec<(&CellId, Duration)> {
        let mut cells: Vec<_> = self
            .arrivals
            .iter()
            .map(|(cell, arrival)| (cell, arrival.elapsed))
            .collect();
        cells.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        cells
    }

    pub fn reachable_count(&self) -> usize {
        self.arrivals.len()
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    pub fn unreachable_count(&self) -> usize {
        self.known.len().saturating_sub(self.arrivals.len())
    }

    /// Every known cell mapped to its earliest elapsed minutes, or `None`
    /// when unreachable.
    pub fn minutes_map(&self) -> BTreeMap<&CellId, Option<f64>> {
        self.known
            .iter()
            .map(|cell| (cell, self.elapsed_minutes(cell)))
            .collect()
    }
}
