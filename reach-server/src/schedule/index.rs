//! Trip and cell lookup tables over a set of stop visits.
//!
//! The search needs two questions answered fast: "which visits depart from
//! this cell?" and "where else does this trip call?". Both are answered by
//! index lists into one shared visit table.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{CellId, StopVisit, TripId};

use super::ScheduleRecord;

/// Immutable lookup structure built once per dataset.
///
/// Visits within a trip are kept in input order, which is not guaranteed to
/// be chronological. Callers must compare departure times themselves.
#[derive(Debug, Clone, Default)]
pub struct ScheduleIndex {
    visits: Vec<StopVisit>,

    /// Map from trip -> positions in `visits`.
    trip_stops: HashMap<TripId, Vec<usize>>,

    /// Map from cell -> positions in `visits` of every visit at that cell.
    cell_departures: HashMap<CellId, Vec<usize>>,

    /// Number of input records rejected as malformed.
    skipped: usize,
}

impl ScheduleIndex {
    /// Build the index from raw records, skipping malformed ones.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScheduleRecord>,
    {
        let mut visits = Vec::new();
        let mut skipped = 0;

        for (row, record) in records.into_iter().enumerate() {
            match record.to_visit() {
                Ok(visit) => visits.push(visit),
                Err(e) => {
                    skipped += 1;
                    debug!(row, error = %e, "Skipping malformed schedule record");
                }
            }
        }

        let mut index = Self::from_visits(visits);
        index.skipped = skipped;

        debug!(
            visits = index.visit_count(),
            trips = index.trip_count(),
            cells = index.cell_count(),
            skipped,
            "Schedule index built"
        );

        index
    }

    /// Build the index from already validated visits.
    pub fn from_visits(visits: Vec<StopVisit>) -> Self {
        let mut trip_stops: HashMap<TripId, Vec<usize>> = HashMap::new();
        let mut cell_departures: HashMap<CellId, Vec<usize>> = HashMap::new();

        for (idx, visit) in visits.iter().enumerate() {
            trip_stops.entry(visit.trip.clone()).or_default().push(idx);
            cell_departures
                .entry(visit.cell.clone())
                .or_default()
                .push(idx);
        }

        Self {
            visits,
            trip_stops,
            cell_departures,
            skipped: 0,
        }
    }

    /// Visits departing from `cell`. Empty for unknown cells.
    pub fn departures_from<'a>(
        &'a self,
        cell: &CellId,
    ) -> impl Iterator<Item = &'a StopVisit> + use<'a> {
        self.lookup(self.cell_departures.get(cell))
    }

    /// Every visit of `trip`, in arbitrary order. Empty for unknown trips.
    pub fn stops_of<'a>(
        &'a self,
        trip: &TripId,
    ) -> impl Iterator<Item = &'a StopVisit> + use<'a> {
        self.lookup(self.trip_stops.get(trip))
    }

    fn lookup<'a>(
        &'a self,
        positions: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a StopVisit> + use<'a> {
        positions
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.visits[idx])
    }

    /// True if any visit takes place at `cell`.
    pub fn contains_cell(&self, cell: &CellId) -> bool {
        self.cell_departures.contains_key(cell)
    }

    /// Every cell with at least one visit.
    pub fn cells(&self) -> impl Iterator<Item = &CellId> {
        self.cell_departures.keys()
    }

    pub fn cell_count(&self) -> usize {
        self.cell_departures.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trip_stops.len()
    }

    pub fn visit_count(&self) -> usize {
        self.visits.len()
    }

    /// Number of records dropped as malformed during [`ScheduleIndex::build`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = ScheduleRecord> {
        (
            prop::option::of("[A-F]"),
            prop::option::of(prop_oneof![
                (0u32..24, 0u32..60).prop_map(|(h, m)| format!("2024-11-03 {h:02}:{m:02}:00")),
                Just("garbage".to_string()),
            ]),
            prop::option::of("T[0-4]"),
            prop::option::of(prop_oneof![
                Just("TRAIN".to_string()),
                Just("BUS".to_string()),
                Just("REGIONAL".to_string()),
                Just("TRAM".to_string()),
            ]),
        )
            .prop_map(|(h3_cell, departure_date, trip_id, transport_mode)| ScheduleRecord {
                h3_cell,
                departure_date,
                trip_id,
                transport_mode,
                h3_polygon: None,
            })
    }

    proptest! {
        /// Every record is either indexed or counted as skipped
        #[test]
        fn build_accounts_for_every_record(records in prop::collection::vec(record_strategy(), 0..60)) {
            let index = ScheduleIndex::build(&records);
            let valid = records.iter().filter(|r| r.to_visit().is_ok()).count();

            prop_assert_eq!(index.visit_count(), valid);
            prop_assert_eq!(index.visit_count() + index.skipped(), records.len());
        }

        /// Both lookup tables cover each visit exactly once
        #[test]
        fn tables_partition_visits(records in prop::collection::vec(record_strategy(), 0..60)) {
            let index = ScheduleIndex::build(&records);

            let by_cell: usize = index.cells().map(|c| index.departures_from(c).count()).sum();
            prop_assert_eq!(by_cell, index.visit_count());

            for cell in index.cells() {
                for visit in index.departures_from(cell) {
                    prop_assert_eq!(&visit.cell, cell);
                    prop_assert!(index.stops_of(&visit.trip).any(|v| v == visit));
                }
            }
        }
    }
}
