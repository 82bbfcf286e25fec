//! Scheduled stop visits.

use chrono::NaiveDateTime;

use super::{CellId, TransportMode, TripId};

/// One scheduled vehicle stop event: a trip calling at a cell at a time.
///
/// Visits of one trip carry no sequence number; ordering between them is
/// only ever derived from `departure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopVisit {
    pub trip: TripId,
    pub cell: CellId,
    pub departure: NaiveDateTime,
    pub mode: TransportMode,
}

impl StopVisit {
    pub fn new(trip: TripId, cell: CellId, departure: NaiveDateTime, mode: TransportMode) -> Self {
        Self {
            trip,
            cell,
            departure,
            mode,
        }
    }

    /// Time from `start` to this visit's departure (negative if earlier).
    pub fn elapsed_since(&self, start: NaiveDateTime) -> chrono::Duration {
        self.departure.signed_duration_since(start)
    }
}
