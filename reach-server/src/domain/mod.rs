//! Domain types for the reachability engine.
//!
//! This module contains the value types shared by the schedule index, the
//! geo lookup and the search. Identifier types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod cell;
mod distance;
mod error;
mod mode;
mod time;
mod trip;
mod visit;

pub use cell::{CellId, InvalidCellId};
pub use distance::DistanceVector;
pub use error::RecordError;
pub use mode::{InvalidTransportMode, ModeSet, TransportMode};
pub use time::{
    TIMESTAMP_FORMAT, TimeError, as_minutes, default_reference_date, parse_timestamp, start_time,
};
pub use trip::{InvalidTripId, TripId};
pub use visit::StopVisit;
