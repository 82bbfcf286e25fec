//! Schedule index.
//!
//! Turns raw stop-visit records into the two lookup tables the search walks:
//! visits per trip and visits per cell.

mod index;
mod record;

pub use index::ScheduleIndex;
pub use record::ScheduleRecord;
