//! Domain error types.
//!
//! These errors describe why a raw schedule record could not become a
//! [`StopVisit`](super::StopVisit). They are distinct from I/O errors and
//! never abort an index build; the offending record is skipped.

use super::{InvalidCellId, InvalidTransportMode, InvalidTripId, TimeError};

/// Reasons a raw schedule record is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A required column was absent or blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Cell(#[from] InvalidCellId),

    #[error(transparent)]
    Trip(#[from] InvalidTripId),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Mode(#[from] InvalidTransportMode),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CellId, TransportMode, parse_timestamp};

    #[test]
    fn error_display() {
        let err = RecordError::MissingField("h3_cell");
        assert_eq!(err.to_string(), "missing required field: h3_cell");

        let err: RecordError = CellId::parse("").unwrap_err().into();
        assert_eq!(err.to_string(), "invalid cell id: must not be empty");

        let err: RecordError = parse_timestamp("x").unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "invalid time: expected YYYY-MM-DD HH:MM:SS"
        );

        let err: RecordError = "FERRY".parse::<TransportMode>().unwrap_err().into();
        assert_eq!(err.to_string(), "invalid transport mode: FERRY");
    }
}
