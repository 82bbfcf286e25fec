//! Trip identifier type.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid trip identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid trip id: {reason}")]
pub struct InvalidTripId {
    reason: &'static str,
}

/// Identifier of one scheduled vehicle run.
///
/// Trip ids are opaque; the only validation is that they are non-empty
/// after trimming.
///
/// # Examples
///
/// ```
/// use reach_server::domain::TripId;
///
/// let trip = TripId::parse("OCESN847100F").unwrap();
/// assert_eq!(trip.as_str(), "OCESN847100F");
///
/// assert!(TripId::parse("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TripId(Arc<str>);

impl TripId {
    /// Create a trip id, returning an error if it is blank.
    pub fn parse(s: &str) -> Result<Self, InvalidTripId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidTripId {
                reason: "trip id cannot be empty",
            });
        }
        Ok(TripId(Arc::from(trimmed)))
    }

    /// Returns the trip id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TripId({})", self.0)
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_trip() {
        assert!(TripId::parse("T1").is_ok());
        assert!(TripId::parse("OCESN847100F-1_2").is_ok());
        // Inner spaces are kept, only the ends are trimmed
        assert_eq!(TripId::parse(" a b ").unwrap().as_str(), "a b");
    }

    #[test]
    fn reject_blank() {
        assert!(TripId::parse("").is_err());
        assert!(TripId::parse(" \t").is_err());
    }

    #[test]
    fn error_display() {
        let err = TripId::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid trip id: trip id cannot be empty");
    }
}
