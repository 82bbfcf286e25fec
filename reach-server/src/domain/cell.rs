//! Cell identifier types.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid cell identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell id: {reason}")]
pub struct InvalidCellId {
    reason: &'static str,
}

/// An opaque hexagonal cell identifier (typically an H3 index string).
///
/// The engine never interprets the key; it only hashes and compares it.
/// Surrounding whitespace is trimmed on parse, and the key must be non-empty
/// and contain no inner whitespace. Clones share the underlying string.
///
/// # Examples
///
/// ```
/// use reach_server::domain::CellId;
///
/// let cell = CellId::parse(" 841fb47ffffffff ").unwrap();
/// assert_eq!(cell.as_str(), "841fb47ffffffff");
///
/// assert!(CellId::parse("").is_err());
/// assert!(CellId::parse("84 1f").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(Arc<str>);

impl CellId {
    /// Parse a cell identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidCellId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidCellId {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidCellId {
                reason: "must not contain whitespace",
            });
        }

        Ok(CellId(Arc::from(trimmed)))
    }

    /// Returns the cell identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self.as_str())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Roundtrip: parse then as_str returns the trimmed input
        #[test]
        fn roundtrip(s in "[0-9a-f]{1,15}") {
            let cell = CellId::parse(&s).unwrap();
            prop_assert_eq!(cell.as_str(), s.as_str());
        }

        /// Padding never changes identity
        #[test]
        fn padding_ignored(s in "[0-9a-f]{1,15}", left in " {0,3}", right in " {0,3}") {
            let padded = format!("{left}{s}{right}");
            prop_assert_eq!(CellId::parse(&padded).unwrap(), CellId::parse(&s).unwrap());
        }
    }
}
