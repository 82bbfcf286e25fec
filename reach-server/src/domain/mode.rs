//! Transport modes and mode filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transport mode: {value}")]
pub struct InvalidTransportMode {
    value: String,
}

/// The kind of vehicle serving a stop visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Train,
    Bus,
    Regional,
}

impl TransportMode {
    /// Every mode, in a fixed order.
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Regional,
    ];

    /// Position of this mode in [`TransportMode::ALL`].
    pub const fn index(self) -> usize {
        match self {
            TransportMode::Train => 0,
            TransportMode::Bus => 1,
            TransportMode::Regional => 2,
        }
    }

    /// The canonical upper-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportMode::Train => "TRAIN",
            TransportMode::Bus => "BUS",
            TransportMode::Regional => "REGIONAL",
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl FromStr for TransportMode {
    type Err = InvalidTransportMode;

    /// Parse a mode name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InvalidTransportMode {
                value: trimmed.to_string(),
            })
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of allowed transport modes.
///
/// # Examples
///
/// ```
/// use reach_server::domain::{ModeSet, TransportMode};
///
/// let mut modes = ModeSet::all();
/// modes.remove(TransportMode::Bus);
/// assert!(modes.contains(TransportMode::Train));
/// assert!(!modes.contains(TransportMode::Bus));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeSet(u8);

impl ModeSet {
    /// A set allowing every mode.
    pub const fn all() -> Self {
        ModeSet(0b111)
    }

    /// A set allowing no mode.
    pub const fn empty() -> Self {
        ModeSet(0)
    }

    pub fn insert(&mut self, mode: TransportMode) {
        self.0 |= mode.bit();
    }

    pub fn remove(&mut self, mode: TransportMode) {
        self.0 &= !mode.bit();
    }

    /// Returns a copy of this set without `mode`.
    pub fn without(mut self, mode: TransportMode) -> Self {
        self.remove(mode);
        self
    }

    pub fn contains(&self, mode: TransportMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained modes in [`TransportMode::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = TransportMode> + '_ {
        TransportMode::ALL
            .into_iter()
            .filter(|mode| self.contains(*mode))
    }

    /// Parse a comma-separated list such as `"TRAIN,BUS"`.
    ///
    /// Empty entries are ignored, so `""` yields the empty set.
    pub fn parse_list(s: &str) -> Result<Self, InvalidTransportMode> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(TransportMode::from_str)
            .collect()
    }
}

impl Default for ModeSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FromIterator<TransportMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = TransportMode>>(iter: I) -> Self {
        let mut set = ModeSet::empty();
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!("TRAIN".parse::<TransportMode>(), Ok(TransportMode::Train));
        assert_eq!("bus".parse::<TransportMode>(), Ok(TransportMode::Bus));
        assert_eq!(
            " Regional ".parse::<TransportMode>(),
            Ok(TransportMode::Regional)
        );
        assert!("TRAM".parse::<TransportMode>().is_err());
        assert!("".parse::<TransportMode>().is_err());
    }

    #[test]
    fn display_roundtrip() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.to_string().parse::<TransportMode>(), Ok(mode));
        }
    }

    #[test]
    fn serde_uses_upper_case() {
        assert_eq!(
            serde_json::to_string(&TransportMode::Regional).unwrap(),
            "\"REGIONAL\""
        );
        let mode: TransportMode = serde_json::from_str("\"BUS\"").unwrap();
        assert_eq!(mode, TransportMode::Bus);
    }

    #[test]
    fn mode_set_operations() {
        let mut set = ModeSet::empty();
        assert!(set.is_empty());

        set.insert(TransportMode::Bus);
        assert!(set.contains(TransportMode::Bus));
        assert!(!set.contains(TransportMode::Train));

        set.insert(TransportMode::Train);
        set.remove(TransportMode::Bus);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![TransportMode::Train]);
    }

    #[test]
    fn without_leaves_others() {
        let set = ModeSet::all().without(TransportMode::Bus);
        assert!(set.contains(TransportMode::Train));
        assert!(set.contains(TransportMode::Regional));
        assert!(!set.contains(TransportMode::Bus));
    }

    #[test]
    fn parse_list() {
        let set = ModeSet::parse_list("TRAIN, regional").unwrap();
        assert_eq!(
            set,
            [TransportMode::Train, TransportMode::Regional]
                .into_iter()
                .collect()
        );
        assert_eq!(ModeSet::parse_list("").unwrap(), ModeSet::empty());
        assert!(ModeSet::parse_list("TRAIN,FERRY").is_err());
    }

    #[test]
    fn debug_lists_modes() {
        let set = ModeSet::all().without(TransportMode::Train);
        assert_eq!(format!("{:?}", set), "{Bus, Regional}");
    }
}
