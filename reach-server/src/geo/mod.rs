//! Projected cell coordinates and distance estimates.
//!
//! Cells carry a planar coordinate in a projected reference system (metres by
//! default). Distances are only estimates: straight-line length scaled by an
//! indirection factor to approximate the length of the real track or road.
//! They never drive routing topology, which comes from the schedule alone.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::CellId;

/// Ratio of real travel distance to straight-line distance.
pub const DEFAULT_INDIRECTION_FACTOR: f64 = 1.2;

/// Projected coordinate units per kilometre.
pub const DEFAULT_UNITS_PER_KM: f64 = 1000.0;

/// A point in projected planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in coordinate units.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One unvalidated `(cell_id, x, y)` row from the data-loading layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeoRow {
    #[serde(default)]
    pub cell_id: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl GeoRow {
    pub fn new(cell_id: &str, x: f64, y: f64) -> Self {
        Self {
            cell_id: Some(cell_id.to_string()),
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Lookup from cell to projected coordinate.
///
/// Missing cells never fail: distances involving them fall back to zero.
///
/// # Examples
///
/// ```
/// use reach_server::domain::CellId;
/// use reach_server::geo::{GeoLookup, GeoRow};
///
/// let geo = GeoLookup::from_rows(&[
///     GeoRow::new("A", 0.0, 0.0),
///     GeoRow::new("B", 3000.0, 4000.0),
/// ]);
/// let a = CellId::parse("A").unwrap();
/// let b = CellId::parse("B").unwrap();
///
/// assert_eq!(geo.straight_line_km(&a, &b), 5.0);
/// assert!((geo.distance_km(&a, &b) - 6.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct GeoLookup {
    points: HashMap<CellId, PlanarPoint>,
    indirection_factor: f64,
    units_per_km: f64,
    rejected: usize,
}

impl Default for GeoLookup {
    fn default() -> Self {
        Self {
            points: HashMap::new(),
            indirection_factor: DEFAULT_INDIRECTION_FACTOR,
            units_per_km: DEFAULT_UNITS_PER_KM,
            rejected: 0,
        }
    }
}

impl GeoLookup {
    /// Create an empty lookup with default scaling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lookup from raw rows, skipping rows without a valid cell id
    /// or finite coordinates. Later rows for the same cell win.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a GeoRow>,
    {
        let mut lookup = Self::new();

        for row in rows {
            let parsed = row
                .cell_id
                .as_deref()
                .and_then(|id| CellId::parse(id).ok())
                .zip(row.x.zip(row.y))
                .filter(|(_, (x, y))| x.is_finite() && y.is_finite());

            match parsed {
                Some((cell, (x, y))) => lookup.insert(cell, PlanarPoint::new(x, y)),
                None => lookup.rejected += 1,
            }
        }

        debug!(
            cells = lookup.len(),
            rejected = lookup.rejected,
            "Geo lookup built"
        );

        lookup
    }

    /// Override the indirection factor. Non-finite or negative values are
    /// ignored.
    pub fn with_indirection_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor >= 0.0 {
            self.indirection_factor = factor;
        }
        self
    }

    /// Override the coordinate scale. Non-finite or non-positive values are
    /// ignored.
    pub fn with_units_per_km(mut self, units: f64) -> Self {
        if units.is_finite() && units > 0.0 {
            self.units_per_km = units;
        }
        self
    }

    pub fn insert(&mut self, cell: CellId, point: PlanarPoint) {
        self.points.insert(cell, point);
    }

    pub fn get(&self, cell: &CellId) -> Option<PlanarPoint> {
        self.points.get(cell).copied()
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.points.contains_key(cell)
    }

    pub fn indirection_factor(&self) -> f64 {
        self.indirection_factor
    }

    /// Straight-line distance in km, or zero if either cell is unknown.
    pub fn straight_line_km(&self, a: &CellId, b: &CellId) -> f64 {
        match (self.points.get(a), self.points.get(b)) {
            (Some(pa), Some(pb)) => pa.distance_to(pb) / self.units_per_km,
            _ => 0.0,
        }
    }

    /// Estimated travel distance in km between two cells.
    ///
    /// Returns zero if either cell is unknown.
    pub fn distance_km(&self, a: &CellId, b: &CellId) -> f64 {
        self.straight_line_km(a, b) * self.indirection_factor
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of rows dropped by [`GeoLookup::from_rows`].
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}
