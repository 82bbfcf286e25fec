//! Money and CO2 cost of a travelled distance.
//!
//! Both totals are independent weighted sums of the per-mode distance
//! vector. Rates are per kilometre.

use serde::Serialize;

use crate::domain::{DistanceVector, TransportMode};

/// A per-kilometre rate for each transport mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRates {
    pub train: f64,
    pub bus: f64,
    pub regional: f64,
}

impl ModeRates {
    pub const fn new(train: f64, bus: f64, regional: f64) -> Self {
        Self {
            train,
            bus,
            regional,
        }
    }

    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Train => self.train,
            TransportMode::Bus => self.bus,
            TransportMode::Regional => self.regional,
        }
    }

    /// Sum of `rate * km` over all modes.
    pub fn apply(&self, distances: &DistanceVector) -> f64 {
        TransportMode::ALL
            .into_iter()
            .map(|mode| self.get(mode) * distances.get(mode))
            .sum()
    }
}

/// Kilograms of CO2 emitted per km.
pub const DEFAULT_CO2_KG_PER_KM: ModeRates = ModeRates::new(0.011, 0.042, 0.030);

/// Ticket price in euros per km.
pub const DEFAULT_EUROS_PER_KM: ModeRates = ModeRates::new(0.12, 0.04, 0.093);

/// Money and emissions for one path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Cost {
    pub money_euros: f64,
    pub co2_kg: f64,
}

/// Linear cost model over travelled distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub money: ModeRates,
    pub co2: ModeRates,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            money: DEFAULT_EUROS_PER_KM,
            co2: DEFAULT_CO2_KG_PER_KM,
        }
    }
}

impl CostModel {
    pub fn new(money: ModeRates, co2: ModeRates) -> Self {
        Self { money, co2 }
    }

    /// Cost of having travelled `distances`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reach_server::cost::CostModel;
    /// use reach_server::domain::{DistanceVector, TransportMode};
    ///
    /// let path = DistanceVector::zero()
    ///     .add_leg(TransportMode::Bus, 5.0)
    ///     .add_leg(TransportMode::Train, 10.0);
    /// let cost = CostModel::default().cost_of(&path);
    ///
    /// assert!((cost.money_euros - (5.0 * 0.04 + 10.0 * 0.12)).abs() < 1e-9);
    /// assert!((cost.co2_kg - (5.0 * 0.042 + 10.0 * 0.011)).abs() < 1e-9);
    /// ```
    pub fn cost_of(&self, distances: &DistanceVector) -> Cost {
        Cost {
            money_euros: self.money.apply(distances),
            co2_kg: self.co2.apply(distances),
        }
    }
}
