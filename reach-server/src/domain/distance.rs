//! Per-mode accumulated travel distance.

use serde::Serialize;

use super::TransportMode;

/// Kilometres travelled in each transport mode along a path.
///
/// Components only ever grow: [`DistanceVector::add_leg`] clamps negative or
/// non-finite leg lengths to zero.
///
/// # Examples
///
/// ```
/// use reach_server::domain::{DistanceVector, TransportMode};
///
/// let v = DistanceVector::zero()
///     .add_leg(TransportMode::Bus, 5.0)
///     .add_leg(TransportMode::Train, 10.0);
/// assert_eq!(v.get(TransportMode::Train), 10.0);
/// assert_eq!(v.get(TransportMode::Bus), 5.0);
/// assert_eq!(v.total_km(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistanceVector {
    #[serde(rename = "TRAIN")]
    pub train: f64,
    #[serde(rename = "BUS")]
    pub bus: f64,
    #[serde(rename = "REGIONAL")]
    pub regional: f64,
}

impl DistanceVector {
    pub const fn zero() -> Self {
        Self {
            train: 0.0,
            bus: 0.0,
            regional: 0.0,
        }
    }

    /// Distance travelled in `mode`.
    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Train => self.train,
            TransportMode::Bus => self.bus,
            TransportMode::Regional => self.regional,
        }
    }

    /// Returns a new vector with `km` added to the `mode` component.
    #[must_use]
    pub fn add_leg(mut self, mode: TransportMode, km: f64) -> Self {
        let km = if km.is_finite() && km > 0.0 { km } else { 0.0 };
        match mode {
            TransportMode::Train => self.train += km,
            TransportMode::Bus => self.bus += km,
            TransportMode::Regional => self.regional += km,
        }
        self
    }

    /// Sum over all modes.
    pub fn total_km(&self) -> f64 {
        self.train + self.bus + self.regional
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_default() {
        assert_eq!(DistanceVector::zero(), DistanceVector::default());
        assert_eq!(DistanceVector::zero().total_km(), 0.0);
    }

    #[test]
    fn add_leg_targets_one_component() {
        let v = DistanceVector::zero().add_leg(TransportMode::Regional, 3.5);
        assert_eq!(v.regional, 3.5);
        assert_eq!(v.train, 0.0);
        assert_eq!(v.bus, 0.0);
    }

    #[test]
    fn negative_and_nan_legs_are_ignored() {
        let v = DistanceVector::zero()
            .add_leg(TransportMode::Train, -4.0)
            .add_leg(TransportMode::Bus, f64::NAN)
            .add_leg(TransportMode::Regional, f64::INFINITY);
        assert_eq!(v, DistanceVector::zero());
    }

    #[test]
    fn serializes_with_mode_names() {
        let v = DistanceVector::zero()
            .add_leg(TransportMode::Train, 10.0)
            .add_leg(TransportMode::Bus, 5.0);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "TRAIN": 10.0, "BUS": 5.0, "REGIONAL": 0.0 })
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = TransportMode> {
        prop_oneof![
            Just(TransportMode::Train),
            Just(TransportMode::Bus),
            Just(TransportMode::Regional),
        ]
    }

    proptest! {
        /// Adding any leg never decreases any component
        #[test]
        fn legs_only_accumulate(
            legs in prop::collection::vec((mode_strategy(), -50.0f64..500.0), 0..20)
        ) {
            let mut v = DistanceVector::zero();
            for (mode, km) in legs {
                let next = v.add_leg(mode, km);
                for m in TransportMode::ALL {
                    prop_assert!(next.get(m) >= v.get(m));
                }
                prop_assert!(next.get(mode) >= 0.0);
                v = next;
            }
        }
    }
}
