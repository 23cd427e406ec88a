//! Unit normalization. Everything downstream (energy, aggregation, records)
//! works in kilograms and centimeters; imperial input is converted once at
//! the write boundary.

use serde::{Deserialize, Serialize};

pub const KG_PER_LB: f64 = 0.453_592_37;
pub const CM_PER_IN: f64 = 2.54;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

/// Body or bar weight as submitted -> kilograms.
pub fn weight_to_kg(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => lbs_to_kg(value),
    }
}

/// Height as submitted -> centimeters.
pub fn height_to_cm(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => inches_to_cm(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_values_pass_through() {
        assert_eq!(weight_to_kg(82.5, UnitSystem::Metric), 82.5);
        assert_eq!(height_to_cm(178.0, UnitSystem::Metric), 178.0);
    }

    #[test]
    fn imperial_values_are_converted() {
        let kg = weight_to_kg(220.0, UnitSystem::Imperial);
        assert!((kg - 99.79).abs() < 0.01);

        let cm = height_to_cm(70.0, UnitSystem::Imperial);
        assert!((cm - 177.8).abs() < 1e-9);
    }

    #[test]
    fn unit_system_defaults_to_metric() {
        assert_eq!(UnitSystem::default(), UnitSystem::Metric);
    }

    #[test]
    fn unit_system_deserializes_lowercase() {
        let units: UnitSystem = serde_json::from_str("\"imperial\"").unwrap();
        assert_eq!(units, UnitSystem::Imperial);
    }
}
