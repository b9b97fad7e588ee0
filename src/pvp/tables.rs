//! Per-class PvP numbers
//!
//! One exhaustive match per class. `Unknown` carries the defaults that
//! unrecognised class names fall back to.

use crate::core::types::ShipClass;

/// Combat profile of a ship class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    /// Damage of a full-strength hit
    pub damage: u32,
    /// Probability an attack lands
    pub accuracy: f64,
    /// Probability a flee attempt succeeds
    pub flee_chance: f64,
    /// Hull value in credits, basis for bounties
    pub value: u32,
}

impl ShipClass {
    pub fn profile(&self) -> ClassProfile {
        let (damage, accuracy, flee_chance, value) = match self {
            ShipClass::Scout => (15, 0.75, 0.85, 1_000),
            ShipClass::Trader => (20, 0.65, 0.70, 2_500),
            ShipClass::Freighter => (25, 0.55, 0.50, 5_000),
            ShipClass::Corvette => (35, 0.80, 0.75, 7_500),
            ShipClass::Destroyer => (45, 0.85, 0.60, 12_000),
            ShipClass::Battleship => (60, 0.70, 0.40, 20_000),
            ShipClass::Unknown(_) => (20, 0.70, 0.60, 2_000),
        };
        ClassProfile {
            damage,
            accuracy,
            flee_chance,
            value,
        }
    }

    pub fn base_damage(&self) -> u32 {
        self.profile().damage
    }

    pub fn accuracy(&self) -> f64 {
        self.profile().accuracy
    }

    pub fn flee_chance(&self) -> f64 {
        self.profile().flee_chance
    }

    pub fn hull_value(&self) -> u32 {
        self.profile().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scout_profile() {
        let scout = ShipClass::Scout.profile();
        assert_eq!(scout.damage, 15);
        assert_eq!(scout.accuracy, 0.75);
        assert_eq!(scout.flee_chance, 0.85);
        assert_eq!(scout.value, 1_000);
    }

    #[test]
    fn test_unknown_names_use_defaults() {
        let class = ShipClass::from_name("Dreadnought");
        assert_eq!(class.base_damage(), 20);
        assert_eq!(class.accuracy(), 0.7);
        assert_eq!(class.flee_chance(), 0.6);
        assert_eq!(class.hull_value(), 2_000);
    }

    #[test]
    fn test_heavier_hulls_hit_harder() {
        let damages: Vec<u32> = ShipClass::ALL.iter().map(|c| c.base_damage()).collect();
        assert!(damages.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_probabilities_in_range() {
        for class in ShipClass::ALL {
            let p = class.profile();
            assert!((0.0..=1.0).contains(&p.accuracy));
            assert!((0.0..=1.0).contains(&p.flee_chance));
        }
    }
}
