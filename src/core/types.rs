//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sector identifier in the galaxy warp graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorId(pub u32);

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ship hull class
///
/// Names match exactly and case-sensitively. Anything else becomes
/// `Unknown` carrying the name as given; it uses the default row of every
/// class table and serializes back to the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShipClass {
    Scout,
    Trader,
    Freighter,
    Corvette,
    Destroyer,
    Battleship,
    Unknown(String),
}

impl ShipClass {
    pub const ALL: [ShipClass; 6] = [
        ShipClass::Scout,
        ShipClass::Trader,
        ShipClass::Freighter,
        ShipClass::Corvette,
        ShipClass::Destroyer,
        ShipClass::Battleship,
    ];

    pub fn name(&self) -> &str {
        match self {
            ShipClass::Scout => "Scout",
            ShipClass::Trader => "Trader",
            ShipClass::Freighter => "Freighter",
            ShipClass::Corvette => "Corvette",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Battleship => "Battleship",
            ShipClass::Unknown(name) => name,
        }
    }

    /// Exact-name lookup; unmatched names are kept in `Unknown`
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|class| class.name() == name)
            .unwrap_or_else(|| ShipClass::Unknown(name.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ShipClass::Unknown(_))
    }
}

impl From<String> for ShipClass {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<ShipClass> for String {
    fn from(class: ShipClass) -> Self {
        match class {
            ShipClass::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Minimal ship view shared by presence records and PvP battles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipSnapshot {
    pub name: String,
    pub hull: u32,
    pub max_hull: u32,
    pub class: ShipClass,
}

impl ShipSnapshot {
    pub fn new(name: impl Into<String>, class: ShipClass, hull: u32, max_hull: u32) -> Self {
        Self {
            name: name.into(),
            hull: hull.min(max_hull),
            max_hull,
            class,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_lookup_is_exact() {
        assert_eq!(ShipClass::from_name("Corvette"), ShipClass::Corvette);
        assert_eq!(ShipClass::from_name("corvette"), ShipClass::Unknown("corvette".into()));
        assert_eq!(ShipClass::from_name("Dreadnought"), ShipClass::Unknown("Dreadnought".into()));
        assert!(!ShipClass::from_name("").is_known());
    }

    #[test]
    fn test_class_round_trips_through_name() {
        for class in ShipClass::ALL {
            assert_eq!(class.name().parse::<ShipClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_unrecognised_class_keeps_its_name() {
        let class: ShipClass = serde_json::from_str("\"Dreadnought\"").unwrap();
        assert_eq!(class, ShipClass::Unknown("Dreadnought".into()));
        assert_eq!(class.to_string(), "Dreadnought");
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"Dreadnought\"");

        let class: ShipClass = serde_json::from_str("\"Destroyer\"").unwrap();
        assert_eq!(class, ShipClass::Destroyer);
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"Destroyer\"");
    }

    #[test]
    fn test_snapshot_clamps_hull() {
        let ship = ShipSnapshot::new("Void Runner", ShipClass::Scout, 150, 100);
        assert_eq!(ship.hull, 100);
        assert!(!ship.is_destroyed());
    }
}
