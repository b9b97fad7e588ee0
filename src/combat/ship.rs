//! Ship stats as seen by the combat engine

use serde::{Deserialize, Serialize};

use crate::core::types::{ShipClass, ShipSnapshot};

/// A combat-capable ship
///
/// The engine only ever mutates `hull` and `shields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub name: String,
    pub class: ShipClass,
    pub hull: u32,
    pub hull_max: u32,
    pub shields: u32,
    pub shields_max: u32,
    /// Weapon power rating
    pub weapons: u32,
    /// Speed multiplier, 1.0 is nominal
    pub speed: f64,
}

impl Ship {
    /// Fully repaired ship with charged shields
    pub fn new(
        name: impl Into<String>,
        class: ShipClass,
        hull_max: u32,
        shields_max: u32,
        weapons: u32,
        speed: f64,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            hull: hull_max,
            hull_max,
            shields: shields_max,
            shields_max,
            weapons,
            speed,
        }
    }

    /// Starter scout: fast, light weapons
    pub fn void_runner() -> Self {
        Self::new("Void Runner", ShipClass::Scout, 100, 50, 20, 1.2)
    }

    /// Bulk hauler: tough but slow
    pub fn star_hauler() -> Self {
        Self::new("Star Hauler", ShipClass::Freighter, 150, 75, 30, 0.8)
    }

    /// Combat hull with heavy shields and guns
    pub fn nebula_hunter() -> Self {
        Self::new("Nebula Hunter", ShipClass::Destroyer, 200, 150, 100, 1.1)
    }

    /// All-rounder
    pub fn deep_space_vanguard() -> Self {
        Self::new("Deep Space Vanguard", ShipClass::Corvette, 130, 80, 50, 1.0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.hull == 0
    }

    pub fn hull_percent(&self) -> u32 {
        percent(self.hull, self.hull_max)
    }

    pub fn shields_percent(&self) -> u32 {
        percent(self.shields, self.shields_max)
    }

    /// Presence/PvP view of this ship
    pub fn snapshot(&self) -> ShipSnapshot {
        ShipSnapshot::new(self.name.clone(), self.class.clone(), self.hull, self.hull_max)
    }
}

/// Rounded percentage; an empty maximum reads as 0%
fn percent(current: u32, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    ((current as f64 / max as f64) * 100.0).round() as u32
}

/// An opponent the engine clones at the start of an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub ship: Ship,
    /// Fixed payout; `None` or zero rolls from the configured range
    pub credits: Option<u32>,
}

impl EnemyTemplate {
    pub fn new(name: impl Into<String>, ship: Ship) -> Self {
        Self {
            name: name.into(),
            ship,
            credits: None,
        }
    }

    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = Some(credits);
        self
    }

    /// Small raider used by random encounters
    pub fn pirate_raider() -> Self {
        Self::new(
            "Pirate Raider",
            Ship::new("Rustbucket", ShipClass::Corvette, 80, 30, 25, 1.0),
        )
    }
}
