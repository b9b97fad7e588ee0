//! Combat system constants - all tunable defaults in one place
//!
//! These seed the `Default` impls in `core::config`; runtime code reads the
//! config, never these directly.

// PvE damage
pub const BASE_DAMAGE_PCT: f64 = 50.0;
pub const DAMAGE_VARIANCE: f64 = 5.0;

// PvE escape
pub const FLEE_CHANCE: f64 = 0.5;
pub const MAX_FLEE_CHANCE: f64 = 0.9;
pub const SPEED_FLEE_BONUS: f64 = 0.2;

// Log
pub const COMBAT_LOG_CAPACITY: usize = 20;

// PvP
pub const PVP_DAMAGE_FLOOR: f64 = 0.8;
pub const PVP_DAMAGE_SPREAD: f64 = 0.4;
pub const PVP_PURSUIT_FACTOR: f64 = 0.5;
pub const PVP_BOUNTY_FRACTION: f64 = 0.3;
pub const PVP_VICTORY_EXPERIENCE: u32 = 100;
