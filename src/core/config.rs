//! Game rules configuration with documented constants
//!
//! Every tunable number used by the combat, PvP and presence systems lives
//! here. Defaults reproduce the live game; a TOML file can override any
//! subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::core::error::{AstraError, Result};

/// Top-level configuration, one section per subsystem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub combat: CombatConfig,
    pub pvp: PvpConfig,
    pub presence: PresenceConfig,
}

/// Tuning for player-vs-environment encounters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === DAMAGE ===
    /// Percentage of a weapon rating that becomes base damage
    ///
    /// At 50, a ship with weapons 40 hits for 20 before variance.
    pub base_damage_pct: f64,

    /// Half-width of the uniform damage spread around the base value
    pub damage_variance: f64,

    // === ESCAPE ===
    /// Flee probability for a ship with speed 1.0
    pub flee_chance: f64,

    /// Hard cap on flee probability regardless of speed
    pub max_flee_chance: f64,

    /// Flee probability gained per point of speed above 1.0
    ///
    /// A speed 1.5 ship gets +0.1 at the default of 0.2.
    pub speed_flee_bonus: f64,

    // === LOG ===
    /// Number of combat log entries kept before the oldest is evicted
    pub log_capacity: usize,

    // === REWARDS ===
    /// Credit payout range for enemies without a fixed bounty
    pub reward_credits_min: u32,
    pub reward_credits_max: u32,

    /// Probability that a defeated enemy drops cargo
    pub cargo_drop_chance: f64,

    /// Quantity range of a cargo drop
    pub cargo_quantity_min: u32,
    pub cargo_quantity_max: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_damage_pct: BASE_DAMAGE_PCT,
            damage_variance: DAMAGE_VARIANCE,
            flee_chance: FLEE_CHANCE,
            max_flee_chance: MAX_FLEE_CHANCE,
            speed_flee_bonus: SPEED_FLEE_BONUS,
            log_capacity: COMBAT_LOG_CAPACITY,
            reward_credits_min: 100,
            reward_credits_max: 500,
            cargo_drop_chance: 0.4,
            cargo_quantity_min: 5,
            cargo_quantity_max: 20,
        }
    }
}

/// Tuning for player-vs-player battles
///
/// Per-class damage, accuracy and flee numbers are fixed tables on
/// [`ShipClass`](crate::core::types::ShipClass), not configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PvpConfig {
    /// Lowest damage multiplier applied to a hit
    pub damage_floor: f64,
    /// Width of the multiplier range above the floor
    pub damage_spread: f64,
    /// Fraction of class damage dealt by a pursuit shot on a failed flee
    pub pursuit_factor: f64,
    /// Fraction of the loser's ship value paid out as bounty
    pub bounty_fraction: f64,
    /// Flat experience for a PvP victory
    pub victory_experience: u32,
}

impl Default for PvpConfig {
    fn default() -> Self {
        Self {
            damage_floor: PVP_DAMAGE_FLOOR,
            damage_spread: PVP_DAMAGE_SPREAD,
            pursuit_factor: PVP_PURSUIT_FACTOR,
            bounty_fraction: PVP_BOUNTY_FRACTION,
            victory_experience: PVP_VICTORY_EXPERIENCE,
        }
    }
}

/// Tuning for the multiplayer presence directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// A player counts as active while `now - last_seen` is below this (ms)
    pub activity_timeout_ms: u64,

    /// Records older than `activity_timeout_ms * purge_multiplier` are deleted
    ///
    /// This keeps stale players around for leaderboards long after they
    /// stop showing up as active.
    pub purge_multiplier: u64,

    /// Window used for the "recently active" statistic (ms)
    pub recent_window_ms: u64,

    /// Search radius used when the caller does not pick one
    pub default_max_jumps: u32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            activity_timeout_ms: 30 * 60 * 1000,
            purge_multiplier: 4,
            recent_window_ms: 5 * 60 * 1000,
            default_max_jumps: 3,
        }
    }
}

impl PresenceConfig {
    /// Age beyond which a record is purged
    pub fn purge_after_ms(&self) -> u64 {
        self.activity_timeout_ms.saturating_mul(self.purge_multiplier)
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let c = &self.combat;
        if c.base_damage_pct < 0.0 || c.damage_variance < 0.0 {
            return Err(AstraError::Config(
                "base_damage_pct and damage_variance must be non-negative".into(),
            ));
        }
        for (name, p) in [
            ("flee_chance", c.flee_chance),
            ("max_flee_chance", c.max_flee_chance),
            ("cargo_drop_chance", c.cargo_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(AstraError::Config(format!("{} ({}) must be within 0..=1", name, p)));
            }
        }
        if c.log_capacity == 0 {
            return Err(AstraError::Config("log_capacity must be at least 1".into()));
        }
        if c.reward_credits_min > c.reward_credits_max {
            return Err(AstraError::Config(format!(
                "reward_credits_min ({}) exceeds reward_credits_max ({})",
                c.reward_credits_min, c.reward_credits_max
            )));
        }
        if c.cargo_quantity_min > c.cargo_quantity_max {
            return Err(AstraError::Config(format!(
                "cargo_quantity_min ({}) exceeds cargo_quantity_max ({})",
                c.cargo_quantity_min, c.cargo_quantity_max
            )));
        }

        let p = &self.pvp;
        if p.damage_floor < 0.0 || p.damage_spread < 0.0 || p.pursuit_factor < 0.0 {
            return Err(AstraError::Config("PvP damage factors must be non-negative".into()));
        }

        let pr = &self.presence;
        if pr.activity_timeout_ms == 0 {
            return Err(AstraError::Config("activity_timeout_ms must be positive".into()));
        }
        if pr.purge_multiplier < 1 {
            return Err(AstraError::Config(
                "purge_multiplier must be at least 1 so records expire before being purged".into(),
            ));
        }

        Ok(())
    }
}
