//! Randomized damage model and two-layer absorption
//!
//! Shields soak damage before hull. Neither layer ever goes below zero.

use crate::combat::ship::Ship;
use crate::core::config::CombatConfig;
use crate::core::dice::Dice;

/// How an incoming hit was absorbed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub shield_damage: u32,
    pub hull_damage: u32,
}

impl DamageReport {
    /// Damage actually absorbed across both layers
    pub fn total(&self) -> u32 {
        self.shield_damage + self.hull_damage
    }
}

/// Roll damage for a weapon rating
///
/// `round(uniform(base - variance, base + variance))` with
/// `base = weapon_power * base_damage_pct / 100`. Draws below zero become 0.
pub fn calculate_damage(config: &CombatConfig, weapon_power: u32, dice: &mut impl Dice) -> u32 {
    let base = weapon_power as f64 * (config.base_damage_pct / 100.0);
    let variance = config.damage_variance;
    let rolled = dice.uniform(base - variance, base + variance).round();
    if rolled <= 0.0 {
        0
    } else {
        rolled as u32
    }
}

/// Apply `damage` to `target`, shields first
pub fn apply_damage(target: &mut Ship, damage: u32) -> DamageReport {
    let shield_damage = damage.min(target.shields);
    target.shields -= shield_damage;

    let hull_damage = (damage - shield_damage).min(target.hull);
    target.hull -= hull_damage;

    DamageReport {
        shield_damage,
        hull_damage,
    }
}
