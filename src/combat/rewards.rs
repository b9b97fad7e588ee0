//! Victory payouts for PvE encounters

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::ship::EnemyTemplate;
use crate::core::config::CombatConfig;
use crate::core::dice::Dice;

/// Tradeable goods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Commodity {
    Ore,
    Organics,
    Equipment,
}

impl Commodity {
    pub const ALL: [Commodity; 3] = [Commodity::Ore, Commodity::Organics, Commodity::Equipment];
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Commodity::Ore => "Ore",
            Commodity::Organics => "Organics",
            Commodity::Equipment => "Equipment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoDrop {
    pub commodity: Commodity,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub credits: u32,
    pub cargo: Option<CargoDrop>,
}

/// Roll the payout for beating `enemy`
///
/// Credits come from the enemy's fixed bounty when it has a non-zero one,
/// otherwise from the configured range. Cargo drops are a single commodity
/// stack.
pub fn roll_rewards(config: &CombatConfig, enemy: &EnemyTemplate, dice: &mut impl Dice) -> Rewards {
    let credits = match enemy.credits {
        Some(credits) if credits > 0 => credits,
        _ => dice.int_inclusive(config.reward_credits_min, config.reward_credits_max),
    };

    let cargo = if dice.chance(config.cargo_drop_chance) {
        let commodity = Commodity::ALL[dice.index(Commodity::ALL.len())];
        let quantity = dice.int_inclusive(config.cargo_quantity_min, config.cargo_quantity_max);
        Some(CargoDrop { commodity, quantity })
    } else {
        None
    };

    Rewards { credits, cargo }
}
