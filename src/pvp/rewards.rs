//! Bounties for PvP victories

use serde::Serialize;

use crate::core::config::PvpConfig;
use crate::pvp::battle::BattleSide;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VictoryRewards {
    pub winner: String,
    pub credits: u32,
    pub experience: u32,
    pub message: String,
}

/// Bounty is a fixed fraction of the loser's hull value
pub fn victory_rewards(config: &PvpConfig, winner: &BattleSide, loser: &BattleSide) -> VictoryRewards {
    let class = &loser.ship.class;
    let bounty = (class.hull_value() as f64 * config.bounty_fraction).floor() as u32;

    VictoryRewards {
        winner: winner.username.clone(),
        credits: bounty,
        experience: config.victory_experience,
        message: format!(
            "Destroyed {}'s {} and collected {} bounty!",
            loser.pilot_name,
            class,
            format_credits(bounty)
        ),
    }
}

/// `12345` -> `"12,345 credits"`
pub fn format_credits(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{} credits", grouped)
}
