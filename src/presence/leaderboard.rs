//! Leaderboard ordering

use std::cmp::Reverse;
use std::str::FromStr;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::presence::record::PresenceRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    #[default]
    Kills,
    Credits,
    /// Kills per death, deaths floored at one
    #[serde(rename = "kd")]
    KillDeathRatio,
}

impl FromStr for LeaderboardSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kills" => Ok(LeaderboardSort::Kills),
            "credits" => Ok(LeaderboardSort::Credits),
            "kd" => Ok(LeaderboardSort::KillDeathRatio),
            other => Err(format!("Unknown leaderboard sort: {}", other)),
        }
    }
}

/// Sort descending by the chosen stat; ties keep their incoming order
pub fn rank(players: &mut [PresenceRecord], sort: LeaderboardSort) {
    match sort {
        LeaderboardSort::Kills => players.sort_by_key(|p| Reverse(p.kills)),
        LeaderboardSort::Credits => players.sort_by_key(|p| Reverse(p.credits)),
        LeaderboardSort::KillDeathRatio => {
            players.sort_by_key(|p| Reverse(OrderedFloat(p.kill_death_ratio())))
        }
    }
}
