//! PvP battle records

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::clock::Timestamp;
use crate::core::types::{SectorId, ShipSnapshot};
use crate::pvp::PvpError;

/// Opaque battle key, unique per attacker/defender/start time
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BattleId(pub String);

impl BattleId {
    pub fn new(attacker: &str, defender: &str, started_at: Timestamp) -> Self {
        Self(format!("{}_vs_{}_{}", attacker, defender, started_at))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Attacker,
    Defender,
}

impl Turn {
    pub fn opponent(self) -> Self {
        match self {
            Turn::Attacker => Turn::Defender,
            Turn::Defender => Turn::Attacker,
        }
    }
}

/// A player entering a battle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contender {
    pub username: String,
    pub pilot_name: String,
    pub ship: ShipSnapshot,
    pub current_sector: SectorId,
}

/// One participant, with a private copy of their ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSide {
    pub username: String,
    pub pilot_name: String,
    pub ship: ShipSnapshot,
    pub origin_sector: SectorId,
}

impl From<&Contender> for BattleSide {
    fn from(c: &Contender) -> Self {
        Self {
            username: c.username.clone(),
            pilot_name: c.pilot_name.clone(),
            ship: c.ship.clone(),
            origin_sector: c.current_sector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLogEntry {
    pub timestamp: Timestamp,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvpBattle {
    pub id: BattleId,
    pub attacker: BattleSide,
    pub defender: BattleSide,
    pub turn: Turn,
    pub started_at: Timestamp,
    pub log: Vec<BattleLogEntry>,
}

impl PvpBattle {
    pub fn new(attacker: &Contender, defender: &Contender, started_at: Timestamp) -> Self {
        Self {
            id: BattleId::new(&attacker.username, &defender.username, started_at),
            attacker: attacker.into(),
            defender: defender.into(),
            turn: Turn::Attacker,
            started_at,
            log: Vec::new(),
        }
    }

    pub fn side(&self, turn: Turn) -> &BattleSide {
        match turn {
            Turn::Attacker => &self.attacker,
            Turn::Defender => &self.defender,
        }
    }

    pub fn side_mut(&mut self, turn: Turn) -> &mut BattleSide {
        match turn {
            Turn::Attacker => &mut self.attacker,
            Turn::Defender => &mut self.defender,
        }
    }

    /// Which side `username` fights on
    pub fn side_of(&self, username: &str) -> Option<Turn> {
        if self.attacker.username == username {
            Some(Turn::Attacker)
        } else if self.defender.username == username {
            Some(Turn::Defender)
        } else {
            None
        }
    }

    pub fn involves(&self, username: &str) -> bool {
        self.side_of(username).is_some()
    }

    /// The side `username` is on, if they hold the current turn
    pub fn acting_side(&self, username: &str) -> Result<Turn, PvpError> {
        let side = self
            .side_of(username)
            .ok_or_else(|| PvpError::NotParticipant(username.to_string()))?;
        if side != self.turn {
            return Err(PvpError::NotYourTurn);
        }
        Ok(side)
    }

    pub fn add_log(&mut self, timestamp: Timestamp, message: impl Into<String>) {
        self.log.push(BattleLogEntry {
            timestamp,
            message: message.into(),
        });
    }
}
