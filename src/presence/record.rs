//! Presence records

use serde::{Deserialize, Serialize};

use crate::core::clock::Timestamp;
use crate::core::types::{SectorId, ShipSnapshot};
use crate::pvp::Contender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Docked,
    Combat,
    Dead,
}

/// Everything the directory knows about one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    pub username: String,
    pub pilot_name: String,
    pub ship: ShipSnapshot,
    pub current_sector: SectorId,
    pub last_seen: Timestamp,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub credits: u64,
    pub status: PlayerStatus,
    pub joined_at: Timestamp,
}

impl PresenceRecord {
    /// Milliseconds since this player was last seen
    pub fn age(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.last_seen)
    }

    pub fn is_active(&self, now: Timestamp, timeout_ms: u64) -> bool {
        self.age(now) < timeout_ms
    }

    /// Kills per death, with deaths floored at one
    pub fn kill_death_ratio(&self) -> f64 {
        self.kills as f64 / self.deaths.max(1) as f64
    }

    pub fn touch(&mut self, now: Timestamp) {
        self.last_seen = now;
    }
}

impl From<&PresenceRecord> for Contender {
    fn from(record: &PresenceRecord) -> Self {
        Contender {
            username: record.username.clone(),
            pilot_name: record.pilot_name.clone(),
            ship: record.ship.clone(),
            current_sector: record.current_sector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ShipClass;

    fn record() -> PresenceRecord {
        PresenceRecord {
            username: "ann".into(),
            pilot_name: "Ann".into(),
            ship: ShipSnapshot::new("Void Runner", ShipClass::Scout, 100, 100),
            current_sector: SectorId(1),
            last_seen: 1_000,
            kills: 3,
            deaths: 0,
            credits: 0,
            status: PlayerStatus::Active,
            joined_at: 1_000,
        }
    }

    #[test]
    fn test_kd_ratio_floors_deaths() {
        let mut r = record();
        assert_eq!(r.kill_death_ratio(), 3.0);
        r.deaths = 2;
        assert_eq!(r.kill_death_ratio(), 1.5);
    }

    #[test]
    fn test_activity_window_is_exclusive() {
        let r = record();
        assert!(r.is_active(1_999, 1_000));
        assert!(!r.is_active(2_000, 1_000));
        // clock behind last_seen counts as fresh
        assert!(r.is_active(0, 1_000));
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["pilotName"], "Ann");
        assert_eq!(json["lastSeen"], 1_000);
        assert_eq!(json["currentSector"], 1);
        assert_eq!(json["status"], "active");
        assert_eq!(json["ship"]["maxHull"], 100);
        assert_eq!(json["ship"]["class"], "Scout");
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let json = r#"{
            "username": "bob", "pilotName": "Bob",
            "ship": {"name": "Hauler", "hull": 10, "maxHull": 150, "class": "Freighter"},
            "currentSector": 4, "lastSeen": 5, "status": "docked", "joinedAt": 1
        }"#;
        let r: PresenceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.kills, 0);
        assert_eq!(r.credits, 0);
        assert_eq!(r.status, PlayerStatus::Docked);
    }
}
