//! The presence registry and its query views

use std::collections::hash_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use serde::Serialize;

use crate::core::clock::{Clock, SystemClock, Timestamp};
use crate::core::config::PresenceConfig;
use crate::core::error::Result;
use crate::core::types::{SectorId, ShipSnapshot};
use crate::presence::galaxy::{SectorGraph, StationClass};
use crate::presence::leaderboard::{rank, LeaderboardSort};
use crate::presence::nearby::sectors_within;
use crate::presence::persistence::{KeyValueStore, STORAGE_KEY};
use crate::presence::record::{PlayerStatus, PresenceRecord};
use crate::presence::AttackDenied;

/// Kind of place a player can be docked at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Planet,
    Station,
}

/// Extra fields merged into a record by [`PresenceDirectory::update_status`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusPatch {
    pub credits: Option<u64>,
    pub current_sector: Option<SectorId>,
    pub ship: Option<ShipSnapshot>,
}

impl StatusPatch {
    pub fn credits(credits: u64) -> Self {
        Self {
            credits: Some(credits),
            ..Self::default()
        }
    }
}

/// A player found by [`PresenceDirectory::get_nearby_players`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyPlayer {
    pub player: PresenceRecord,
    /// Warp jumps from the search origin
    pub distance: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceStats {
    pub total: usize,
    pub active: usize,
    pub recently_active: usize,
    pub in_combat: usize,
    pub docked: usize,
}

/// Registry of every known player, keyed by username
pub struct PresenceDirectory {
    config: PresenceConfig,
    clock: Arc<dyn Clock>,
    players: AHashMap<String, PresenceRecord>,
    /// The player this directory instance runs for; hidden from sector views
    local_player: Option<String>,
}

impl PresenceDirectory {
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
            players: AHashMap::new(),
            local_player: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    pub fn local_player(&self) -> Option<&str> {
        self.local_player.as_deref()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn now(&self) -> Timestamp {
        self.clock.now_ms()
    }

    /// Insert or overwrite a player and make them the local player
    ///
    /// Counters start at zero even when overwriting an existing record.
    pub fn register_player(
        &mut self,
        username: &str,
        pilot_name: &str,
        ship: ShipSnapshot,
        current_sector: SectorId,
    ) -> &PresenceRecord {
        let now = self.now();
        let record = PresenceRecord {
            username: username.to_string(),
            pilot_name: pilot_name.to_string(),
            ship,
            current_sector,
            last_seen: now,
            kills: 0,
            deaths: 0,
            credits: 0,
            status: PlayerStatus::Active,
            joined_at: now,
        };
        tracing::info!(username, sector = %current_sector, "Player registered");

        self.local_player = Some(username.to_string());
        match self.players.entry(username.to_string()) {
            Entry::Occupied(mut slot) => {
                slot.insert(record);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(record),
        }
    }

    pub fn get_player(&self, username: &str) -> Option<&PresenceRecord> {
        self.players.get(username)
    }

    /// Move a player; unknown usernames are ignored
    pub fn update_position(&mut self, username: &str, sector: SectorId) -> bool {
        let now = self.now();
        match self.players.get_mut(username) {
            Some(player) => {
                player.current_sector = sector;
                player.touch(now);
                true
            }
            None => false,
        }
    }

    /// Set status and merge `patch`; unknown usernames are ignored
    pub fn update_status(&mut self, username: &str, status: PlayerStatus, patch: StatusPatch) -> bool {
        let now = self.now();
        let Some(player) = self.players.get_mut(username) else {
            return false;
        };

        player.status = status;
        player.touch(now);
        if let Some(credits) = patch.credits {
            player.credits = credits;
        }
        if let Some(sector) = patch.current_sector {
            player.current_sector = sector;
        }
        if let Some(ship) = patch.ship {
            player.ship = ship;
        }
        true
    }

    /// Active players in `sector`, excluding the local player
    pub fn get_players_in_sector(&mut self, sector: SectorId) -> Vec<PresenceRecord> {
        self.cleanup_inactive_players();
        self.active_in_sector(sector, self.now())
    }

    fn active_in_sector(&self, sector: SectorId, now: Timestamp) -> Vec<PresenceRecord> {
        let timeout = self.config.activity_timeout_ms;
        let mut found: Vec<PresenceRecord> = self
            .players
            .values()
            .filter(|p| p.current_sector == sector)
            .filter(|p| self.local_player.as_deref() != Some(p.username.as_str()))
            .filter(|p| p.is_active(now, timeout))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        found
    }

    /// Players in `sector`; with a location, only those docked there
    pub fn get_players_at_location(
        &mut self,
        sector: SectorId,
        location: Option<LocationKind>,
    ) -> Vec<PresenceRecord> {
        let players = self.get_players_in_sector(sector);
        match location {
            Some(_) => players
                .into_iter()
                .filter(|p| p.status == PlayerStatus::Docked)
                .collect(),
            None => players,
        }
    }

    /// Every active player, most recently seen first
    pub fn get_active_players(&mut self) -> Vec<PresenceRecord> {
        self.cleanup_inactive_players();
        let now = self.now();
        let timeout = self.config.activity_timeout_ms;

        let mut active: Vec<PresenceRecord> = self
            .players
            .values()
            .filter(|p| p.is_active(now, timeout))
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            b.last_seen
                .cmp(&a.last_seen)
                .then_with(|| a.username.cmp(&b.username))
        });
        active
    }

    /// Credit a kill; either side may be unknown
    pub fn record_kill(&mut self, attacker: &str, victim: &str) {
        let now = self.now();
        if let Some(player) = self.players.get_mut(attacker) {
            player.kills += 1;
            player.touch(now);
        }
        if let Some(player) = self.players.get_mut(victim) {
            player.deaths += 1;
            player.status = PlayerStatus::Dead;
            player.touch(now);
        }
        tracing::info!(attacker, victim, "Kill recorded");
    }

    pub fn get_leaderboard(&mut self, sort: LeaderboardSort) -> Vec<PresenceRecord> {
        let mut players = self.get_active_players();
        rank(&mut players, sort);
        players
    }

    /// Active players within `max_jumps` warps, nearest first
    pub fn get_nearby_players(
        &mut self,
        current_sector: SectorId,
        galaxy: &impl SectorGraph,
        max_jumps: u32,
    ) -> Vec<NearbyPlayer> {
        self.cleanup_inactive_players();
        let now = self.now();

        let mut nearby: Vec<NearbyPlayer> = sectors_within(galaxy, current_sector, max_jumps)
            .into_iter()
            .flat_map(|(sector, distance)| {
                self.active_in_sector(sector, now)
                    .into_iter()
                    .map(move |player| NearbyPlayer { player, distance })
            })
            .collect();
        nearby.sort_by_key(|n| n.distance);
        nearby
    }

    /// [`get_nearby_players`](Self::get_nearby_players) at the configured radius
    pub fn get_nearby_players_default(
        &mut self,
        current_sector: SectorId,
        galaxy: &impl SectorGraph,
    ) -> Vec<NearbyPlayer> {
        let max_jumps = self.config.default_max_jumps;
        self.get_nearby_players(current_sector, galaxy, max_jumps)
    }

    /// Whether a player in `attacker_sector` may attack `target`
    pub fn can_attack(
        &self,
        attacker_sector: SectorId,
        target: &PresenceRecord,
        galaxy: &impl SectorGraph,
    ) -> std::result::Result<(), AttackDenied> {
        if attacker_sector != target.current_sector {
            return Err(AttackDenied::NotInSector);
        }

        if target.status == PlayerStatus::Docked {
            let protected = galaxy
                .sector(attacker_sector)
                .is_some_and(|s| s.has_station(StationClass::Military));
            if protected {
                return Err(AttackDenied::MilitaryOutpost);
            }
        }

        if target.status == PlayerStatus::Combat {
            return Err(AttackDenied::InCombat);
        }

        Ok(())
    }

    /// Drop records unseen for longer than the purge window
    pub fn cleanup_inactive_players(&mut self) -> usize {
        let now = self.now();
        let limit = self.config.purge_after_ms();
        let before = self.players.len();
        self.players.retain(|_, p| p.age(now) <= limit);

        let purged = before - self.players.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged inactive players");
        }
        purged
    }

    pub fn get_stats(&mut self) -> PresenceStats {
        let active = self.get_active_players();
        let now = self.now();
        let recent = self.config.recent_window_ms;

        PresenceStats {
            total: self.players.len(),
            active: active.len(),
            recently_active: active.iter().filter(|p| p.age(now) < recent).count(),
            in_combat: active.iter().filter(|p| p.status == PlayerStatus::Combat).count(),
            docked: active.iter().filter(|p| p.status == PlayerStatus::Docked).count(),
        }
    }

    /// Forget every player
    pub fn reset(&mut self) {
        tracing::warn!(players = self.players.len(), "Presence directory reset");
        self.players.clear();
    }

    // === PERSISTENCE ===

    /// Serialize as a `username -> record` JSON object
    pub fn to_json(&self) -> Result<String> {
        let ordered: BTreeMap<&str, &PresenceRecord> =
            self.players.iter().map(|(k, v)| (k.as_str(), v)).collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    /// Replace every record with the contents of `json`
    pub fn replace_from_json(&mut self, json: &str) -> Result<usize> {
        let players: AHashMap<String, PresenceRecord> = serde_json::from_str(json)?;
        self.players = players;
        Ok(self.players.len())
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        store.set(STORAGE_KEY, self.to_json()?)
    }

    /// Restore from `store`; `false` when nothing was saved yet
    pub fn load(&mut self, store: &impl KeyValueStore) -> Result<bool> {
        match store.get(STORAGE_KEY)? {
            Some(json) => {
                let count = self.replace_from_json(&json)?;
                tracing::info!(players = count, "Presence directory loaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
