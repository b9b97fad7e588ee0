//! Turn-based PvP resolution
//!
//! Each battle alternates `Attacker <-> Defender`. A destroyed ship ends the
//! battle but leaves it registered until [`PvpEngine::end_battle`]; a
//! successful escape removes it at once.

use std::sync::Arc;

use ahash::AHashMap;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::PvpConfig;
use crate::core::dice::Dice;
use crate::pvp::battle::{BattleId, BattleSide, Contender, PvpBattle, Turn};
use crate::pvp::rewards::{victory_rewards, VictoryRewards};
use crate::pvp::PvpError;

/// State of a battle after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleOutcome {
    Continuing,
    Destroyed { winner: String, loser: String },
    Escaped { username: String },
}

impl BattleOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, BattleOutcome::Continuing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvpAttackReport {
    pub hit: bool,
    pub damage: u32,
    pub outcome: BattleOutcome,
    /// Battle state after the attack
    pub battle: PvpBattle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvpFleeReport {
    pub fled: bool,
    /// Damage taken from the opponent's pursuit shot on a failed attempt
    pub pursuit_damage: Option<u32>,
    pub outcome: BattleOutcome,
    /// Battle state after the attempt (final state if it was removed)
    pub battle: PvpBattle,
}

pub struct PvpEngine<D: Dice> {
    config: PvpConfig,
    dice: D,
    clock: Arc<dyn Clock>,
    battles: AHashMap<BattleId, PvpBattle>,
}

impl<D: Dice> PvpEngine<D> {
    pub fn new(config: PvpConfig, dice: D) -> Self {
        Self {
            config,
            dice,
            clock: Arc::new(SystemClock),
            battles: AHashMap::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn battle_count(&self) -> usize {
        self.battles.len()
    }

    /// Open a battle; the attacker moves first
    pub fn initiate_combat(&mut self, attacker: &Contender, defender: &Contender) -> BattleId {
        let now = self.clock.now_ms();
        let mut battle = PvpBattle::new(attacker, defender, now);
        battle.add_log(now, format!("{} attacks {}!", attacker.pilot_name, defender.pilot_name));

        let id = battle.id.clone();
        tracing::info!(battle = %id, attacker = %attacker.username, defender = %defender.username, "PvP battle started");
        self.battles.insert(id.clone(), battle);
        id
    }

    /// Fire at the opponent; the turn passes whether or not the shot lands
    pub fn player_attack(&mut self, id: &BattleId, username: &str) -> Result<PvpAttackReport, PvpError> {
        let now = self.clock.now_ms();
        let battle = self
            .battles
            .get_mut(id)
            .ok_or_else(|| PvpError::BattleNotFound(id.clone()))?;

        let actor = battle.acting_side(username)?;
        let target = actor.opponent();
        let profile = battle.side(actor).ship.class.profile();
        let pilot = battle.side(actor).pilot_name.clone();

        let hit = self.dice.chance(profile.accuracy);
        let damage = if hit {
            let multiplier = self.config.damage_floor + self.dice.roll() * self.config.damage_spread;
            let damage = (profile.damage as f64 * multiplier).floor() as u32;
            let ship = &mut battle.side_mut(target).ship;
            ship.hull = ship.hull.saturating_sub(damage);
            battle.add_log(now, format!("{} hits for {} damage!", pilot, damage));
            damage
        } else {
            battle.add_log(now, format!("{} misses!", pilot));
            0
        };
        tracing::debug!(battle = %id, attacker = username, hit, damage, "PvP attack");

        battle.turn = battle.turn.opponent();

        let outcome = if battle.side(target).ship.is_destroyed() {
            let loser = battle.side(target).clone();
            battle.add_log(now, format!("{} has been destroyed!", loser.pilot_name));
            tracing::info!(battle = %id, winner = username, loser = %loser.username, "PvP battle won");
            BattleOutcome::Destroyed {
                winner: username.to_string(),
                loser: loser.username,
            }
        } else {
            BattleOutcome::Continuing
        };

        Ok(PvpAttackReport {
            hit,
            damage,
            outcome,
            battle: battle.clone(),
        })
    }

    /// Try to escape; failing hands the opponent a pursuit shot
    pub fn player_flee(&mut self, id: &BattleId, username: &str) -> Result<PvpFleeReport, PvpError> {
        let now = self.clock.now_ms();
        let battle = self
            .battles
            .get_mut(id)
            .ok_or_else(|| PvpError::BattleNotFound(id.clone()))?;

        let fleeing = battle.acting_side(username)?;
        let remaining = fleeing.opponent();
        let fleeing_pilot = battle.side(fleeing).pilot_name.clone();

        if self.dice.chance(battle.side(fleeing).ship.class.flee_chance()) {
            battle.add_log(now, format!("{} successfully escaped!", fleeing_pilot));
            tracing::info!(battle = %id, username, "PvP escape");
            let battle = self
                .battles
                .remove(id)
                .ok_or_else(|| PvpError::BattleNotFound(id.clone()))?;
            return Ok(PvpFleeReport {
                fled: true,
                pursuit_damage: None,
                outcome: BattleOutcome::Escaped {
                    username: username.to_string(),
                },
                battle,
            });
        }

        battle.add_log(now, format!("{} failed to escape!", fleeing_pilot));

        let pursuer = battle.side(remaining).clone();
        let damage = (pursuer.ship.class.base_damage() as f64 * self.config.pursuit_factor).floor() as u32;
        let ship = &mut battle.side_mut(fleeing).ship;
        ship.hull = ship.hull.saturating_sub(damage);
        battle.add_log(
            now,
            format!("{} lands a pursuit shot for {} damage!", pursuer.pilot_name, damage),
        );

        let outcome = if battle.side(fleeing).ship.is_destroyed() {
            battle.add_log(now, format!("{} was destroyed while fleeing!", fleeing_pilot));
            tracing::info!(battle = %id, winner = %pursuer.username, loser = username, "PvP battle won");
            BattleOutcome::Destroyed {
                winner: pursuer.username,
                loser: username.to_string(),
            }
        } else {
            battle.turn = remaining;
            BattleOutcome::Continuing
        };

        Ok(PvpFleeReport {
            fled: false,
            pursuit_damage: Some(damage),
            outcome,
            battle: battle.clone(),
        })
    }

    pub fn get_victory_rewards(&self, winner: &BattleSide, loser: &BattleSide) -> VictoryRewards {
        victory_rewards(&self.config, winner, loser)
    }

    pub fn get_battle(&self, id: &BattleId) -> Option<&PvpBattle> {
        self.battles.get(id)
    }

    /// Remove a battle, returning its final state
    pub fn end_battle(&mut self, id: &BattleId) -> Option<PvpBattle> {
        let battle = self.battles.remove(id);
        if battle.is_some() {
            tracing::debug!(battle = %id, "PvP battle closed");
        }
        battle
    }

    /// The oldest open battle naming `username` on either side
    pub fn get_player_battle(&self, username: &str) -> Option<&PvpBattle> {
        self.battles
            .values()
            .filter(|b| b.involves(username))
            .min_by(|a, b| a.started_at.cmp(&b.started_at).then_with(|| a.id.cmp(&b.id)))
    }

    pub fn battles(&self) -> impl Iterator<Item = &PvpBattle> {
        self.battles.values()
    }
}
