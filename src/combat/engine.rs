//! PvE encounter state machine
//!
//! `Idle -> Active -> Idle`. Victory leaves the encounter active so the
//! caller can read the final enemy state; it must call
//! [`CombatEngine::end_combat`] to close it. A successful escape closes the
//! encounter immediately.

use std::sync::Arc;

use serde::Serialize;

use crate::combat::damage::{apply_damage, calculate_damage};
use crate::combat::log::{CombatLog, LogEntry, LogKind};
use crate::combat::rewards::{roll_rewards, Rewards};
use crate::combat::ship::{EnemyTemplate, Ship};
use crate::combat::CombatError;
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::CombatConfig;
use crate::core::dice::Dice;
use crate::core::types::ShipClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    Idle,
    Active,
}

/// How a player turn left the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Continuing,
    Victory,
    Defeat,
    Escaped,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continuing)
    }
}

/// What the enemy does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    Attack,
}

/// Result of a player attack (and the enemy's reply, if it survived)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub damage: u32,
    pub counter_damage: Option<u32>,
    pub outcome: Outcome,
}

/// Result of a single enemy attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub player_destroyed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleeReport {
    pub escaped: bool,
    pub counter_damage: Option<u32>,
    pub outcome: Outcome,
}

/// One side of a status readout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatantStatus {
    pub name: String,
    pub class: ShipClass,
    pub hull: u32,
    pub hull_max: u32,
    pub hull_percent: u32,
    pub shields: u32,
    pub shields_max: u32,
    pub shields_percent: u32,
    pub weapons: u32,
}

impl CombatantStatus {
    fn of(name: &str, ship: &Ship) -> Self {
        Self {
            name: name.to_string(),
            class: ship.class.clone(),
            hull: ship.hull,
            hull_max: ship.hull_max,
            hull_percent: ship.hull_percent(),
            shields: ship.shields,
            shields_max: ship.shields_max,
            shields_percent: ship.shields_percent(),
            weapons: ship.weapons,
        }
    }
}

/// Read-only snapshot of an active encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatStatus {
    pub turn_count: u32,
    pub player: CombatantStatus,
    pub enemy: CombatantStatus,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Clone)]
struct Encounter {
    enemy: EnemyTemplate,
    turn_count: u32,
}

pub struct CombatEngine<D: Dice> {
    config: CombatConfig,
    dice: D,
    clock: Arc<dyn Clock>,
    encounter: Option<Encounter>,
    log: CombatLog,
}

impl<D: Dice> CombatEngine<D> {
    pub fn new(config: CombatConfig, dice: D) -> Self {
        let log = CombatLog::new(config.log_capacity);
        Self {
            config,
            dice,
            clock: Arc::new(SystemClock),
            encounter: None,
            log,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn state(&self) -> CombatState {
        if self.encounter.is_some() {
            CombatState::Active
        } else {
            CombatState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn turn_count(&self) -> u32 {
        self.encounter.as_ref().map_or(0, |e| e.turn_count)
    }

    /// The engine's private copy of the opponent
    pub fn enemy(&self) -> Option<&EnemyTemplate> {
        self.encounter.as_ref().map(|e| &e.enemy)
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Begin an encounter against a copy of `template`
    ///
    /// Replaces any encounter already in progress.
    pub fn start_combat(&mut self, template: &EnemyTemplate) {
        tracing::info!(enemy = %template.name, "Combat started");
        self.encounter = Some(Encounter {
            enemy: template.clone(),
            turn_count: 0,
        });
        self.log.clear();
        self.record(format!("Combat initiated with {}!", template.name), LogKind::Warning);
    }

    /// Close the encounter, handing back the final enemy state
    pub fn end_combat(&mut self) -> Option<EnemyTemplate> {
        let encounter = self.encounter.take()?;
        tracing::info!(enemy = %encounter.enemy.name, turns = encounter.turn_count, "Combat ended");
        Some(encounter.enemy)
    }

    /// Player fires, then a surviving enemy fires back
    pub fn player_attack(&mut self, player: &mut Ship) -> Result<AttackReport, CombatError> {
        if self.encounter.is_none() {
            return Err(CombatError::NoCombatActive);
        }

        let roll = calculate_damage(&self.config, player.weapons, &mut self.dice);
        let (damage, enemy_name, enemy_destroyed) = {
            let encounter = self.encounter.as_mut().ok_or(CombatError::NoCombatActive)?;
            let report = apply_damage(&mut encounter.enemy.ship, roll);
            encounter.turn_count += 1;
            (
                report.total(),
                encounter.enemy.name.clone(),
                encounter.enemy.ship.is_destroyed(),
            )
        };
        self.record(format!("You attack for {} damage!", damage), LogKind::Info);
        tracing::debug!(damage, enemy = %enemy_name, "Player attack");

        if enemy_destroyed {
            self.record(format!("{} destroyed!", enemy_name), LogKind::Success);
            tracing::info!(enemy = %enemy_name, "Enemy destroyed");
            return Ok(AttackReport {
                damage,
                counter_damage: None,
                outcome: Outcome::Victory,
            });
        }

        let strike = match self.enemy_decision() {
            EnemyAction::Attack => self.enemy_attack(player)?,
        };

        Ok(AttackReport {
            damage,
            counter_damage: Some(strike.damage),
            outcome: if strike.player_destroyed {
                Outcome::Defeat
            } else {
                Outcome::Continuing
            },
        })
    }

    /// Enemy fires at the player
    pub fn enemy_attack(&mut self, player: &mut Ship) -> Result<Strike, CombatError> {
        let (weapons, name) = self
            .encounter
            .as_ref()
            .map(|e| (e.enemy.ship.weapons, e.enemy.name.clone()))
            .ok_or(CombatError::NoCombatActive)?;

        let roll = calculate_damage(&self.config, weapons, &mut self.dice);
        let damage = apply_damage(player, roll).total();
        self.record(format!("{} attacks for {} damage!", name, damage), LogKind::Error);

        let player_destroyed = player.is_destroyed();
        if player_destroyed {
            tracing::info!(enemy = %name, "Player ship destroyed");
        }

        Ok(Strike {
            damage,
            player_destroyed,
        })
    }

    /// Chance that `ship` escapes, capped at `max_flee_chance`
    pub fn flee_probability(&self, ship: &Ship) -> f64 {
        let speed_bonus = (ship.speed - 1.0) * self.config.speed_flee_bonus;
        (self.config.flee_chance + speed_bonus)
            .min(self.config.max_flee_chance)
            .max(0.0)
    }

    /// Try to break off; a failed attempt gives the enemy a free shot
    pub fn attempt_flee(&mut self, player: &mut Ship) -> Result<FleeReport, CombatError> {
        if self.encounter.is_none() {
            return Err(CombatError::NoCombatActive);
        }

        let chance = self.flee_probability(player);
        if self.dice.chance(chance) {
            self.record("You successfully escape!", LogKind::Success);
            self.end_combat();
            return Ok(FleeReport {
                escaped: true,
                counter_damage: None,
                outcome: Outcome::Escaped,
            });
        }

        self.record("Failed to escape!", LogKind::Warning);
        if let Some(encounter) = self.encounter.as_mut() {
            encounter.turn_count += 1;
        }

        let strike = self.enemy_attack(player)?;
        Ok(FleeReport {
            escaped: false,
            counter_damage: Some(strike.damage),
            outcome: if strike.player_destroyed {
                Outcome::Defeat
            } else {
                Outcome::Continuing
            },
        })
    }

    /// Roll the payout for beating `enemy`; independent of encounter state
    pub fn calculate_rewards(&mut self, enemy: &EnemyTemplate) -> Rewards {
        roll_rewards(&self.config, enemy, &mut self.dice)
    }

    /// Simple AI: always attacks
    pub fn enemy_decision(&self) -> EnemyAction {
        EnemyAction::Attack
    }

    pub fn status(&self, player: &Ship) -> Option<CombatStatus> {
        let encounter = self.encounter.as_ref()?;
        Some(CombatStatus {
            turn_count: encounter.turn_count,
            player: CombatantStatus::of(&player.name, player),
            enemy: CombatantStatus::of(&encounter.enemy.name, &encounter.enemy.ship),
            log: self.log.to_vec(),
        })
    }

    fn record(&mut self, message: impl Into<String>, kind: LogKind) {
        let now = self.clock.now_ms();
        self.log.push(now, message, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::dice::ScriptedDice;

    fn exact_engine(dice: ScriptedDice) -> CombatEngine<ScriptedDice> {
        let config = CombatConfig {
            base_damage_pct: 100.0,
            damage_variance: 0.0,
            ..CombatConfig::default()
        };
        CombatEngine::new(config, dice).with_clock(Arc::new(ManualClock::new(1_000)))
    }

    fn glass_enemy(hull: u32, weapons: u32) -> EnemyTemplate {
        EnemyTemplate::new("Drone", Ship::new("Drone", ShipClass::Scout, hull, 0, weapons, 1.0))
    }

    #[test]
    fn test_actions_require_active_combat() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let mut player = Ship::void_runner();

        assert_eq!(engine.state(), CombatState::Idle);
        assert_eq!(engine.player_attack(&mut player), Err(CombatError::NoCombatActive));
        assert_eq!(engine.enemy_attack(&mut player), Err(CombatError::NoCombatActive));
        assert_eq!(engine.attempt_flee(&mut player), Err(CombatError::NoCombatActive));
        assert!(engine.status(&player).is_none());
        assert_eq!(player, Ship::void_runner());
    }

    #[test]
    fn test_template_is_not_mutated() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let template = glass_enemy(50, 5);
        let mut player = Ship::new("P", ShipClass::Scout, 100, 0, 30, 1.0);

        engine.start_combat(&template);
        engine.player_attack(&mut player).unwrap();

        assert_eq!(template.ship.hull, 50);
        assert_eq!(engine.enemy().unwrap().ship.hull, 20);
    }

    #[test]
    fn test_victory_keeps_encounter_open() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let mut player = Ship::new("P", ShipClass::Scout, 100, 0, 60, 1.0);
        engine.start_combat(&glass_enemy(50, 5));

        let report = engine.player_attack(&mut player).unwrap();
        assert_eq!(report.outcome, Outcome::Victory);
        assert_eq!(report.counter_damage, None);
        assert_eq!(player.hull, 100);
        assert_eq!(engine.state(), CombatState::Active);
        assert_eq!(engine.status(&player).unwrap().enemy.hull, 0);

        let final_enemy = engine.end_combat().unwrap();
        assert!(final_enemy.ship.is_destroyed());
        assert_eq!(engine.state(), CombatState::Idle);
    }

    #[test]
    fn test_counter_attack_can_destroy_player() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let mut player = Ship::new("P", ShipClass::Scout, 10, 0, 1, 1.0);
        engine.start_combat(&glass_enemy(50, 40));

        let report = engine.player_attack(&mut player).unwrap();
        assert_eq!(report.outcome, Outcome::Defeat);
        assert_eq!(report.counter_damage, Some(10));
        assert!(player.is_destroyed());
    }

    #[test]
    fn test_flee_probability_scales_with_speed() {
        let engine = exact_engine(ScriptedDice::constant(0.5));
        let mut ship = Ship::void_runner();

        ship.speed = 1.0;
        assert!((engine.flee_probability(&ship) - 0.5).abs() < 1e-9);
        ship.speed = 1.5;
        assert!((engine.flee_probability(&ship) - 0.6).abs() < 1e-9);
        ship.speed = 10.0;
        assert!((engine.flee_probability(&ship) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_successful_flee_closes_encounter() {
        let mut engine = exact_engine(ScriptedDice::new([0.1]));
        let mut player = Ship::void_runner();
        engine.start_combat(&glass_enemy(50, 5));

        let report = engine.attempt_flee(&mut player).unwrap();
        assert!(report.escaped);
        assert_eq!(report.outcome, Outcome::Escaped);
        assert_eq!(engine.state(), CombatState::Idle);
        assert_eq!(engine.log().last().unwrap().message, "You successfully escape!");
    }

    #[test]
    fn test_failed_flee_grants_free_shot() {
        let mut engine = exact_engine(ScriptedDice::new([0.95]));
        let mut player = Ship::new("P", ShipClass::Scout, 100, 0, 10, 1.0);
        engine.start_combat(&glass_enemy(50, 7));

        let report = engine.attempt_flee(&mut player).unwrap();
        assert!(!report.escaped);
        assert_eq!(report.counter_damage, Some(7));
        assert_eq!(report.outcome, Outcome::Continuing);
        assert_eq!(player.hull, 93);
        assert_eq!(engine.turn_count(), 1);
        assert!(engine.is_active());
    }

    #[test]
    fn test_log_is_bounded() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let mut player = Ship::new("P", ShipClass::Scout, 10_000, 0, 1, 1.0);
        engine.start_combat(&glass_enemy(10_000, 1));

        for _ in 0..30 {
            engine.player_attack(&mut player).unwrap();
        }
        assert_eq!(engine.log().len(), 20);
        assert_eq!(engine.turn_count(), 30);
    }

    #[test]
    fn test_start_combat_resets_log_and_turns() {
        let mut engine = exact_engine(ScriptedDice::constant(0.5));
        let mut player = Ship::new("P", ShipClass::Scout, 100, 0, 1, 1.0);
        engine.start_combat(&glass_enemy(100, 1));
        engine.player_attack(&mut player).unwrap();

        engine.start_combat(&glass_enemy(100, 1));
        assert_eq!(engine.turn_count(), 0);
        assert_eq!(engine.log().len(), 1);
        assert_eq!(engine.log().last().unwrap().timestamp, 1_000);
    }
}
