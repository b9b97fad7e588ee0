//! PvE combat integration tests
//!
//! Drive the engine through whole encounters the way the game client does:
//! start, trade blows, close, collect rewards.

use std::sync::Arc;

use ad_astra::combat::{
    CombatEngine, CombatError, EnemyTemplate, LogKind, Outcome, Ship,
};
use ad_astra::core::{CombatConfig, ManualClock, ScriptedDice, ShipClass};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn exact_config() -> CombatConfig {
    CombatConfig {
        base_damage_pct: 100.0,
        damage_variance: 0.0,
        ..CombatConfig::default()
    }
}

#[test]
fn test_exchange_without_variance() {
    let mut engine = CombatEngine::new(exact_config(), ScriptedDice::constant(0.5));
    let mut player = Ship::new("Lancer", ShipClass::Corvette, 100, 0, 30, 1.0);
    let enemy = EnemyTemplate::new("Drone", Ship::new("Drone", ShipClass::Scout, 50, 0, 20, 1.0));

    engine.start_combat(&enemy);
    let report = engine.player_attack(&mut player).unwrap();

    assert_eq!(report.damage, 30);
    assert_eq!(report.counter_damage, Some(20));
    assert_eq!(report.outcome, Outcome::Continuing);
    assert_eq!(engine.enemy().unwrap().ship.hull, 20);
    assert_eq!(player.hull, 80);
    assert_eq!(engine.turn_count(), 1);

    let messages: Vec<&str> = engine.log().iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Combat initiated with Drone!",
            "You attack for 30 damage!",
            "Drone attacks for 20 damage!",
        ]
    );
}

#[test]
fn test_template_is_not_mutated() {
    let mut engine = CombatEngine::new(exact_config(), ScriptedDice::constant(0.5));
    let mut player = Ship::void_runner();
    let template = EnemyTemplate::pirate_raider();

    engine.start_combat(&template);
    engine.player_attack(&mut player).unwrap();

    assert_eq!(template, EnemyTemplate::pirate_raider());
    assert_ne!(engine.enemy().unwrap().ship, template.ship);
}

#[test]
fn test_fight_to_victory_then_rewards() {
    let mut engine = CombatEngine::new(exact_config(), ScriptedDice::constant(0.5));
    let mut player = Ship::nebula_hunter();
    let enemy = EnemyTemplate::new("Skiff", Ship::new("Skiff", ShipClass::Scout, 120, 40, 10, 1.0))
        .with_credits(300);

    engine.start_combat(&enemy);
    let mut outcome = Outcome::Continuing;
    while !outcome.is_terminal() {
        outcome = engine.player_attack(&mut player).unwrap().outcome;
    }

    // 160 effective hp at 100 per shot
    assert_eq!(outcome, Outcome::Victory);
    assert_eq!(engine.turn_count(), 2);
    assert_eq!(engine.log().last().unwrap().message, "Skiff destroyed!");
    assert_eq!(engine.log().last().unwrap().kind, LogKind::Success);

    // caller still has to close
    assert!(engine.is_active());
    let defeated = engine.end_combat().unwrap();
    assert!(defeated.ship.is_destroyed());
    assert!(!engine.is_active());

    let rewards = engine.calculate_rewards(&defeated);
    assert_eq!(rewards.credits, 300);
}

#[test]
fn test_defeat_is_reported_but_not_closed() {
    let mut engine = CombatEngine::new(exact_config(), ScriptedDice::constant(0.5));
    let mut player = Ship::new("Paper", ShipClass::Trader, 10, 5, 1, 1.0);
    let enemy = EnemyTemplate::new("Brute", Ship::new("Brute", ShipClass::Battleship, 500, 0, 40, 1.0));

    engine.start_combat(&enemy);
    let report = engine.player_attack(&mut player).unwrap();

    assert_eq!(report.outcome, Outcome::Defeat);
    assert_eq!(report.counter_damage, Some(15));
    assert!(player.is_destroyed());
    assert_eq!(player.shields, 0);
    assert!(engine.is_active());
}

#[test]
fn test_escape_closes_encounter() {
    // Scout flee chance 0.5 + 0.2 * 0.2 = 0.54
    let mut engine = CombatEngine::new(CombatConfig::default(), ScriptedDice::new([0.5]));
    let mut player = Ship::void_runner();
    engine.start_combat(&EnemyTemplate::pirate_raider());

    let report = engine.attempt_flee(&mut player).unwrap();

    assert!(report.escaped);
    assert_eq!(report.outcome, Outcome::Escaped);
    assert!(!engine.is_active());
    assert_eq!(player, Ship::void_runner());
    assert_eq!(engine.log().last().unwrap().message, "You successfully escape!");
}

#[test]
fn test_failed_escape_takes_a_shot() {
    let mut engine = CombatEngine::new(exact_config(), ScriptedDice::new([0.6]));
    let mut player = Ship::void_runner();
    let enemy = EnemyTemplate::new("Picket", Ship::new("Picket", ShipClass::Corvette, 80, 0, 25, 1.0));
    engine.start_combat(&enemy);

    let report = engine.attempt_flee(&mut player).unwrap();

    assert!(!report.escaped);
    assert_eq!(report.counter_damage, Some(25));
    assert_eq!(report.outcome, Outcome::Continuing);
    assert_eq!(player.shields, 25);
    assert_eq!(player.hull, 100);
    assert!(engine.is_active());

    let messages: Vec<&str> = engine.log().iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"Failed to escape!"));
}

#[test]
fn test_actions_without_encounter_fail() {
    let mut engine = CombatEngine::new(CombatConfig::default(), ScriptedDice::constant(0.5));
    let mut player = Ship::void_runner();

    assert_eq!(engine.player_attack(&mut player), Err(CombatError::NoCombatActive));
    assert_eq!(engine.attempt_flee(&mut player), Err(CombatError::NoCombatActive));
    assert_eq!(engine.enemy_attack(&mut player), Err(CombatError::NoCombatActive));
    assert!(engine.status(&player).is_none());
    assert_eq!(player, Ship::void_runner());
}

#[test]
fn test_log_stays_bounded_over_long_fight() {
    let config = CombatConfig {
        base_damage_pct: 1.0,
        damage_variance: 0.0,
        ..CombatConfig::default()
    };
    let mut engine = CombatEngine::new(config, ScriptedDice::constant(0.5));
    let mut player = Ship::new("Tank", ShipClass::Battleship, 10_000, 0, 100, 1.0);
    let enemy = EnemyTemplate::new("Wall", Ship::new("Wall", ShipClass::Battleship, 10_000, 0, 100, 1.0));
    engine.start_combat(&enemy);

    for _ in 0..30 {
        engine.player_attack(&mut player).unwrap();
    }

    assert_eq!(engine.log().len(), 20);
    assert_eq!(engine.log().last().unwrap().message, "Wall attacks for 1 damage!");
    assert_eq!(engine.turn_count(), 30);
}

#[test]
fn test_status_snapshot_and_timestamps() {
    let clock = Arc::new(ManualClock::new(5_000));
    let mut engine =
        CombatEngine::new(exact_config(), ScriptedDice::constant(0.5)).with_clock(clock.clone());
    let mut player = Ship::void_runner();
    engine.start_combat(&EnemyTemplate::pirate_raider());

    clock.advance(250);
    engine.player_attack(&mut player).unwrap();

    let status = engine.status(&player).unwrap();
    assert_eq!(status.turn_count, 1);
    assert_eq!(status.player.name, player.name);
    assert_eq!(status.log.first().unwrap().timestamp, 5_000);
    assert_eq!(status.log.last().unwrap().timestamp, 5_250);
}

#[test]
fn test_seeded_fights_are_reproducible() {
    let run = |seed: u64| {
        let mut engine = CombatEngine::new(CombatConfig::default(), ChaCha8Rng::seed_from_u64(seed));
        let mut player = Ship::deep_space_vanguard();
        engine.start_combat(&EnemyTemplate::pirate_raider());
        let mut outcomes = Vec::new();
        for _ in 0..10 {
            let outcome = engine.player_attack(&mut player).unwrap().outcome;
            outcomes.push(outcome);
            if outcome.is_terminal() {
                break;
            }
        }
        (outcomes, player.hull, player.shields)
    };

    assert_eq!(run(7), run(7));
}
