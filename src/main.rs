//! Ad Astra - headless combat runner
//!
//! Plays out a seeded PvE skirmish or PvP duel with the real rules engines
//! and prints the log, for balancing and play-testing without the client.

use std::path::PathBuf;
use std::sync::Arc;

use ad_astra::combat::{CombatEngine, EnemyTemplate, Outcome, Rewards, Ship};
use ad_astra::core::{Clock, GameConfig, Result, SectorId, ShipClass, ShipSnapshot, SystemClock};
use ad_astra::pvp::{BattleOutcome, Contender, PvpEngine, VictoryRewards};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "ad-astra")]
#[command(about = "Run Ad Astra combat encounters headlessly")]
struct Args {
    /// TOML file overriding the default rules
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print a JSON summary instead of the text log
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fight an NPC until someone dies or the player escapes
    Skirmish {
        #[arg(long, value_enum, default_value_t = Hull::Scout)]
        ship: Hull,

        #[arg(long, default_value_t = 80)]
        enemy_hull: u32,

        #[arg(long, default_value_t = 30)]
        enemy_shields: u32,

        #[arg(long, default_value_t = 25)]
        enemy_weapons: u32,

        /// Try to flee once hull drops below this percentage
        #[arg(long, default_value_t = 0)]
        flee_below: u32,

        #[arg(long, default_value_t = 50)]
        max_turns: u32,
    },
    /// Two players trade shots until one is destroyed or escapes
    Duel {
        /// Attacker ship class (exact name; unknown names use defaults)
        #[arg(long, default_value = "Corvette")]
        attacker: String,

        #[arg(long, default_value = "Trader")]
        defender: String,

        #[arg(long, default_value_t = 150)]
        hull: u32,

        /// Defender tries to flee once their hull drops below this value
        #[arg(long, default_value_t = 0)]
        defender_flee_below: u32,

        #[arg(long, default_value_t = 100)]
        max_turns: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Hull {
    Scout,
    Hauler,
    Hunter,
    Vanguard,
}

impl Hull {
    fn ship(self) -> Ship {
        match self {
            Hull::Scout => Ship::void_runner(),
            Hull::Hauler => Ship::star_hauler(),
            Hull::Hunter => Ship::nebula_hunter(),
            Hull::Vanguard => Ship::deep_space_vanguard(),
        }
    }
}

#[derive(Serialize)]
struct SkirmishSummary {
    seed: u64,
    outcome: Option<Outcome>,
    turns: u32,
    player: Ship,
    rewards: Option<Rewards>,
    log: Vec<String>,
}

#[derive(Serialize)]
struct DuelSummary {
    seed: u64,
    winner: Option<String>,
    escaped: Option<String>,
    turns: u32,
    rewards: Option<VictoryRewards>,
    log: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ad_astra=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(|| SystemClock.now_ms());
    tracing::info!(seed, "Ad Astra runner starting");

    match args.command {
        Command::Skirmish {
            ship,
            enemy_hull,
            enemy_shields,
            enemy_weapons,
            flee_below,
            max_turns,
        } => {
            let enemy = EnemyTemplate::new(
                "Pirate Raider",
                Ship::new("Rustbucket", ShipClass::Corvette, enemy_hull, enemy_shields, enemy_weapons, 1.0),
            );
            let summary = run_skirmish(&config, seed, ship.ship(), &enemy, flee_below, max_turns)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_log(&summary.log);
                println!(
                    "Outcome: {:?} after {} turns, hull {}/{}",
                    summary.outcome, summary.turns, summary.player.hull, summary.player.hull_max
                );
                if let Some(rewards) = &summary.rewards {
                    println!("Rewards: {} credits, cargo {:?}", rewards.credits, rewards.cargo);
                }
            }
        }
        Command::Duel {
            attacker,
            defender,
            hull,
            defender_flee_below,
            max_turns,
        } => {
            let summary = run_duel(
                &config,
                seed,
                ShipClass::from_name(&attacker),
                ShipClass::from_name(&defender),
                hull,
                defender_flee_below,
                max_turns,
            )?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_log(&summary.log);
                if let Some(rewards) = &summary.rewards {
                    println!("{}", rewards.message);
                }
            }
        }
    }

    Ok(())
}

fn print_log(lines: &[String]) {
    for line in lines {
        println!("  {}", line);
    }
}

fn run_skirmish(
    config: &GameConfig,
    seed: u64,
    mut player: Ship,
    enemy: &EnemyTemplate,
    flee_below: u32,
    max_turns: u32,
) -> Result<SkirmishSummary> {
    let mut engine = CombatEngine::new(config.combat.clone(), ChaCha8Rng::seed_from_u64(seed));
    engine.start_combat(enemy);

    let mut outcome = None;
    while engine.turn_count() < max_turns {
        let result = if player.hull_percent() < flee_below {
            engine.attempt_flee(&mut player)?.outcome
        } else {
            engine.player_attack(&mut player)?.outcome
        };
        if result.is_terminal() {
            outcome = Some(result);
            break;
        }
    }

    let turns = engine.turn_count();
    let log = engine.log().iter().map(|e| e.message.clone()).collect();
    let rewards = match outcome {
        Some(Outcome::Victory) => {
            let defeated = engine.end_combat();
            defeated.map(|enemy| engine.calculate_rewards(&enemy))
        }
        _ => {
            engine.end_combat();
            None
        }
    };

    Ok(SkirmishSummary {
        seed,
        outcome,
        turns,
        player,
        rewards,
        log,
    })
}

fn run_duel(
    config: &GameConfig,
    seed: u64,
    attacker_class: ShipClass,
    defender_class: ShipClass,
    hull: u32,
    defender_flee_below: u32,
    max_turns: u32,
) -> Result<DuelSummary> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut pvp = PvpEngine::new(config.pvp.clone(), ChaCha8Rng::seed_from_u64(seed)).with_clock(clock);

    let contender = |name: &str, class: ShipClass| Contender {
        username: name.to_lowercase(),
        pilot_name: name.to_string(),
        ship: ShipSnapshot::new(format!("{} {}", name, class), class, hull, hull),
        current_sector: SectorId(1),
    };
    let attacker = contender("Vega", attacker_class);
    let defender = contender("Rigel", defender_class);
    let id = pvp.initiate_combat(&attacker, &defender);

    let mut summary = DuelSummary {
        seed,
        winner: None,
        escaped: None,
        turns: 0,
        rewards: None,
        log: Vec::new(),
    };

    let mut acting = attacker.username.clone();
    for turn in 1..=max_turns {
        summary.turns = turn;
        let (outcome, battle) = if acting == defender.username
            && pvp
                .get_battle(&id)
                .is_some_and(|b| b.defender.ship.hull < defender_flee_below)
        {
            let report = pvp.player_flee(&id, &acting)?;
            (report.outcome, report.battle)
        } else {
            let report = pvp.player_attack(&id, &acting)?;
            (report.outcome, report.battle)
        };
        summary.log = battle.log.iter().map(|e| e.message.clone()).collect();

        match outcome {
            BattleOutcome::Continuing => {
                acting = battle.side(battle.turn).username.clone();
            }
            BattleOutcome::Destroyed { winner, loser } => {
                let (w, l) = if winner == battle.attacker.username {
                    (&battle.attacker, &battle.defender)
                } else {
                    (&battle.defender, &battle.attacker)
                };
                summary.rewards = Some(pvp.get_victory_rewards(w, l));
                tracing::info!(%winner, %loser, "Duel decided");
                summary.winner = Some(winner);
                pvp.end_battle(&id);
                break;
            }
            BattleOutcome::Escaped { username } => {
                summary.escaped = Some(username);
                break;
            }
        }
    }

    Ok(summary)
}
