//! Player-vs-environment combat
//!
//! One encounter at a time: the player trades blows with a cloned enemy
//! until someone's hull hits zero or the player escapes.

pub mod constants;
pub mod damage;
pub mod engine;
pub mod log;
pub mod rewards;
pub mod ship;

use thiserror::Error;

pub use damage::{apply_damage, calculate_damage, DamageReport};
pub use engine::{
    AttackReport, CombatEngine, CombatState, CombatStatus, CombatantStatus, EnemyAction,
    FleeReport, Outcome, Strike,
};
pub use log::{CombatLog, LogEntry, LogKind};
pub use rewards::{CargoDrop, Commodity, Rewards};
pub use ship::{EnemyTemplate, Ship};

/// Precondition failures for PvE actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("No combat active")]
    NoCombatActive,
}
