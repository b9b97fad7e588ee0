//! Player-vs-player battles
//!
//! Any number of battles run side by side, each addressed by its
//! [`BattleId`]. Ships are copies taken at battle start; the caller commits
//! the outcome back to canonical player state.

pub mod battle;
pub mod engine;
pub mod rewards;
pub mod tables;

use thiserror::Error;

pub use battle::{BattleId, BattleLogEntry, BattleSide, Contender, PvpBattle, Turn};
pub use engine::{BattleOutcome, PvpAttackReport, PvpEngine, PvpFleeReport};
pub use rewards::{format_credits, VictoryRewards};
pub use tables::ClassProfile;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PvpError {
    #[error("Battle not found: {0}")]
    BattleNotFound(BattleId),

    #[error("Not your turn")]
    NotYourTurn,

    #[error("{0} is not part of this battle")]
    NotParticipant(String),
}
