//! Multiplayer presence
//!
//! Tracks who is online, where they are, and how they are doing. Records
//! age out of "active" views after the activity timeout and are purged
//! after a much longer grace period.

pub mod directory;
pub mod galaxy;
pub mod leaderboard;
pub mod nearby;
pub mod persistence;
pub mod record;

use thiserror::Error;

pub use directory::{LocationKind, NearbyPlayer, PresenceDirectory, PresenceStats, StatusPatch};
pub use galaxy::{Galaxy, Sector, SectorContent, SectorGraph, StationClass};
pub use leaderboard::LeaderboardSort;
pub use nearby::sectors_within;
pub use persistence::{FileStore, KeyValueStore, MemoryStore, STORAGE_KEY};
pub use record::{PlayerStatus, PresenceRecord};

/// Why an attack on another player is not allowed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttackDenied {
    #[error("Target not in your sector")]
    NotInSector,

    #[error("Cannot attack at military outpost")]
    MilitaryOutpost,

    #[error("Target already in combat")]
    InCombat,
}
