pub mod clock;
pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::{CombatConfig, GameConfig, PresenceConfig, PvpConfig};
pub use dice::{Dice, ScriptedDice};
pub use error::{AstraError, Result};
pub use types::{SectorId, ShipClass, ShipSnapshot};
