//! Ad Astra - combat, PvP and multiplayer presence rules

pub mod combat;
pub mod core;
pub mod presence;
pub mod pvp;
