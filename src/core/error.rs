use thiserror::Error;

use crate::combat::CombatError;
use crate::pvp::PvpError;

#[derive(Error, Debug)]
pub enum AstraError {
    #[error("Combat error: {0}")]
    Combat(#[from] CombatError),

    #[error("PvP error: {0}")]
    Pvp(#[from] PvpError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AstraError>;
