//! Error taxonomy and process exit codes

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;
use crate::renderer::RenderError;

/// Unreadable or malformed configuration / level data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("level {level:?}: {reason}")]
    Level { level: String, reason: String },
    #[error("bad input script line {line}: {reason}")]
    Script { line: usize, reason: String },
}

/// Anything that ends a run early
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no levels configured")]
    NoLevels,
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Distinguishable terminal signals for the host process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every level was won
    GameComplete,
    /// The player was infected
    PlayerLost,
    /// The level sequence was empty at startup
    NoLevels,
    /// Stopped by a tick limit before the game ended
    Unfinished,
    /// Configuration, asset or presentation failure
    Failure,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::GameComplete => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Unfinished => 2,
            ExitStatus::NoLevels => 99,
            ExitStatus::PlayerLost => 100,
        }
    }
}

impl From<&EngineError> for ExitStatus {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::NoLevels => ExitStatus::NoLevels,
            _ => ExitStatus::Failure,
        }
    }
}
