//! Host settings
//!
//! Read from a JSON file; any field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Bounds;
use crate::consts::*;
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// How frames are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Character grid on stdout
    #[default]
    Ascii,
    /// One log line per frame
    Log,
    /// No presentation
    None,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Ascii => "ascii",
            RenderMode::Log => "log",
            RenderMode::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ascii" | "text" => Some(RenderMode::Ascii),
            "log" => Some(RenderMode::Log),
            "none" | "off" => Some(RenderMode::None),
            _ => None,
        }
    }
}

/// Terminal frame settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Grid columns covering the playfield width
    pub columns: usize,
    /// Grid rows covering the playfield height
    pub rows: usize,
    /// Present every Nth frame (1 = every frame)
    pub every: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Ascii,
            columns: 64,
            rows: 24,
            every: 1,
        }
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Milliseconds per tick
    pub tick_period_ms: u64,
    /// Ticks allowed per clock wake-up when running behind
    pub max_substeps: u32,
    /// Area entities live in (below the scoreboard)
    pub playfield: Bounds,
    /// Seed for level layouts
    pub seed: u64,
    /// Stop after this many ticks (0 = run until the game ends)
    pub max_ticks: u64,
    pub render: RenderSettings,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,
            max_substeps: MAX_SUBSTEPS,
            playfield: Bounds::default(),
            seed: 0x5EED,
            max_ticks: 0,
            render: RenderSettings::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_period_ms.max(1))
    }
}
