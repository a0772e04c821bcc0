//! Contagion - a fixed-timestep 2D infection arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, touch rules, game state)
//! - `renderer`: Z-ordered frame snapshots and the adapters that present them
//! - `platform`: Fixed-rate clock, shared input, scripted input
//! - `assets`: Sprite name resolution
//! - `settings` / `tuning`: Data-driven configuration and game balance

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, EngineError, ExitStatus};
pub use settings::{RenderMode, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation period in milliseconds (20 Hz)
    pub const TICK_PERIOD_MS: u64 = 50;
    /// Maximum ticks run per clock wake-up to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1280.0;
    pub const PLAYFIELD_HEIGHT: f32 = 720.0;
    /// Strip at the top of the screen reserved for the score HUD
    pub const SCOREBOARD_HEIGHT: f32 = 100.0;

    /// Draw order range (lower paints first)
    pub const Z_MIN: u8 = 1;
    pub const Z_MAX: u8 = 20;

    /// Default sprite footprint
    pub const ENTITY_SIZE: f32 = 80.0;
    /// Player movement per tick while a direction is held
    pub const PLAYER_SPEED: f32 = 25.0;
    /// Points awarded per collectible
    pub const COLLECTIBLE_BONUS: u64 = 100;
    /// Velocity multiplier applied to every non-player per collectible
    pub const SPEED_UP_FACTOR: f32 = 2.0;
}

/// Axis-aligned playfield rectangle (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Playfield below a scoreboard strip of the given height
    pub fn below_scoreboard(width: f32, height: f32, scoreboard: f32) -> Self {
        Self::new(0.0, scoreboard, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Clamp a centre point so a box of `size` stays fully inside.
    /// Boxes larger than the playfield are pinned to the top-left edge.
    pub fn clamp_center(&self, center: Vec2, size: Vec2) -> Vec2 {
        let half = size * 0.5;
        let min = Vec2::new(self.left + half.x, self.top + half.y);
        let max = Vec2::new(self.right - half.x, self.bottom - half.y);
        Vec2::new(
            center.x.min(max.x).max(min.x),
            center.y.min(max.y).max(min.y),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::below_scoreboard(
            consts::PLAYFIELD_WIDTH,
            consts::PLAYFIELD_HEIGHT,
            consts::SCOREBOARD_HEIGHT,
        )
    }
}
