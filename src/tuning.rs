//! Data-driven game balance
//!
//! Loaded as part of [`crate::Settings`]; every field falls back to the
//! compiled-in constant when absent.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player displacement per tick while a direction is held
    pub player_speed: f32,
    /// Points per collectible eaten
    pub collectible_bonus: u64,
    /// Multiplier applied to every non-player velocity per collectible
    pub speed_up_factor: f32,
    /// Sprite footprint used when a spawn does not give one
    pub entity_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            collectible_bonus: COLLECTIBLE_BONUS,
            speed_up_factor: SPEED_UP_FACTOR,
            entity_size: ENTITY_SIZE,
        }
    }
}
