//! Z-ordered frame snapshot
//!
//! Captured between ticks, after which the simulation may change freely:
//! the snapshot owns copies of everything it shows.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::SpriteId;
use crate::sim::{EntityId, EntityKind, GamePhase, GameState};

/// One sprite to paint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawItem {
    pub id: EntityId,
    pub kind: EntityKind,
    pub sprite: SpriteId,
    pub center: Vec2,
    pub size: Vec2,
    pub z: u8,
    pub infected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub score: u64,
    pub phase: GamePhase,
    pub level_name: String,
    /// Background image name for the current level
    pub background: String,
    /// Ascending z; later items paint over earlier ones
    pub items: Vec<DrawItem>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let items = state
            .registry
            .z_sorted()
            .into_iter()
            .map(|e| DrawItem {
                id: e.id,
                kind: e.kind,
                sprite: e.sprite,
                center: e.pos(),
                size: e.size(),
                z: e.z(),
                infected: e.infected(),
            })
            .collect();

        let level = state.current_level();
        Self {
            tick: state.time_ticks,
            score: state.score(),
            phase: state.phase,
            level_name: level.name().to_string(),
            background: level.background().to_string(),
            items,
        }
    }

    /// HUD text
    pub fn score_line(&self) -> String {
        format!("Score: {}", self.score)
    }
}
