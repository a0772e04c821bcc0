//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod movement;
pub mod registry;
pub mod score;
pub mod state;
pub mod tick;
pub mod touch;

pub use collision::{Aabb, overlaps};
pub use entity::{Entity, EntityId, EntityKind};
pub use level::{Campaign, Level, LevelDef, LevelSequence, PopulateContext, SpawnSpec};
pub use movement::Direction;
pub use registry::Registry;
pub use score::{ScoreTracker, Verdict};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use touch::{ScanReport, TouchContext, collide_all, resolve_touch};
