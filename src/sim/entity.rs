//! Entities and their geometry
//!
//! Position is the centre of the sprite. The hitbox is cached and refreshed
//! by every method that moves the entity, so it never lags the position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::assets::SpriteId;
use crate::consts::{Z_MAX, Z_MIN};

/// Registry-assigned identity (never reused within a run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entity kinds. Touch behavior is dispatched on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// The human-controlled warrior
    Player,
    /// Coins: consumed by the player, all must be gone to clear a level
    Collectible,
    /// Carriers that usually start infected
    Hazard,
    /// Bystanders that drift around and catch infection on contact
    Wanderer,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Collectible => "collectible",
            EntityKind::Hazard => "hazard",
            EntityKind::Wanderer => "wanderer",
        }
    }
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pos: Vec2,
    pub vel: Vec2,
    size: Vec2,
    hitbox: Aabb,
    z: u8,
    infected: bool,
    player_controlled: bool,
    pub sprite: SpriteId,
}

impl Entity {
    /// Create an entity centred at `pos`. The id is a placeholder until the
    /// registry adopts the entity.
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, sprite: SpriteId) -> Self {
        let player_controlled = kind == EntityKind::Player;
        Self {
            id: EntityId(0),
            kind,
            pos,
            vel: Vec2::ZERO,
            size,
            hitbox: Aabb::from_center(pos, size),
            z: if player_controlled { Z_MAX } else { Z_MIN },
            infected: false,
            player_controlled,
            sprite,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Set draw order, clamped to the valid range. Players stay on top.
    pub fn with_z(mut self, z: u8) -> Self {
        if !self.player_controlled {
            self.z = z.clamp(Z_MIN, Z_MAX);
        }
        self
    }

    pub fn with_infection(mut self, infected: bool) -> Self {
        self.infected = infected;
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn hitbox(&self) -> &Aabb {
        &self.hitbox
    }

    #[inline]
    pub fn z(&self) -> u8 {
        self.z
    }

    #[inline]
    pub fn infected(&self) -> bool {
        self.infected
    }

    #[inline]
    pub fn player_controlled(&self) -> bool {
        self.player_controlled
    }

    /// Move the centre and refresh the hitbox
    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hitbox = Aabb::from_center(pos, self.size);
    }

    /// Infection is one-way: there is no way to clear it.
    pub fn infect(&mut self) {
        self.infected = true;
    }

    /// Scale both velocity components
    pub fn speed_up(&mut self, factor: f32) {
        self.vel *= factor;
    }
}
