//! Per-tick movement and the playfield boundary policy
//!
//! Players clamp to the edge and keep their velocity, so they can always be
//! steered back. Everything else stops dead: velocity is zeroed and the step
//! that would have crossed the edge is discarded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::registry::Registry;
use crate::Bounds;

/// Abstract directional command from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Stopped,
}

impl Direction {
    /// Unit step in screen space (y grows downward)
    pub fn unit(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Stopped => Vec2::ZERO,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Stopped => "stopped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "stopped" | "stop" | "s" => Some(Direction::Stopped),
            _ => None,
        }
    }
}

/// Point the player along the held direction
pub fn steer_player(registry: &mut Registry, direction: Direction, speed: f32) {
    if let Some(player) = registry.player_mut() {
        player.vel = direction.unit() * speed;
    }
}

/// Advance every live entity by its velocity
pub fn move_all(registry: &mut Registry, bounds: &Bounds) {
    for entity in registry.iter_mut() {
        let next = entity.pos() + entity.vel;
        if entity.player_controlled() {
            entity.set_pos(bounds.clamp_center(next, entity.size()));
        } else if Aabb::from_center(next, entity.size()).inside(bounds) {
            entity.set_pos(next);
        } else if entity.vel != Vec2::ZERO {
            log::trace!("{:?} {} froze at the edge", entity.kind, entity.id);
            entity.vel = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteId;
    use crate::sim::entity::{Entity, EntityKind};

    fn bounds() -> Bounds {
        Bounds::new(0.0, 100.0, 500.0, 400.0)
    }

    fn spawn(reg: &mut Registry, kind: EntityKind, pos: Vec2, vel: Vec2) -> crate::sim::EntityId {
        reg.spawn(Entity::new(kind, pos, Vec2::splat(20.0), SpriteId(0)).with_velocity(vel))
    }

    #[test]
    fn test_free_movement() {
        let mut reg = Registry::new();
        let id = spawn(&mut reg, EntityKind::Wanderer, Vec2::new(200.0, 200.0), Vec2::new(5.0, -3.0));
        move_all(&mut reg, &bounds());
        let e = reg.get(id).unwrap();
        assert_eq!(e.pos(), Vec2::new(205.0, 197.0));
        assert_eq!(e.hitbox().left, 195.0);
    }

    #[test]
    fn test_npc_freezes_at_edge() {
        let mut reg = Registry::new();
        // Right edge of hitbox at 485, step of 20 would reach 505
        let id = spawn(&mut reg, EntityKind::Hazard, Vec2::new(475.0, 200.0), Vec2::new(20.0, 0.0));
        move_all(&mut reg, &bounds());
        let e = reg.get(id).unwrap();
        assert_eq!(e.pos(), Vec2::new(475.0, 200.0));
        assert_eq!(e.vel, Vec2::ZERO);

        // Stays put afterwards
        move_all(&mut reg, &bounds());
        assert_eq!(reg.get(id).unwrap().pos(), Vec2::new(475.0, 200.0));
    }

    #[test]
    fn test_player_clamps_and_keeps_velocity() {
        let mut reg = Registry::new();
        let id = spawn(&mut reg, EntityKind::Player, Vec2::new(250.0, 115.0), Vec2::new(0.0, -25.0));
        move_all(&mut reg, &bounds());
        let p = reg.get(id).unwrap();
        assert_eq!(p.pos(), Vec2::new(250.0, 110.0));
        assert_eq!(p.hitbox().top, 100.0);
        assert_eq!(p.vel, Vec2::new(0.0, -25.0));
    }

    #[test]
    fn test_steer_player() {
        let mut reg = Registry::new();
        let id = spawn(&mut reg, EntityKind::Player, Vec2::new(250.0, 250.0), Vec2::ZERO);
        steer_player(&mut reg, Direction::Left, 25.0);
        assert_eq!(reg.get(id).unwrap().vel, Vec2::new(-25.0, 0.0));
        steer_player(&mut reg, Direction::Stopped, 25.0);
        assert_eq!(reg.get(id).unwrap().vel, Vec2::ZERO);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
        assert_eq!(Direction::from_str("r"), Some(Direction::Right));
        assert_eq!(Direction::from_str("sideways"), None);
        assert_eq!(Direction::from_str(Direction::Down.as_str()), Some(Direction::Down));
    }
}
