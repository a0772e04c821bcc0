//! Levels and the level sequence
//!
//! A campaign is an ordered list of levels played once each, front to back.
//! Running out of levels is how a game is won, so the sequence reports it
//! with `None` rather than an error.

use std::collections::VecDeque;
use std::path::Path;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::registry::Registry;
use crate::assets::{AssetCatalog, AssetError};
use crate::error::ConfigError;
use crate::tuning::Tuning;
use crate::Bounds;

/// Built-in campaign used when no level file is given
pub const DEFAULT_CAMPAIGN: &str = include_str!("../../levels/default.json");

/// Upper bound for a spawn's random `speed`
pub const MAX_SPAWN_SPEED: f32 = 1.0e6;

/// Everything a level needs to fill the registry
pub struct PopulateContext<'a> {
    pub registry: &'a mut Registry,
    pub bounds: &'a Bounds,
    pub tuning: &'a Tuning,
    pub assets: &'a AssetCatalog,
    pub rng: &'a mut Pcg32,
}

/// A playable level (external collaborator: content is opaque to the engine)
pub trait Level: std::fmt::Debug {
    fn name(&self) -> &str;

    /// Background image name
    fn background(&self) -> &str;

    /// Every asset the level will ask for, so they can be resolved up front
    fn asset_names(&self) -> Vec<&str>;

    /// Fill the registry with the starting entities
    fn populate(&self, ctx: &mut PopulateContext<'_>) -> Result<(), AssetError>;
}

fn default_count() -> u32 {
    1
}

fn default_player_sprite() -> String {
    "warrior.png".to_string()
}

/// One line of a level's entity list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub kind: EntityKind,
    pub sprite: String,
    /// Fixed centre; scattered randomly when absent
    #[serde(default)]
    pub at: Option<[f32; 2]>,
    #[serde(default = "default_count")]
    pub count: u32,
    /// Fixed velocity; overrides `speed`
    #[serde(default)]
    pub velocity: Option<[f32; 2]>,
    /// Random velocity components drawn from `[-speed, speed]`
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub infected: bool,
    #[serde(default)]
    pub z: Option<u8>,
    #[serde(default)]
    pub size: Option<[f32; 2]>,
}

/// A data-driven level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub background: String,
    /// Sprite for the player added when `spawns` has none
    #[serde(default = "default_player_sprite")]
    pub player_sprite: String,
    #[serde(default)]
    pub spawns: Vec<SpawnSpec>,
}

impl SpawnSpec {
    /// Reject numbers the spawner cannot place or draw from
    fn check(&self) -> Result<(), String> {
        let finite = |v: [f32; 2]| v.iter().all(|c| c.is_finite());
        if !self.speed.is_finite() || self.speed < 0.0 || self.speed > MAX_SPAWN_SPEED {
            return Err(format!(
                "{} {}: speed {} outside 0..={}",
                self.kind.as_str(),
                self.sprite,
                self.speed,
                MAX_SPAWN_SPEED
            ));
        }
        if let Some(size) = self.size {
            if !finite(size) || size[0] <= 0.0 || size[1] <= 0.0 {
                return Err(format!("{} {}: bad size {:?}", self.kind.as_str(), self.sprite, size));
            }
        }
        if let Some(at) = self.at.filter(|v| !finite(*v)) {
            return Err(format!("{} {}: bad position {:?}", self.kind.as_str(), self.sprite, at));
        }
        if let Some(vel) = self.velocity.filter(|v| !finite(*v)) {
            return Err(format!("{} {}: bad velocity {:?}", self.kind.as_str(), self.sprite, vel));
        }
        Ok(())
    }
}

impl LevelDef {
    /// Check every spawn line so populating can't fail on numbers
    pub fn validate(&self) -> Result<(), ConfigError> {
        for spawn in &self.spawns {
            spawn.check().map_err(|reason| ConfigError::Level {
                level: self.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    fn spawn_one(&self, spawn: &SpawnSpec, ctx: &mut PopulateContext<'_>) -> Result<(), AssetError> {
        let sprite = ctx.assets.get(&spawn.sprite)?;
        let size = spawn
            .size
            .map(Vec2::from)
            .unwrap_or(Vec2::splat(ctx.tuning.entity_size));
        let pos = match spawn.at {
            Some(at) => Vec2::from(at),
            None => random_center(ctx.rng, ctx.bounds, size),
        };
        let vel = match spawn.velocity {
            Some(v) => Vec2::from(v),
            None if spawn.speed > 0.0 => {
                let speed = spawn.speed.min(MAX_SPAWN_SPEED);
                Vec2::new(
                    ctx.rng.random_range(-speed..=speed),
                    ctx.rng.random_range(-speed..=speed),
                )
            }
            None => Vec2::ZERO,
        };

        let mut entity = Entity::new(spawn.kind, ctx.bounds.clamp_center(pos, size), size, sprite)
            .with_velocity(vel)
            .with_infection(spawn.infected);
        if let Some(z) = spawn.z {
            entity = entity.with_z(z);
        }
        ctx.registry.spawn(entity);
        Ok(())
    }
}

/// Uniform centre that keeps a box of `size` inside the playfield
fn random_center(rng: &mut Pcg32, bounds: &Bounds, size: Vec2) -> Vec2 {
    let half = size * 0.5;
    let (min_x, max_x) = (bounds.left + half.x, bounds.right - half.x);
    let (min_y, max_y) = (bounds.top + half.y, bounds.bottom - half.y);
    let span = Vec2::new(max_x - min_x, max_y - min_y);
    if !(span.x > 0.0 && span.y > 0.0) || !(span.max_element() < f32::MAX / 2.0) {
        return bounds.center();
    }
    Vec2::new(rng.random_range(min_x..max_x), rng.random_range(min_y..max_y))
}

impl Level for LevelDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn background(&self) -> &str {
        &self.background
    }

    fn asset_names(&self) -> Vec<&str> {
        let mut names = vec![self.background.as_str(), self.player_sprite.as_str()];
        names.extend(self.spawns.iter().map(|s| s.sprite.as_str()));
        names
    }

    fn populate(&self, ctx: &mut PopulateContext<'_>) -> Result<(), AssetError> {
        for spawn in &self.spawns {
            for _ in 0..spawn.count {
                if spawn.kind == EntityKind::Player && ctx.registry.player().is_some() {
                    log::warn!("level {}: extra player spawn ignored", self.name);
                    continue;
                }
                self.spawn_one(spawn, ctx)?;
            }
        }

        if ctx.registry.player().is_none() {
            let sprite = ctx.assets.get(&self.player_sprite)?;
            let size = Vec2::splat(ctx.tuning.entity_size);
            ctx.registry.spawn(Entity::new(
                EntityKind::Player,
                ctx.bounds.center(),
                size,
                sprite,
            ));
        }

        log::debug!("level {} populated with {} entities", self.name, ctx.registry.len());
        Ok(())
    }
}

/// On-disk campaign format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
    pub levels: Vec<LevelDef>,
}

impl Campaign {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let campaign: Self = serde_json::from_str(json)?;
        campaign.validate()?;
        Ok(campaign)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let campaign: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        campaign.validate()?;
        log::info!("Loaded {} levels from {}", campaign.levels.len(), path.display());
        Ok(campaign)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.levels.iter().try_for_each(LevelDef::validate)
    }

    /// The built-in campaign
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_CAMPAIGN)
    }
}

/// Ordered, non-restartable level queue
#[derive(Debug, Default)]
pub struct LevelSequence {
    pending: VecDeque<Box<dyn Level>>,
    started: u32,
}

impl LevelSequence {
    pub fn new(levels: Vec<Box<dyn Level>>) -> Self {
        Self {
            pending: levels.into(),
            started: 0,
        }
    }

    /// Take the next level; `None` once the sequence is exhausted
    pub fn next_level(&mut self) -> Option<Box<dyn Level>> {
        let level = self.pending.pop_front()?;
        self.started += 1;
        Some(level)
    }

    /// Levels not yet started
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Levels handed out so far
    pub fn started(&self) -> u32 {
        self.started
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Level> {
        self.pending.iter().map(|l| l.as_ref())
    }
}

impl From<Campaign> for LevelSequence {
    fn from(campaign: Campaign) -> Self {
        Self::new(
            campaign
                .levels
                .into_iter()
                .map(|l| Box::new(l) as Box<dyn Level>)
                .collect(),
        )
    }
}
