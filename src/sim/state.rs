//! Game state and core simulation types
//!
//! One `GameState` per run. It owns everything the tick mutates, and is
//! passed around explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::level::{Level, LevelSequence, PopulateContext};
use super::registry::Registry;
use super::score::ScoreTracker;
use crate::assets::{AssetCatalog, AssetLoader};
use crate::error::EngineError;
use crate::settings::Settings;
use crate::tuning::Tuning;
use crate::Bounds;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every collectible is gone; the next level is about to start
    WonLevel,
    /// The player is infected (terminal)
    Lost,
    /// The last level was won (terminal)
    GameComplete,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Lost | GamePhase::GameComplete)
    }
}

/// Things that happened during a tick, for logging and HUD hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { index: u32, name: String },
    Infected { id: EntityId, by: EntityId },
    CollectibleConsumed { id: EntityId, points: u64 },
    SpeedUp { factor: f32, boosted: usize },
    LevelWon { index: u32 },
    PlayerLost { score: u64 },
    GameComplete { score: u64 },
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducible level layouts
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: Bounds,
    pub tuning: Tuning,
    pub registry: Registry,
    pub tracker: ScoreTracker,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Index of the level being played (0-based)
    pub level_index: u32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    current_level: Box<dyn Level>,
    levels: LevelSequence,
    assets: AssetCatalog,
}

impl GameState {
    /// Resolve every level's assets, then start the first level.
    ///
    /// Fails with [`EngineError::NoLevels`] on an empty sequence and with
    /// [`EngineError::Asset`] if any name does not resolve.
    pub fn new(
        settings: &Settings,
        mut levels: LevelSequence,
        loader: &mut dyn AssetLoader,
    ) -> Result<Self, EngineError> {
        let mut assets = AssetCatalog::new();
        for level in levels.iter() {
            for name in level.asset_names() {
                assets.resolve(loader, name)?;
            }
        }

        let first = levels.next_level().ok_or(EngineError::NoLevels)?;
        let seed = settings.seed;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds: settings.playfield,
            tuning: settings.tuning.clone(),
            registry: Registry::new(),
            tracker: ScoreTracker::new(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            level_index: 0,
            events: Vec::new(),
            current_level: first,
            levels,
            assets,
        };
        state.activate_current()?;
        Ok(state)
    }

    pub fn current_level(&self) -> &dyn Level {
        self.current_level.as_ref()
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    /// Levels still queued after the current one
    pub fn levels_remaining(&self) -> usize {
        self.levels.remaining()
    }

    pub fn score(&self) -> u64 {
        self.tracker.score()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move on to the next level. Returns false when the sequence is
    /// exhausted, leaving the current level in place.
    pub fn advance_level(&mut self) -> Result<bool, EngineError> {
        let Some(next) = self.levels.next_level() else {
            return Ok(false);
        };
        self.current_level = next;
        self.level_index += 1;
        self.activate_current()?;
        Ok(true)
    }

    /// Clear the registry and populate it from the current level
    fn activate_current(&mut self) -> Result<(), EngineError> {
        self.registry.clear();
        let mut ctx = PopulateContext {
            registry: &mut self.registry,
            bounds: &self.bounds,
            tuning: &self.tuning,
            assets: &self.assets,
            rng: &mut self.rng,
        };
        self.current_level.populate(&mut ctx)?;
        self.tracker.begin_level();
        self.phase = GamePhase::Playing;

        let name = self.current_level.name().to_string();
        log::info!("Playing {} (level {})", name, self.level_index + 1);
        self.events.push(GameEvent::LevelStarted {
            index: self.level_index,
            name,
        });
        Ok(())
    }
}
