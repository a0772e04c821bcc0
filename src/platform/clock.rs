//! Fixed-rate scheduler
//!
//! One loop owns the game state and runs tick-then-render in sequence, so a
//! frame never sees a half-finished tick.

use std::time::{Duration, Instant};

use super::input::{InputHandle, InputScript};
use crate::error::{EngineError, ExitStatus};
use crate::renderer::{RenderAdapter, RenderSnapshot};
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Converts wall-clock time into a whole number of ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(period: Duration, max_substeps: u32) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Ticks owed after `elapsed` more time. When far behind, the backlog
    /// beyond `max_substeps` is dropped instead of replayed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.period && due < self.max_substeps {
            self.accumulator -= self.period;
            due += 1;
        }
        if self.accumulator >= self.period {
            log::warn!("clock fell behind, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Time left until the next tick is owed
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub period: Duration,
    pub max_substeps: u32,
    /// Run ticks back to back without waiting
    pub headless: bool,
    /// Stop after this many ticks (0 = until the game ends)
    pub max_ticks: u64,
    /// Present every Nth tick
    pub render_every: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(crate::consts::TICK_PERIOD_MS),
            max_substeps: crate::consts::MAX_SUBSTEPS,
            headless: false,
            max_ticks: 0,
            render_every: 1,
        }
    }
}

impl From<&crate::Settings> for RunOptions {
    fn from(settings: &crate::Settings) -> Self {
        Self {
            period: settings.tick_period(),
            max_substeps: settings.max_substeps,
            headless: false,
            max_ticks: settings.max_ticks,
            render_every: settings.render.every.max(1),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub phase: GamePhase,
    pub ticks: u64,
    pub score: u64,
}

impl RunOutcome {
    pub fn exit_status(&self) -> ExitStatus {
        match self.phase {
            GamePhase::GameComplete => ExitStatus::GameComplete,
            GamePhase::Lost => ExitStatus::PlayerLost,
            GamePhase::Playing | GamePhase::WonLevel => ExitStatus::Unfinished,
        }
    }
}

/// Drive the game until it ends or the tick limit is reached
pub fn run(
    state: &mut GameState,
    renderer: &mut dyn RenderAdapter,
    input: &InputHandle,
    mut script: Option<&mut InputScript>,
    options: &RunOptions,
) -> Result<RunOutcome, EngineError> {
    let mut clock = FixedStep::new(options.period, options.max_substeps);
    let every = options.render_every.max(1);
    let mut ticks = 0u64;

    renderer.present(&RenderSnapshot::capture(state))?;
    let mut last = Instant::now();

    loop {
        let due = if options.headless {
            1
        } else {
            std::thread::sleep(clock.until_next());
            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;
            due
        };

        for _ in 0..due {
            if let Some(script) = script.as_deref_mut() {
                script.apply(state.time_ticks + 1, input);
            }
            let phase = tick(state, &TickInput::new(input.current()))?;
            ticks += 1;

            for event in state.drain_events() {
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }

            let finished = phase.is_terminal() || (options.max_ticks > 0 && ticks >= options.max_ticks);
            if ticks % every == 0 || finished {
                renderer.present(&RenderSnapshot::capture(state))?;
            }
            if finished {
                return Ok(RunOutcome {
                    phase,
                    ticks,
                    score: state.score(),
                });
            }
        }
    }
}
