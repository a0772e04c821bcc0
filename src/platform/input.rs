//! Player input
//!
//! The input source may live on another thread than the clock. The current
//! direction is a single atomic byte, so a tick always reads a whole command
//! and the latest press wins.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ConfigError;
use crate::sim::Direction;

fn encode(direction: Direction) -> u8 {
    match direction {
        Direction::Stopped => 0,
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

fn decode(raw: u8) -> Direction {
    match raw {
        1 => Direction::Up,
        2 => Direction::Down,
        3 => Direction::Left,
        4 => Direction::Right,
        _ => Direction::Stopped,
    }
}

/// Shared last-command-wins direction cell
#[derive(Debug, Clone, Default)]
pub struct InputHandle {
    direction: Arc<AtomicU8>,
}

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down: it becomes the current direction
    pub fn press(&self, direction: Direction) {
        self.direction.store(encode(direction), Ordering::Release);
    }

    /// A key went up: stop only if it is still the current direction
    pub fn release(&self, direction: Direction) {
        let _ = self.direction.compare_exchange(
            encode(direction),
            encode(Direction::Stopped),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn current(&self) -> Direction {
        decode(self.direction.load(Ordering::Acquire))
    }
}

/// Timed direction changes, e.g. for headless runs
///
/// One command per line: `<tick> <direction>`. Blank lines and text after
/// `#` are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    commands: Vec<(u64, Direction)>,
    cursor: usize,
}

impl InputScript {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut commands = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let bad = |reason: &str| ConfigError::Script {
                line: idx + 1,
                reason: reason.to_string(),
            };
            let mut parts = line.split_whitespace();
            let tick = parts
                .next()
                .and_then(|t| t.parse::<u64>().ok())
                .ok_or_else(|| bad("expected a tick number"))?;
            let direction = parts
                .next()
                .and_then(Direction::from_str)
                .ok_or_else(|| bad("expected up/down/left/right/stopped"))?;
            if parts.next().is_some() {
                return Err(bad("trailing text"));
            }
            commands.push((tick, direction));
        }
        // Stable: same-tick commands keep file order, so the last one wins
        commands.sort_by_key(|(tick, _)| *tick);
        Ok(Self {
            commands,
            cursor: 0,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Press every command due at or before `tick`
    pub fn apply(&mut self, tick: u64, input: &InputHandle) {
        while let Some(&(at, direction)) = self.commands.get(self.cursor) {
            if at > tick {
                break;
            }
            input.press(direction);
            self.cursor += 1;
        }
    }
}
