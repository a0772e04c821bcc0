//! Score and win/lose flags

use serde::{Deserialize, Serialize};

/// Outcome of one win/lose evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    Won,
    Lost,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
    won: bool,
    lost: bool,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn won(&self) -> bool {
        self.won
    }

    #[inline]
    pub fn lost(&self) -> bool {
        self.lost
    }

    /// Scores only go up
    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Latch the flags for this tick.
    ///
    /// Won holds iff no collectibles remain. Lost latches once the player is
    /// infected and stays latched for the session. A lost player never wins.
    pub fn evaluate(&mut self, collectibles_left: usize, player_infected: bool) -> Verdict {
        self.won = collectibles_left == 0;
        if player_infected {
            self.lost = true;
        }
        if self.lost {
            self.won = false;
            Verdict::Lost
        } else if self.won {
            Verdict::Won
        } else {
            Verdict::Continue
        }
    }

    /// Clear the win flag after advancing to a new level
    pub fn begin_level(&mut self) {
        self.won = false;
    }
}
