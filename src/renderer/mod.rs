//! Frame presentation
//!
//! The simulation hands each frame over as an owned [`RenderSnapshot`]:
//! entities already sorted into paint order, plus score and background.
//! Adapters draw it however they like.

pub mod ascii;
pub mod snapshot;

pub use ascii::AsciiRenderer;
pub use snapshot::{DrawItem, RenderSnapshot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("frame output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Presents finished frames (external collaborator)
pub trait RenderAdapter {
    fn present(&mut self, frame: &RenderSnapshot) -> Result<(), RenderError>;
}

/// Writes a one-line frame summary to the log
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderAdapter for LogRenderer {
    fn present(&mut self, frame: &RenderSnapshot) -> Result<(), RenderError> {
        self.frames += 1;
        let infected = frame.items.iter().filter(|i| i.infected).count();
        log::info!(
            "[{}] {} | score {} | {} entities ({} infected) | {:?}",
            frame.tick,
            frame.level_name,
            frame.score,
            frame.items.len(),
            infected,
            frame.phase
        );
        Ok(())
    }
}

/// Discards frames
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderAdapter for NullRenderer {
    fn present(&mut self, _frame: &RenderSnapshot) -> Result<(), RenderError> {
        Ok(())
    }
}
