//! Platform layer
//!
//! Handles the parts of a run that touch the outside world:
//! - Fixed-rate clock driving tick-then-render
//! - Shared input state and scripted input

pub mod clock;
pub mod input;

pub use clock::{FixedStep, RunOptions, RunOutcome, run};
pub use input::{InputHandle, InputScript};
