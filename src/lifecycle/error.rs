//! Error types for setting up and running a dinner.

use crate::framework::{FrameworkError, Phase};
use thiserror::Error;

/// Errors that can occur while configuring or running a [`DinnerSystem`](crate::lifecycle::DinnerSystem).
#[derive(Debug, Error)]
pub enum DinnerError {
    /// A ring needs two distinct chopsticks per philosopher.
    #[error("A table needs at least 2 philosophers, got {0}")]
    TooFewPhilosophers(usize),

    #[error("Every philosopher must eat at least once, got 0 cycles")]
    NoCycles,

    #[error("Invalid {phase} pause: minimum {min_ms} ms is above maximum {max_ms} ms")]
    InvalidPause { phase: Phase, min_ms: u64, max_ms: u64 },

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Framework(#[from] FrameworkError),

    /// The philosopher's task panicked or was aborted.
    #[error("Philosopher at seat {seat} did not finish: {reason}")]
    PhilosopherPanicked { seat: usize, reason: String },
}
