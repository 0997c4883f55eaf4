//! Per-philosopher outcome of a dinner.

use serde::Serialize;
use std::time::Duration;

/// What a philosopher did during the dinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhilosopherReport {
    pub seat: usize,
    pub name: String,
    pub times_eaten: usize,
    /// Total time spent waiting for chopsticks. A value far above the others
    /// points at a philosopher being outraced by its neighbours.
    pub hungry_for: Duration,
}
