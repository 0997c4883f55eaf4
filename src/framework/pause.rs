//! # Pauses
//!
//! Thinking and eating are modelled as timed pauses behind the [`Pause`] trait,
//! so tests can swap the randomized sleep for an instant or fixed one.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The two timed phases of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Thinking,
    Eating,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Thinking => write!(f, "thinking"),
            Phase::Eating => write!(f, "eating"),
        }
    }
}

/// Suspends the calling philosopher for the length of a phase.
#[async_trait]
pub trait Pause: Send + Sync + 'static {
    async fn pause(&self, phase: Phase);
}

/// Inclusive millisecond bounds of a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl PauseRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn is_valid(&self) -> bool {
        self.min_ms <= self.max_ms
    }
}

/// Sleeps a uniformly random time drawn from the phase's range.
#[derive(Debug, Clone)]
pub struct RandomPause {
    think: PauseRange,
    eat: PauseRange,
}

impl RandomPause {
    pub fn new(think: PauseRange, eat: PauseRange) -> Self {
        Self { think, eat }
    }

    fn draw(&self, phase: Phase) -> Duration {
        let range = match phase {
            Phase::Thinking => self.think,
            Phase::Eating => self.eat,
        };
        // An inverted range is rejected by config validation; fall back to the minimum.
        let ms = if range.is_valid() {
            rand::thread_rng().gen_range(range.min_ms..=range.max_ms)
        } else {
            range.min_ms
        };
        Duration::from_millis(ms)
    }
}

#[async_trait]
impl Pause for RandomPause {
    async fn pause(&self, phase: Phase) {
        let duration = self.draw(phase);
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_stays_in_range() {
        let pause = RandomPause::new(PauseRange::new(100, 1600), PauseRange::new(5, 5));
        for _ in 0..1000 {
            let think = pause.draw(Phase::Thinking);
            assert!(think >= Duration::from_millis(100) && think <= Duration::from_millis(1600));
        }
        assert_eq!(pause.draw(Phase::Eating), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_pause_sleeps_at_least_minimum() {
        let pause = RandomPause::new(PauseRange::new(10, 20), PauseRange::new(10, 20));
        let start = tokio::time::Instant::now();
        pause.pause(Phase::Eating).await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
