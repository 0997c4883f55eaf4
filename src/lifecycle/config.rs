//! # Dinner Configuration
//!
//! The dinner is configured by two numbers, the table size and the number of
//! rounds each philosopher eats, plus the bounds of the random pauses.
//!
//! Defaults match the classic setup: five philosophers eating three times,
//! thinking 100..=1600 ms and eating 100..=1100 ms per round. The binary lets
//! the environment override the two counts:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DINNER_PHILOSOPHERS` | [`DinnerConfig::philosophers`] |
//! | `DINNER_CYCLES` | [`DinnerConfig::cycles`] |

use crate::framework::{PauseRange, Phase, RandomPause};
use crate::lifecycle::DinnerError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PHILOSOPHERS: usize = 5;
pub const DEFAULT_CYCLES: usize = 3;
pub const DEFAULT_THINK: PauseRange = PauseRange::new(100, 1600);
pub const DEFAULT_EAT: PauseRange = PauseRange::new(100, 1100);

pub const PHILOSOPHERS_VAR: &str = "DINNER_PHILOSOPHERS";
pub const CYCLES_VAR: &str = "DINNER_CYCLES";

/// Settings for one dinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DinnerConfig {
    /// Table size; also the number of chopsticks. At least 2.
    pub philosophers: usize,
    /// Rounds each philosopher eats before leaving. At least 1.
    pub cycles: usize,
    pub think: PauseRange,
    pub eat: PauseRange,
}

impl Default for DinnerConfig {
    fn default() -> Self {
        Self {
            philosophers: DEFAULT_PHILOSOPHERS,
            cycles: DEFAULT_CYCLES,
            think: DEFAULT_THINK,
            eat: DEFAULT_EAT,
        }
    }
}

impl DinnerConfig {
    /// Defaults overridden by `DINNER_PHILOSOPHERS` / `DINNER_CYCLES`, validated.
    pub fn from_env() -> Result<Self, DinnerError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DinnerError> {
        let mut config = Self::default();
        if let Some(value) = lookup(PHILOSOPHERS_VAR) {
            config.philosophers = parse_count(PHILOSOPHERS_VAR, value)?;
        }
        if let Some(value) = lookup(CYCLES_VAR) {
            config.cycles = parse_count(CYCLES_VAR, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DinnerError> {
        if self.philosophers < 2 {
            return Err(DinnerError::TooFewPhilosophers(self.philosophers));
        }
        if self.cycles < 1 {
            return Err(DinnerError::NoCycles);
        }
        for (phase, range) in [(Phase::Thinking, self.think), (Phase::Eating, self.eat)] {
            if !range.is_valid() {
                return Err(DinnerError::InvalidPause {
                    phase,
                    min_ms: range.min_ms,
                    max_ms: range.max_ms,
                });
            }
        }
        Ok(())
    }

    /// The randomized pause described by this config.
    pub fn pause(&self) -> RandomPause {
        RandomPause::new(self.think, self.eat)
    }
}

fn parse_count(var: &'static str, value: String) -> Result<usize, DinnerError> {
    match value.trim().parse() {
        Ok(count) => Ok(count),
        Err(_) => Err(DinnerError::InvalidEnv { var, value }),
    }
}
