//! # Test Doubles & Trace Checking
//!
//! Running a real dinner with randomized sleeps is slow and non-deterministic.
//! This module provides the pieces needed to run one quickly and then verify it:
//!
//! | Type | Replaces | Use |
//! |------|----------|-----|
//! | [`RecordingObserver`] | [`TracingObserver`](crate::framework::TracingObserver) | keeps every event in memory, in global order |
//! | [`InstantPause`] | [`RandomPause`](crate::framework::RandomPause) | no sleep, only yields to the scheduler |
//! | [`FixedPause`] | [`RandomPause`](crate::framework::RandomPause) | same sleep every phase |
//!
//! After the run, [`check_trace`] replays the recorded events and reports the
//! first violation of mutual exclusion, acquisition order, LIFO release, or the
//! per-philosopher lifecycle.
//!
//! ```rust
//! use dining_recipe::framework::mock::{check_trace, InstantPause, RecordingObserver};
//! use dining_recipe::lifecycle::{DinnerConfig, DinnerSystem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DinnerConfig::default();
//!     let recorder = RecordingObserver::new();
//!
//!     let system = DinnerSystem::start(&config, InstantPause, recorder.clone()).unwrap();
//!     system.join().await.unwrap();
//!
//!     let summary = check_trace(&recorder.events(), config.philosophers, config.cycles).unwrap();
//!     assert_eq!(summary.eating_events, 15);
//! }
//! ```

use crate::framework::{DiningEvent, Observer, Pause, Phase, Slot};
use crate::model::PhilosopherState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Observer that stores every event. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<DiningEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<DiningEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Observer for RecordingObserver {
    fn record(&self, event: DiningEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Pause that returns immediately after giving other tasks a chance to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPause;

#[async_trait]
impl Pause for InstantPause {
    async fn pause(&self, _phase: Phase) {
        tokio::task::yield_now().await;
    }
}

/// Pause with a constant duration per phase.
#[derive(Debug, Clone, Copy)]
pub struct FixedPause {
    pub think: Duration,
    pub eat: Duration,
}

#[async_trait]
impl Pause for FixedPause {
    async fn pause(&self, phase: Phase) {
        let duration = match phase {
            Phase::Thinking => self.think,
            Phase::Eating => self.eat,
        };
        tokio::time::sleep(duration).await;
    }
}

/// First rule broken by a recorded trace.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraceViolation {
    #[error("Event for unknown seat {0}")]
    UnknownSeat(usize),
    #[error("Philosopher {philosopher} in state {state} cannot emit {event:?}")]
    IllegalTransition {
        philosopher: usize,
        state: PhilosopherState,
        event: DiningEvent,
    },
    #[error("Philosopher {philosopher} took chopstick {chopstick} held by philosopher {holder}")]
    DoubleHold {
        chopstick: usize,
        holder: usize,
        philosopher: usize,
    },
    #[error("Philosopher {philosopher} released chopstick {chopstick} held by {holder:?}")]
    ForeignRelease {
        chopstick: usize,
        holder: Option<usize>,
        philosopher: usize,
    },
    #[error("Philosopher {philosopher} took chopstick {second} after {first}")]
    OutOfOrder {
        philosopher: usize,
        first: usize,
        second: usize,
    },
    #[error("Philosopher {philosopher} released chopstick {released}, expected {expected:?}")]
    NotLifo {
        philosopher: usize,
        expected: Option<usize>,
        released: usize,
    },
    #[error("Philosopher {philosopher} ate while neighbour {neighbour} was eating")]
    NeighbourEating {
        philosopher: usize,
        neighbour: usize,
    },
    #[error("Philosopher {philosopher} finished after {actual} rounds, expected {expected}")]
    WrongCount {
        philosopher: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Philosopher {philosopher} never finished (last state {state})")]
    Unfinished {
        philosopher: usize,
        state: PhilosopherState,
    },
}

/// Aggregates of a trace that passed [`check_trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSummary {
    pub eating_events: usize,
    pub times_eaten: Vec<usize>,
}

/// Replays `events` for a table of `philosophers` seats where everyone must
/// eat exactly `cycles` times.
pub fn check_trace(
    events: &[DiningEvent],
    philosophers: usize,
    cycles: usize,
) -> Result<TraceSummary, TraceViolation> {
    let mut states = vec![PhilosopherState::Seated; philosophers];
    let mut holders: HashMap<usize, usize> = HashMap::new();
    // Chopsticks held per seat, in acquisition order.
    let mut held: Vec<Vec<usize>> = vec![Vec::new(); philosophers];
    let mut eating = vec![false; philosophers];
    let mut eaten = vec![0; philosophers];

    for event in events {
        let Some(seat) = event.philosopher() else {
            continue;
        };
        if seat >= philosophers {
            return Err(TraceViolation::UnknownSeat(seat));
        }
        let next = states[seat]
            .after(event)
            .ok_or_else(|| TraceViolation::IllegalTransition {
                philosopher: seat,
                state: states[seat],
                event: event.clone(),
            })?;

        match event {
            DiningEvent::Acquired {
                chopstick, slot, ..
            } => {
                if let Some(&holder) = holders.get(chopstick) {
                    return Err(TraceViolation::DoubleHold {
                        chopstick: *chopstick,
                        holder,
                        philosopher: seat,
                    });
                }
                if *slot == Slot::Second {
                    let first = held[seat][0];
                    if first >= *chopstick {
                        return Err(TraceViolation::OutOfOrder {
                            philosopher: seat,
                            first,
                            second: *chopstick,
                        });
                    }
                }
                holders.insert(*chopstick, seat);
                held[seat].push(*chopstick);
            }
            DiningEvent::Eating { .. } => {
                let left = (seat + philosophers - 1) % philosophers;
                let right = (seat + 1) % philosophers;
                for neighbour in [left, right] {
                    if neighbour != seat && eating[neighbour] {
                        return Err(TraceViolation::NeighbourEating {
                            philosopher: seat,
                            neighbour,
                        });
                    }
                }
                eating[seat] = true;
                eaten[seat] += 1;
            }
            DiningEvent::Released { chopstick, .. } => {
                eating[seat] = false;
                match holders.get(chopstick) {
                    Some(&holder) if holder == seat => {}
                    other => {
                        return Err(TraceViolation::ForeignRelease {
                            chopstick: *chopstick,
                            holder: other.copied(),
                            philosopher: seat,
                        })
                    }
                }
                let expected = held[seat].pop();
                if expected != Some(*chopstick) {
                    return Err(TraceViolation::NotLifo {
                        philosopher: seat,
                        expected,
                        released: *chopstick,
                    });
                }
                holders.remove(chopstick);
            }
            DiningEvent::Finished { times_eaten, .. } => {
                if *times_eaten != eaten[seat] || eaten[seat] != cycles {
                    return Err(TraceViolation::WrongCount {
                        philosopher: seat,
                        expected: cycles,
                        actual: eaten[seat],
                    });
                }
            }
            _ => {}
        }
        states[seat] = next;
    }

    if let Some((philosopher, state)) = states
        .iter()
        .enumerate()
        .find(|(_, state)| **state != PhilosopherState::Done)
    {
        return Err(TraceViolation::Unfinished {
            philosopher,
            state: *state,
        });
    }

    Ok(TraceSummary {
        eating_events: eaten.iter().sum(),
        times_eaten: eaten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acquired(philosopher: usize, chopstick: usize, slot: Slot) -> DiningEvent {
        DiningEvent::Acquired {
            philosopher,
            chopstick,
            slot,
        }
    }

    fn requesting(philosopher: usize, chopstick: usize, slot: Slot) -> DiningEvent {
        DiningEvent::Requesting {
            philosopher,
            chopstick,
            slot,
        }
    }

    fn one_round(philosopher: usize, first: usize, second: usize) -> Vec<DiningEvent> {
        vec![
            DiningEvent::Thinking {
                philosopher,
                round: 1,
            },
            requesting(philosopher, first, Slot::First),
            acquired(philosopher, first, Slot::First),
            requesting(philosopher, second, Slot::Second),
            acquired(philosopher, second, Slot::Second),
            DiningEvent::Eating {
                philosopher,
                round: 1,
            },
            DiningEvent::Released {
                philosopher,
                chopstick: second,
            },
            DiningEvent::Released {
                philosopher,
                chopstick: first,
            },
            DiningEvent::Finished {
                philosopher,
                times_eaten: 1,
            },
        ]
    }

    #[test]
    fn test_sequential_rounds_pass() {
        let mut events = one_round(0, 0, 1);
        events.extend(one_round(1, 0, 1));
        let summary = check_trace(&events, 2, 1).unwrap();
        assert_eq!(summary.eating_events, 2);
        assert_eq!(summary.times_eaten, vec![1, 1]);
    }

    #[test]
    fn test_double_hold_is_detected() {
        let events = vec![
            DiningEvent::Thinking {
                philosopher: 0,
                round: 1,
            },
            DiningEvent::Thinking {
                philosopher: 1,
                round: 1,
            },
            requesting(0, 0, Slot::First),
            requesting(1, 0, Slot::First),
            acquired(0, 0, Slot::First),
            acquired(1, 0, Slot::First),
        ];
        assert_eq!(
            check_trace(&events, 2, 1),
            Err(TraceViolation::DoubleHold {
                chopstick: 0,
                holder: 0,
                philosopher: 1
            })
        );
    }

    #[test]
    fn test_descending_acquisition_is_detected() {
        let events = one_round(4, 4, 0);
        assert_eq!(
            check_trace(&events, 5, 1),
            Err(TraceViolation::OutOfOrder {
                philosopher: 4,
                first: 4,
                second: 0
            })
        );
    }

    #[test]
    fn test_fifo_release_is_detected() {
        let mut events = one_round(0, 0, 1);
        events.swap(6, 7);
        assert_eq!(
            check_trace(&events, 2, 1),
            Err(TraceViolation::NotLifo {
                philosopher: 0,
                expected: Some(1),
                released: 0
            })
        );
    }

    #[test]
    fn test_missing_finish_is_detected() {
        let mut events = one_round(0, 0, 1);
        events.pop();
        assert!(matches!(
            check_trace(&events, 1, 1),
            Err(TraceViolation::Unfinished { philosopher: 0, .. })
        ));
    }

    #[test]
    fn test_short_dinner_is_detected() {
        let events = one_round(0, 0, 1);
        assert_eq!(
            check_trace(&events, 1, 2),
            Err(TraceViolation::WrongCount {
                philosopher: 0,
                expected: 2,
                actual: 1
            })
        );
    }
}
