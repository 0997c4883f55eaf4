//! # Dinner Events & Observers
//!
//! Every lifecycle transition of every philosopher is reported as a
//! [`DiningEvent`] to an [`Observer`]. The production observer
//! ([`TracingObserver`]) renders them as structured `tracing` lines; tests plug
//! in [`RecordingObserver`](crate::framework::mock::RecordingObserver) and replay
//! the trace afterwards.
//!
//! ## Per-philosopher ordering
//!
//! For a single philosopher the events of one round always appear as:
//!
//! ```text
//! Thinking -> Requesting(first) -> Acquired(first) -> Requesting(second)
//!          -> Acquired(second) -> Eating -> Released(second) -> Released(first)
//! ```
//!
//! followed by the next `Thinking`, or by `Finished` after the last round.

use serde::Serialize;
use tracing::info;

/// Which of the two chopsticks a request refers to, in acquisition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    First,
    Second,
}

/// A single observable step of the dinner.
///
/// `philosopher` is the zero-based seat; `round` is one-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiningEvent {
    DinnerStarted {
        philosophers: usize,
        cycles: usize,
    },
    Thinking {
        philosopher: usize,
        round: usize,
    },
    Requesting {
        philosopher: usize,
        chopstick: usize,
        slot: Slot,
    },
    Acquired {
        philosopher: usize,
        chopstick: usize,
        slot: Slot,
    },
    Eating {
        philosopher: usize,
        round: usize,
    },
    Released {
        philosopher: usize,
        chopstick: usize,
    },
    Finished {
        philosopher: usize,
        times_eaten: usize,
    },
    DinnerEnded,
}

impl DiningEvent {
    /// The seat this event belongs to, if it is philosopher-scoped.
    pub fn philosopher(&self) -> Option<usize> {
        match self {
            DiningEvent::Thinking { philosopher, .. }
            | DiningEvent::Requesting { philosopher, .. }
            | DiningEvent::Acquired { philosopher, .. }
            | DiningEvent::Eating { philosopher, .. }
            | DiningEvent::Released { philosopher, .. }
            | DiningEvent::Finished { philosopher, .. } => Some(*philosopher),
            DiningEvent::DinnerStarted { .. } | DiningEvent::DinnerEnded => None,
        }
    }
}

/// Sink for dinner events.
///
/// `record` is called from many philosopher tasks at once and must not block
/// for long; it is never called while awaiting.
pub trait Observer: Send + Sync + 'static {
    fn record(&self, event: DiningEvent);
}

/// Renders every event as one `info!` line with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn record(&self, event: DiningEvent) {
        match event {
            DiningEvent::DinnerStarted {
                philosophers,
                cycles,
            } => info!(philosophers, cycles, "Dinner started"),
            DiningEvent::Thinking { philosopher, round } => {
                info!(philosopher, round, "Thinking")
            }
            DiningEvent::Requesting {
                philosopher,
                chopstick,
                slot,
            } => info!(philosopher, chopstick, ?slot, "Requesting chopstick"),
            DiningEvent::Acquired {
                philosopher,
                chopstick,
                slot,
            } => info!(philosopher, chopstick, ?slot, "Took chopstick"),
            DiningEvent::Eating { philosopher, round } => info!(philosopher, round, "Eating"),
            DiningEvent::Released {
                philosopher,
                chopstick,
            } => info!(philosopher, chopstick, "Put down chopstick"),
            DiningEvent::Finished {
                philosopher,
                times_eaten,
            } => info!(philosopher, times_eaten, "Finished eating and left to meditate"),
            DiningEvent::DinnerEnded => info!("Dinner ended"),
        }
    }
}
