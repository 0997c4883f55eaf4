use crate::framework::{DiningEvent, Slot};
use serde::Serialize;
use std::fmt;

/// Lifecycle state of a philosopher.
///
/// A round walks the states in a fixed order:
///
/// ```text
/// Seated -> Thinking -> RequestingFirst -> HoldingFirst -> RequestingSecond
///        -> HoldingBoth -> Eating -> Releasing -> Seated
/// ```
///
/// and a philosopher that has finished all its rounds moves from `Seated` to `Done`.
/// Every transition is triggered by exactly one [`DiningEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PhilosopherState {
    /// Holding nothing, between rounds.
    #[default]
    Seated,
    Thinking,
    RequestingFirst,
    HoldingFirst,
    RequestingSecond,
    HoldingBoth,
    Eating,
    /// Second chopstick put down, first still held.
    Releasing,
    Done,
}

impl PhilosopherState {
    /// The state reached from `self` through `event`, or `None` if the event is
    /// not a legal next step.
    pub fn after(self, event: &DiningEvent) -> Option<Self> {
        let next = match (self, event) {
            (Self::Seated, DiningEvent::Thinking { .. }) => Self::Thinking,
            (Self::Seated, DiningEvent::Finished { .. }) => Self::Done,
            (
                Self::Thinking,
                DiningEvent::Requesting {
                    slot: Slot::First, ..
                },
            ) => Self::RequestingFirst,
            (
                Self::RequestingFirst,
                DiningEvent::Acquired {
                    slot: Slot::First, ..
                },
            ) => Self::HoldingFirst,
            (
                Self::HoldingFirst,
                DiningEvent::Requesting {
                    slot: Slot::Second, ..
                },
            ) => Self::RequestingSecond,
            (
                Self::RequestingSecond,
                DiningEvent::Acquired {
                    slot: Slot::Second, ..
                },
            ) => Self::HoldingBoth,
            (Self::HoldingBoth, DiningEvent::Eating { .. }) => Self::Eating,
            (Self::Eating, DiningEvent::Released { .. }) => Self::Releasing,
            (Self::Releasing, DiningEvent::Released { .. }) => Self::Seated,
            _ => return None,
        };
        Some(next)
    }

    /// Number of chopsticks a philosopher holds in this state.
    pub fn chopsticks_held(&self) -> usize {
        match self {
            Self::HoldingFirst | Self::RequestingSecond | Self::Releasing => 1,
            Self::HoldingBoth | Self::Eating => 2,
            Self::Seated | Self::Thinking | Self::RequestingFirst | Self::Done => 0,
        }
    }
}

impl fmt::Display for PhilosopherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
