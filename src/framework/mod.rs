//! Generic building blocks for a table of philosophers sharing chopsticks.
//!
//! # Main Components
//!
//! - [`Chopstick`] - Exclusive lock with an RAII [`ChopstickGuard`]
//! - [`AcquisitionOrder`] - The lower-index-first rule and [`HeldPair`]
//! - [`Pause`] - Injectable delay for the thinking and eating phases
//! - [`Observer`] - Sink for [`DiningEvent`]s
//! - [`FrameworkError`] - Misuse of the primitives
//!
//! # Testing
//!
//! See [`mock`] for recording observers, instant pauses and the trace checker.

pub mod chopstick;
pub mod error;
pub mod mock;
pub mod observer;
pub mod pause;
pub mod protocol;

// Re-export core types for convenience
pub use chopstick::{Chopstick, ChopstickGuard};
pub use error::FrameworkError;
pub use observer::{DiningEvent, Observer, Slot, TracingObserver};
pub use pause::{Pause, PauseRange, Phase, RandomPause};
pub use protocol::{AcquisitionOrder, HeldPair};
