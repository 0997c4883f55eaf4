//! # Philosopher Actor
//!
//! This module implements the concurrent actor for one diner.
//!
//! ## Structure
//!
//! - [`actor`] - [`PhilosopherActor`], the think / pick up / eat / put down loop
//! - [`report`] - [`PhilosopherReport`] returned when the actor finishes
//! - [`new()`] - Factory that seats one actor per chopstick pair of a [`Table`]
//!
//! ## Usage
//!
//! ```rust
//! use dining_recipe::framework::mock::{InstantPause, RecordingObserver};
//! use dining_recipe::model::Table;
//! use dining_recipe::philosopher_actor;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = Table::new(3);
//!     let actors = philosopher_actor::new(&table, 2, Arc::new(InstantPause), Arc::new(RecordingObserver::new()))?;
//!
//!     let handles: Vec<_> = actors.into_iter().map(|actor| tokio::spawn(actor.run())).collect();
//!     for handle in handles {
//!         assert_eq!(handle.await??.times_eaten, 2);
//!     }
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod report;

pub use actor::*;
pub use report::*;

use crate::framework::{FrameworkError, Observer, Pause};
use crate::model::Table;
use std::sync::Arc;

/// Creates one actor per seat of `table`, each eating `cycles` times.
pub fn new(
    table: &Table,
    cycles: usize,
    pause: Arc<dyn Pause>,
    observer: Arc<dyn Observer>,
) -> Result<Vec<PhilosopherActor>, FrameworkError> {
    table
        .philosophers()
        .into_iter()
        .map(|philosopher| {
            PhilosopherActor::new(philosopher, cycles, Arc::clone(&pause), Arc::clone(&observer))
        })
        .collect()
}
