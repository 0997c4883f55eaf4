//! # Dinner Lifecycle & Orchestration
//!
//! Philosophers are simple on their own; **seating them around a shared table**
//! is where the wiring lives. This module is the conductor.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`DinnerConfig`] with defaults, env overrides and validation
//! 2. **Topology** - Build the [`Table`](crate::model::Table) ring once and hand out chopstick handles
//! 3. **Launch** - One Tokio task per philosopher
//! 4. **Join** - Wait for every task, collecting a [`DinnerReport`]
//! 5. **Observability Setup** - [`setup_tracing`]
//!
//! ## The DinnerSystem Pattern
//!
//! ```rust
//! use dining_recipe::framework::mock::{InstantPause, RecordingObserver};
//! use dining_recipe::lifecycle::{DinnerConfig, DinnerSystem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DinnerConfig { philosophers: 3, cycles: 1, ..DinnerConfig::default() };
//!     let system = DinnerSystem::start(&config, InstantPause, RecordingObserver::new())?;
//!     let report = system.join().await?;
//!     assert_eq!(report.total_meals(), 3);
//!     Ok(())
//! }
//! ```
//!
//! ## Completion
//!
//! There is no shutdown signal: each philosopher leaves the table after its last
//! round, and [`DinnerSystem::join`] returns once all of them have. Invalid
//! configurations are rejected by [`DinnerSystem::start`] before any task exists.

pub mod config;
pub mod dinner_system;
pub mod error;
pub mod tracing;

pub use config::*;
pub use dinner_system::*;
pub use error::*;
pub use self::tracing::*;
