#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Dining Philosophers Recipe
//!
//! > **A Recipe for deadlock-free resource ordering with Tokio.**
//!
//! Philosophers sit around a round table with one chopstick between each pair of
//! neighbours. Each of them repeatedly thinks, picks up both neighbouring
//! chopsticks, eats, and puts them down again. Naively grabbing the left chopstick
//! first deadlocks as soon as everyone holds their left one. This crate shows the
//! classic fix: a **global acquisition order**.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why resource ordering?
//!
//! - **No circular wait**: every philosopher picks up its lower-numbered chopstick
//!   first, so a chain of waiters can never loop back on itself.
//! - **Purely local**: no waiter, no arbiter, no global lock. Each philosopher
//!   decides from two integers.
//! - **Scoped release**: chopsticks are RAII guards, so an early return, panic, or
//!   cancelled future still puts them back.
//!
//! What it does *not* give you is fairness. See
//! [`AcquisitionOrder`](framework::AcquisitionOrder) for the argument and its limits.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Concurrency Model
//! Each philosopher runs in its own Tokio task on the multi-threaded runtime.
//! The only shared state is the chopsticks themselves (`tokio::sync::Mutex`, held
//! across the eating `.await`).
//!
//! ### 2. Injectable Time
//! Thinking and eating are [`Pause`](framework::Pause)s. Production uses random
//! sleeps; tests use [`InstantPause`](framework::mock::InstantPause) and run in
//! milliseconds.
//!
//! ### 3. Observability
//! Every step is a [`DiningEvent`](framework::DiningEvent) sent to an
//! [`Observer`](framework::Observer). The binary logs them with `tracing`; tests
//! record them and replay them with [`check_trace`](framework::mock::check_trace).
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Chopsticks, the acquisition protocol, pauses, events and test doubles.
//!
//! ### 2. The Data ([`model`])
//! [`Philosopher`](model::Philosopher), its [`PhilosopherState`](model::PhilosopherState)
//! machine, and the [`Table`](model::Table) ring.
//!
//! ### 3. The Actor ([`philosopher_actor`])
//! The think / pick up / eat / put down loop.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`DinnerSystem`](lifecycle::DinnerSystem) seats everyone, launches the tasks and
//! joins them; [`DinnerConfig`](lifecycle::DinnerConfig) holds the settings.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Five philosophers, three rounds each
//! cargo run
//!
//! # Seven philosophers, one round, with state transitions
//! DINNER_PHILOSOPHERS=7 DINNER_CYCLES=1 RUST_LOG=debug cargo run
//!
//! cargo test
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod philosopher_actor;
