//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter on stdout.
//! Dinner events are logged at `info`, state transitions and chopstick
//! acquisitions at `debug`, each inside a `philosopher{seat=.. name=..}` span.
//!
//! ```bash
//! # Dinner trace (default when RUST_LOG is unset)
//! RUST_LOG=info cargo run
//!
//! # Include every state transition
//! RUST_LOG=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a round of the last philosopher at a table of five reads:
//!
//! ```text
//! INFO philosopher: Thinking philosopher=4 round=1
//! INFO philosopher: Requesting chopstick philosopher=4 chopstick=0 slot=First
//! INFO philosopher: Took chopstick philosopher=4 chopstick=0 slot=First
//! INFO philosopher: Requesting chopstick philosopher=4 chopstick=4 slot=Second
//! INFO philosopher: Took chopstick philosopher=4 chopstick=4 slot=Second
//! INFO philosopher: Eating philosopher=4 round=1
//! INFO philosopher: Put down chopstick philosopher=4 chopstick=4
//! INFO philosopher: Put down chopstick philosopher=4 chopstick=0
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Module paths add nothing; events carry the seat
        .compact()
        .init();
}
