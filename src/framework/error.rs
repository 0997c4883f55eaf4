//! # Framework Errors
//!
//! Errors raised by the chopstick primitives and the acquisition protocol.
//! Acquiring a free or busy chopstick never fails; it only waits. The variants
//! below describe misuse that would break the ordering argument.

/// Errors that can occur within the dining framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Both sides resolve to chopstick {index}; a philosopher needs two distinct chopsticks")]
    SameChopstick { index: usize },
    #[error("Chopstick {index} is already held by philosopher {philosopher}")]
    AlreadyHeld { index: usize, philosopher: usize },
}
