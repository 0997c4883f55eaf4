//! # Chopsticks
//!
//! A [`Chopstick`] is an exclusive lock identified by its position in the ring.
//! Acquiring it suspends the calling task until the chopstick is free; the
//! returned [`ChopstickGuard`] releases it when dropped, so a chopstick can never
//! be leaked by an early return, a panic, or a cancelled future.
//!
//! Waiters are served in FIFO order (the semantics of [`tokio::sync::Mutex`]).
//!
//! ```rust
//! use dining_recipe::framework::Chopstick;
//!
//! #[tokio::main]
//! async fn main() {
//!     let chopstick = Chopstick::new(0);
//!     let guard = chopstick.acquire(2).await.unwrap();
//!     assert_eq!(chopstick.holder(), Some(2));
//!     drop(guard);
//!     assert!(chopstick.is_free());
//! }
//! ```

use crate::framework::FrameworkError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

const FREE: usize = usize::MAX;

#[derive(Debug)]
struct ChopstickState {
    index: usize,
    lock: Arc<Mutex<()>>,
    // Seat of the current holder, or FREE. Written only while `lock` is held.
    holder: AtomicUsize,
}

/// Shared handle to one chopstick. Cloning yields another handle to the same lock.
#[derive(Debug, Clone)]
pub struct Chopstick {
    state: Arc<ChopstickState>,
}

impl Chopstick {
    pub fn new(index: usize) -> Self {
        Self {
            state: Arc::new(ChopstickState {
                index,
                lock: Arc::new(Mutex::new(())),
                holder: AtomicUsize::new(FREE),
            }),
        }
    }

    /// Position of this chopstick in the ring. This is the key of the global
    /// acquisition order.
    pub fn index(&self) -> usize {
        self.state.index
    }

    /// Seat of the philosopher currently holding this chopstick.
    pub fn holder(&self) -> Option<usize> {
        match self.state.holder.load(Ordering::Acquire) {
            FREE => None,
            seat => Some(seat),
        }
    }

    pub fn is_free(&self) -> bool {
        self.holder().is_none()
    }

    /// Waits until the chopstick is free and takes it on behalf of `philosopher`.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::AlreadyHeld`] if `philosopher` already holds this
    /// chopstick; waiting would never finish.
    pub async fn acquire(&self, philosopher: usize) -> Result<ChopstickGuard, FrameworkError> {
        self.check_not_held_by(philosopher)?;
        let permit = Arc::clone(&self.state.lock).lock_owned().await;
        Ok(self.take(philosopher, permit))
    }

    /// Takes the chopstick only if it is free right now.
    pub fn try_acquire(&self, philosopher: usize) -> Result<Option<ChopstickGuard>, FrameworkError> {
        self.check_not_held_by(philosopher)?;
        Ok(Arc::clone(&self.state.lock)
            .try_lock_owned()
            .ok()
            .map(|permit| self.take(philosopher, permit)))
    }

    fn check_not_held_by(&self, philosopher: usize) -> Result<(), FrameworkError> {
        if self.holder() == Some(philosopher) {
            return Err(FrameworkError::AlreadyHeld {
                index: self.index(),
                philosopher,
            });
        }
        Ok(())
    }

    fn take(&self, philosopher: usize, permit: OwnedMutexGuard<()>) -> ChopstickGuard {
        let previous = self.state.holder.swap(philosopher, Ordering::AcqRel);
        debug_assert_eq!(previous, FREE, "chopstick {} had two holders", self.index());
        ChopstickGuard {
            chopstick: self.clone(),
            philosopher,
            _permit: permit,
        }
    }
}

/// Proof that a philosopher holds a chopstick. Dropping it puts the chopstick down.
#[derive(Debug)]
pub struct ChopstickGuard {
    chopstick: Chopstick,
    philosopher: usize,
    _permit: OwnedMutexGuard<()>,
}

impl ChopstickGuard {
    pub fn index(&self) -> usize {
        self.chopstick.index()
    }

    pub fn philosopher(&self) -> usize {
        self.philosopher
    }
}

impl Drop for ChopstickGuard {
    fn drop(&mut self) {
        // Clear the holder before `_permit` unlocks, so the next holder's write
        // can never be overwritten.
        self.chopstick.state.holder.store(FREE, Ordering::Release);
    }
}
