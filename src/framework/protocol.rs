//! # Acquisition Protocol
//!
//! Every philosopher requests the **lower-indexed** of its two chopsticks first,
//! whatever its physical side. Because all philosophers obey the same total
//! order on chopstick indices, a chain "A waits for B who waits for C ..." can
//! only climb towards higher indices and can never close into a cycle. This rules
//! out circular wait and therefore deadlock.
//!
//! The comparison uses the raw ring positions. For the last seat of a ring of
//! size `n` the left chopstick is `n - 1` and the right one wraps to `0`, so that
//! philosopher picks up its *right* chopstick first. This is exactly the
//! asymmetry that breaks the cycle.
//!
//! The protocol does not prevent starvation: a philosopher can in principle lose
//! the race for its first chopstick forever.
//!
//! ```rust
//! use dining_recipe::framework::AcquisitionOrder;
//!
//! // Seat 4 of 5: left = 4, right = 0.
//! let order = AcquisitionOrder::between(4, 0).unwrap();
//! assert_eq!((order.first(), order.second()), (0, 4));
//! assert!(!order.left_first());
//! ```

use crate::framework::{Chopstick, ChopstickGuard, DiningEvent, FrameworkError, Observer, Slot};
use std::cmp::Ordering;
use tracing::debug;

/// The order in which a philosopher picks up its left and right chopsticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionOrder {
    first: usize,
    second: usize,
    left_first: bool,
}

impl AcquisitionOrder {
    /// Orders the chopsticks at ring positions `left` and `right`.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::SameChopstick`] if both positions are the same, which
    /// happens for a ring of one.
    pub fn between(left: usize, right: usize) -> Result<Self, FrameworkError> {
        match left.cmp(&right) {
            Ordering::Less => Ok(Self {
                first: left,
                second: right,
                left_first: true,
            }),
            Ordering::Greater => Ok(Self {
                first: right,
                second: left,
                left_first: false,
            }),
            Ordering::Equal => Err(FrameworkError::SameChopstick { index: left }),
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn left_first(&self) -> bool {
        self.left_first
    }

    /// Picks up both chopsticks in protocol order, reporting each step.
    ///
    /// Suspends while either chopstick is held by a neighbour. On return the
    /// philosopher holds both; if the future is dropped halfway the chopstick
    /// already taken is put back down.
    pub async fn pick_up(
        &self,
        philosopher: usize,
        left: &Chopstick,
        right: &Chopstick,
        observer: &dyn Observer,
    ) -> Result<HeldPair, FrameworkError> {
        debug_assert_eq!(
            (left.index(), right.index()),
            if self.left_first {
                (self.first, self.second)
            } else {
                (self.second, self.first)
            },
            "acquisition order built for other chopsticks"
        );
        let (first, second) = if self.left_first {
            (left, right)
        } else {
            (right, left)
        };

        let first = take(philosopher, first, Slot::First, observer).await?;
        let second = take(philosopher, second, Slot::Second, observer).await?;
        Ok(HeldPair { second, first })
    }
}

async fn take(
    philosopher: usize,
    chopstick: &Chopstick,
    slot: Slot,
    observer: &dyn Observer,
) -> Result<ChopstickGuard, FrameworkError> {
    observer.record(DiningEvent::Requesting {
        philosopher,
        chopstick: chopstick.index(),
        slot,
    });
    let guard = chopstick.acquire(philosopher).await?;
    debug!(philosopher, chopstick = chopstick.index(), ?slot, "acquired");
    observer.record(DiningEvent::Acquired {
        philosopher,
        chopstick: chopstick.index(),
        slot,
    });
    Ok(guard)
}

/// Both chopsticks of one philosopher.
///
/// Fields drop in declaration order, so `second` is always put down before
/// `first`, also when the pair is dropped without [`HeldPair::put_down`].
#[derive(Debug)]
pub struct HeldPair {
    second: ChopstickGuard,
    first: ChopstickGuard,
}

impl HeldPair {
    pub fn first(&self) -> usize {
        self.first.index()
    }

    pub fn second(&self) -> usize {
        self.second.index()
    }

    /// Puts both chopsticks down in reverse acquisition order.
    ///
    /// Each `Released` event is recorded while the chopstick is still held, so
    /// in any trace it precedes the next holder's `Acquired`.
    pub fn put_down(self, observer: &dyn Observer) {
        let HeldPair { second, first } = self;
        for guard in [second, first] {
            observer.record(DiningEvent::Released {
                philosopher: guard.philosopher(),
                chopstick: guard.index(),
            });
            drop(guard);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::RecordingObserver;

    #[test]
    fn test_lower_index_first_for_every_ring_size() {
        for ring in 2..=64 {
            for seat in 0..ring {
                let left = seat;
                let right = (seat + 1) % ring;
                let order = AcquisitionOrder::between(left, right).unwrap();
                assert!(order.first() < order.second(), "ring {ring} seat {seat}");
                assert_eq!(order.left_first(), seat != ring - 1, "ring {ring} seat {seat}");
            }
        }
    }

    #[test]
    fn test_two_seats_share_the_same_first_chopstick() {
        let a = AcquisitionOrder::between(0, 1).unwrap();
        let b = AcquisitionOrder::between(1, 0).unwrap();
        assert_eq!(a.first(), 0);
        assert_eq!(b.first(), 0);
    }

    #[test]
    fn test_same_chopstick_is_rejected() {
        assert_eq!(
            AcquisitionOrder::between(0, 0),
            Err(FrameworkError::SameChopstick { index: 0 })
        );
    }

    #[tokio::test]
    async fn test_pick_up_and_put_down_are_nested() {
        let observer = RecordingObserver::new();
        let left = Chopstick::new(4);
        let right = Chopstick::new(0);
        let order = AcquisitionOrder::between(4, 0).unwrap();

        let pair = order.pick_up(4, &left, &right, &observer).await.unwrap();
        assert_eq!((pair.first(), pair.second()), (0, 4));
        assert_eq!(left.holder(), Some(4));
        assert_eq!(right.holder(), Some(4));

        pair.put_down(&observer);
        assert!(left.is_free() && right.is_free());

        let chopsticks: Vec<(usize, &str)> = observer
            .events()
            .iter()
            .map(|event| match event {
                DiningEvent::Requesting { chopstick, .. } => (*chopstick, "request"),
                DiningEvent::Acquired { chopstick, .. } => (*chopstick, "acquire"),
                DiningEvent::Released { chopstick, .. } => (*chopstick, "release"),
                other => panic!("unexpected event {other:?}"),
            })
            .collect();
        assert_eq!(
            chopsticks,
            vec![
                (0, "request"),
                (0, "acquire"),
                (4, "request"),
                (4, "acquire"),
                (4, "release"),
                (0, "release"),
            ]
        );
    }

    #[tokio::test]
    async fn test_dropped_pair_frees_both_chopsticks() {
        let observer = RecordingObserver::new();
        let left = Chopstick::new(1);
        let right = Chopstick::new(2);
        let order = AcquisitionOrder::between(1, 2).unwrap();

        let pair = order.pick_up(1, &left, &right, &observer).await.unwrap();
        drop(pair);
        assert!(left.is_free());
        assert!(right.is_free());
    }
}
