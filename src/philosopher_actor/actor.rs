//! # Philosopher Run Loop
//!
//! [`PhilosopherActor`] owns one [`Philosopher`] and drives it through its rounds:
//!
//! 1. **Think** for a pause, holding nothing.
//! 2. **Pick up** both chopsticks in [`AcquisitionOrder`].
//! 3. **Eat** for a pause while holding both, then count the round.
//! 4. **Put down** the second chopstick, then the first.
//!
//! After the configured number of rounds it reports `Finished` and stops.
//! Every event passes through a [`Lifecycle`] witness that advances the
//! philosopher's [`PhilosopherState`] before forwarding it to the real observer.

use crate::framework::{AcquisitionOrder, DiningEvent, FrameworkError, Observer, Pause, Phase};
use crate::model::{Philosopher, PhilosopherState};
use crate::philosopher_actor::PhilosopherReport;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// The concurrent task body for one philosopher.
pub struct PhilosopherActor {
    philosopher: Philosopher,
    order: AcquisitionOrder,
    cycles: usize,
    pause: Arc<dyn Pause>,
    lifecycle: Lifecycle,
    hungry_for: Duration,
}

impl PhilosopherActor {
    /// Prepares `philosopher` for `cycles` rounds.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::SameChopstick`] if both of its chopsticks are the same
    /// lock, i.e. it sits alone at the table.
    pub fn new(
        philosopher: Philosopher,
        cycles: usize,
        pause: Arc<dyn Pause>,
        observer: Arc<dyn Observer>,
    ) -> Result<Self, FrameworkError> {
        let order = AcquisitionOrder::between(philosopher.left.index(), philosopher.right.index())?;
        Ok(Self {
            lifecycle: Lifecycle::new(philosopher.seat, observer),
            philosopher,
            order,
            cycles,
            pause,
            hungry_for: Duration::ZERO,
        })
    }

    pub fn philosopher(&self) -> &Philosopher {
        &self.philosopher
    }

    pub fn order(&self) -> AcquisitionOrder {
        self.order
    }

    pub fn state(&self) -> PhilosopherState {
        self.lifecycle.state()
    }

    /// Runs every round to completion.
    #[instrument(
        name = "philosopher",
        skip(self),
        fields(seat = self.philosopher.seat, name = %self.philosopher.name)
    )]
    pub async fn run(mut self) -> Result<PhilosopherReport, FrameworkError> {
        debug!(
            first = self.order.first(),
            second = self.order.second(),
            "Seated"
        );
        while self.philosopher.times_eaten < self.cycles {
            let round = self.philosopher.times_eaten + 1;
            self.lifecycle.record(DiningEvent::Thinking {
                philosopher: self.philosopher.seat,
                round,
            });
            self.pause.pause(Phase::Thinking).await;
            self.eat(round).await?;
        }

        self.lifecycle.record(DiningEvent::Finished {
            philosopher: self.philosopher.seat,
            times_eaten: self.philosopher.times_eaten,
        });
        Ok(PhilosopherReport {
            seat: self.philosopher.seat,
            name: self.philosopher.name,
            times_eaten: self.philosopher.times_eaten,
            hungry_for: self.hungry_for,
        })
    }

    async fn eat(&mut self, round: usize) -> Result<(), FrameworkError> {
        let seat = self.philosopher.seat;
        let hungry_since = Instant::now();
        let pair = self
            .order
            .pick_up(
                seat,
                &self.philosopher.left,
                &self.philosopher.right,
                &self.lifecycle,
            )
            .await?;
        self.hungry_for += hungry_since.elapsed();

        self.lifecycle.record(DiningEvent::Eating {
            philosopher: seat,
            round,
        });
        // `pair` stays alive across the pause; if this future is dropped here
        // both chopsticks still go back on the table.
        self.pause.pause(Phase::Eating).await;
        self.philosopher.times_eaten += 1;

        pair.put_down(&self.lifecycle);
        Ok(())
    }
}

/// Tracks a philosopher's state from the events it emits.
struct Lifecycle {
    seat: usize,
    state: Mutex<PhilosopherState>,
    observer: Arc<dyn Observer>,
}

impl Lifecycle {
    fn new(seat: usize, observer: Arc<dyn Observer>) -> Self {
        Self {
            seat,
            state: Mutex::new(PhilosopherState::default()),
            observer,
        }
    }

    fn state(&self) -> PhilosopherState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for Lifecycle {
    fn record(&self, event: DiningEvent) {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let current = *state;
            match current.after(&event) {
                Some(next) => {
                    debug!(seat = self.seat, from = %current, to = %next, "transition");
                    *state = next;
                }
                None => warn!(seat = self.seat, state = %current, ?event, "unexpected event"),
            }
        }
        self.observer.record(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{check_trace, InstantPause, RecordingObserver};
    use crate::model::Table;

    fn actor(table: &Table, seat: usize, cycles: usize, recorder: &RecordingObserver) -> PhilosopherActor {
        PhilosopherActor::new(
            table.philosopher(seat).unwrap(),
            cycles,
            Arc::new(InstantPause),
            Arc::new(recorder.clone()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lone_rounds_follow_the_lifecycle() {
        let table = Table::new(3);
        let recorder = RecordingObserver::new();
        let actor = actor(&table, 2, 4, &recorder);
        assert_eq!(actor.philosopher().name, "Philosopher 3");
        assert_eq!(actor.philosopher().left.index(), 2);
        assert_eq!(actor.philosopher().right.index(), 0);
        assert_eq!(actor.state(), PhilosopherState::Seated);
        assert!(!actor.order().left_first());

        let report = actor.run().await.unwrap();
        assert_eq!(report.seat, 2);
        assert_eq!(report.name, "Philosopher 3");
        assert_eq!(report.times_eaten, 4);
        assert!(table.all_free());

        // Only seat 2 ran; the other seats never started.
        let events: Vec<DiningEvent> = recorder.events();
        assert_eq!(events.len(), 4 * 8 + 1);
        assert!(events.iter().all(|event| event.philosopher() == Some(2)));
        assert_eq!(
            events[1],
            DiningEvent::Requesting {
                philosopher: 2,
                chopstick: 0,
                slot: crate::framework::Slot::First
            }
        );
    }

    #[tokio::test]
    async fn test_zero_rounds_finishes_immediately() {
        let table = Table::new(2);
        let recorder = RecordingObserver::new();
        let report = actor(&table, 0, 0, &recorder).run().await.unwrap();
        assert_eq!(report.times_eaten, 0);
        assert_eq!(
            recorder.events(),
            vec![DiningEvent::Finished {
                philosopher: 0,
                times_eaten: 0
            }]
        );
    }

    #[tokio::test]
    async fn test_alone_at_the_table_is_rejected() {
        let table = Table::new(1);
        let result = PhilosopherActor::new(
            table.philosopher(0).unwrap(),
            1,
            Arc::new(InstantPause),
            Arc::new(RecordingObserver::new()),
        );
        assert!(matches!(result, Err(FrameworkError::SameChopstick { index: 0 })));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_two_actors_serialize_on_chopstick_zero() {
        let table = Table::new(2);
        let recorder = RecordingObserver::new();
        let a = tokio::spawn(actor(&table, 0, 5, &recorder).run());
        let b = tokio::spawn(actor(&table, 1, 5, &recorder).run());
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let summary = check_trace(&recorder.events(), 2, 5).unwrap();
        assert_eq!(summary.times_eaten, vec![5, 5]);
    }
}
