use crate::framework::{DiningEvent, FrameworkError, Observer, Pause};
use crate::lifecycle::{DinnerConfig, DinnerError};
use crate::model::Table;
use crate::philosopher_actor::{self, PhilosopherReport};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator for one dinner.
///
/// `DinnerSystem` is responsible for:
/// - **Setup**: Validating the config and laying out the [`Table`]
/// - **Wiring**: Handing every philosopher its two neighbouring chopsticks
/// - **Launch**: Spawning one Tokio task per philosopher
/// - **Join**: Waiting until every philosopher has finished its rounds
///
/// # Example
///
/// ```ignore
/// let config = DinnerConfig::default();
/// let system = DinnerSystem::start(&config, config.pause(), TracingObserver)?;
///
/// // Blocks until all philosophers are done eating
/// let report = system.join().await?;
/// assert_eq!(report.total_meals(), 15);
/// ```
pub struct DinnerSystem {
    table: Table,
    observer: Arc<dyn Observer>,

    /// One task per seat, in seat order
    handles: Vec<JoinHandle<Result<PhilosopherReport, FrameworkError>>>,
}

impl DinnerSystem {
    /// Validates `config`, seats the philosophers and starts them.
    ///
    /// Must be called from within a Tokio runtime. Nothing is spawned when the
    /// config is rejected.
    pub fn start(
        config: &DinnerConfig,
        pause: impl Pause,
        observer: impl Observer,
    ) -> Result<Self, DinnerError> {
        config.validate()?;

        let observer: Arc<dyn Observer> = Arc::new(observer);
        let table = Table::new(config.philosophers);
        let actors =
            philosopher_actor::new(&table, config.cycles, Arc::new(pause), Arc::clone(&observer))?;

        observer.record(DiningEvent::DinnerStarted {
            philosophers: config.philosophers,
            cycles: config.cycles,
        });
        let handles = actors
            .into_iter()
            .map(|actor| tokio::spawn(actor.run()))
            .collect();

        Ok(Self {
            table,
            observer,
            handles,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Waits for every philosopher to finish.
    ///
    /// When one philosopher fails, the tasks not yet joined are aborted and
    /// awaited, so no philosopher outlives the system and every chopstick is
    /// back on the table when this returns.
    ///
    /// # Returns
    ///
    /// - `Ok(DinnerReport)` with one entry per seat, in seat order
    /// - `Err(DinnerError)` for the first philosopher that failed or panicked
    pub async fn join(self) -> Result<DinnerReport, DinnerError> {
        let mut philosophers = Vec::with_capacity(self.handles.len());
        let mut handles = self.handles.into_iter().enumerate();

        while let Some((seat, handle)) = handles.next() {
            let failure = match handle.await {
                Ok(Ok(report)) => {
                    philosophers.push(report);
                    continue;
                }
                Ok(Err(e)) => {
                    error!(seat, error = %e, "Philosopher failed");
                    DinnerError::from(e)
                }
                Err(e) => {
                    error!(seat, error = %e, "Philosopher task failed");
                    DinnerError::PhilosopherPanicked {
                        seat,
                        reason: e.to_string(),
                    }
                }
            };

            let remaining: Vec<_> = handles.by_ref().map(|(_, handle)| handle).collect();
            for handle in &remaining {
                handle.abort();
            }
            for handle in remaining {
                // Cancelled or not, the task has dropped its guards once awaited.
                let _ = handle.await;
            }
            return Err(failure);
        }

        self.observer.record(DiningEvent::DinnerEnded);
        let report = DinnerReport { philosophers };
        info!(meals = report.total_meals(), "All philosophers have left the table");
        Ok(report)
    }
}

/// Outcome of a finished dinner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DinnerReport {
    pub philosophers: Vec<PhilosopherReport>,
}

impl DinnerReport {
    pub fn total_meals(&self) -> usize {
        self.philosophers.iter().map(|p| p.times_eaten).sum()
    }

    /// The philosopher who waited longest for chopsticks.
    pub fn hungriest(&self) -> Option<&PhilosopherReport> {
        self.philosophers.iter().max_by_key(|p| p.hungry_for)
    }

    pub fn total_hungry_for(&self) -> Duration {
        self.philosophers.iter().map(|p| p.hungry_for).sum()
    }
}
