//! Periodic reminder scheduler.
//!
//! [`ReminderScheduler`] runs as a background task, ticking once per
//! interval (daily by default) and handing each tick to the
//! [`ReminderBatchRunner`]. Idempotency lives in the runner's ledger, not
//! here: ticking more often than daily only costs queries, never duplicate
//! emails.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use trellis_db::DbPool;

use crate::delivery::Mailer;
use crate::runner::ReminderBatchRunner;

/// Default time between batch runs.
const DEFAULT_RUN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// ReminderScheduler
// ---------------------------------------------------------------------------

/// Background service that runs the reminder batch on a periodic basis.
pub struct ReminderScheduler {
    runner: ReminderBatchRunner,
    interval: Duration,
}

impl ReminderScheduler {
    /// Create a scheduler with the default daily interval.
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            runner: ReminderBatchRunner::new(pool, mailer),
            interval: DEFAULT_RUN_INTERVAL,
        }
    }

    /// Override the run interval (operator knob; mainly for staging).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run the scheduler loop.
    ///
    /// The first tick fires immediately, so a freshly started worker
    /// catches up without waiting a full interval. The loop exits
    /// gracefully when the provided [`CancellationToken`] is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Reminder scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let summary = self.runner.run(Utc::now()).await;
                    if !summary.errors.is_empty() {
                        tracing::warn!(
                            errors = summary.errors.len(),
                            "Reminder run finished with errors"
                        );
                    }
                }
            }
        }
    }
}
