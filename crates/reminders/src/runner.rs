//! The reminder batch runner.
//!
//! One entry point, [`ReminderBatchRunner::run`], invoked per tick by the
//! scheduler (or once via the worker's `--once`). Users are processed
//! sequentially and independently: resolve frost date → aggregate
//! toggle-filtered events → window-match → dedupe against the log → send
//! one consolidated email → record log rows. Any failure for one user is
//! contained to that user.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use trellis_core::frost::resolve_last_frost;
use trellis_core::reminder::{filter_new, group_by_type, match_window, PlantingEvent, ReminderType};
use trellis_core::types::DbId;
use trellis_db::models::growing_profile::ReminderCandidate;
use trellis_db::models::reminder_log::CreateReminderLogEntry;
use trellis_db::repositories::{GrowingProfileRepo, HardinessZoneRepo, ReminderLogRepo};
use trellis_db::DbPool;

use crate::aggregate::ScheduleAggregator;
use crate::delivery::{EmailError, Mailer};
use crate::message;

// ---------------------------------------------------------------------------
// Result summary
// ---------------------------------------------------------------------------

/// Aggregate outcome of one batch run, returned to the invoking scheduler
/// for logging and alerting. End users never see any of this; they see
/// either a consolidated email or nothing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Users who received a consolidated email this run.
    pub sent: u32,
    /// Users whose send failed; their candidates retry naturally next run.
    pub failed: u32,
    /// Users with nothing derivable or nothing new due.
    pub skipped: u32,
    /// Human-readable error strings collected across the run.
    pub errors: Vec<String>,
}

/// Per-user outcome of the pipeline.
enum UserOutcome {
    Sent,
    Skipped,
}

/// Per-user pipeline failure.
#[derive(Debug, thiserror::Error)]
enum ProcessError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("mail transport error: {0}")]
    Mail(#[from] EmailError),

    /// The send succeeded but a ledger write did not. Kept distinct from
    /// [`ProcessError::Db`] because the user DID get their email.
    #[error("log write failed after send: {0}")]
    LogWrite(sqlx::Error),
}

// ---------------------------------------------------------------------------
// ReminderBatchRunner
// ---------------------------------------------------------------------------

/// Drives the per-user reminder pipeline over every candidate user.
pub struct ReminderBatchRunner {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
}

impl ReminderBatchRunner {
    /// Create a runner over the given pool and transport.
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self { pool, mailer }
    }

    /// Run one batch. `now` is injected rather than read from the clock so
    /// runs are reproducible under test and backfillable by an operator.
    pub async fn run(&self, now: DateTime<Utc>) -> RunSummary {
        let mut summary = RunSummary::default();

        let candidates = match GrowingProfileRepo::list_reminder_candidates(&self.pool).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list reminder candidates");
                summary.errors.push(format!("candidate query: {e}"));
                return summary;
            }
        };

        tracing::debug!(count = candidates.len(), "Processing reminder candidates");

        for candidate in &candidates {
            match self.process_user(candidate, now).await {
                Ok(UserOutcome::Sent) => summary.sent += 1,
                Ok(UserOutcome::Skipped) => summary.skipped += 1,
                Err(ProcessError::LogWrite(e)) => {
                    // The email went out but the ledger row didn't land, so
                    // the same reminder will be re-sent next run. Accepted
                    // trade-off: a duplicate beats a missed reminder.
                    summary.sent += 1;
                    summary.errors.push(format!(
                        "user {}: log write failed after send: {e}",
                        candidate.user_id
                    ));
                    tracing::error!(
                        user_id = candidate.user_id,
                        error = %e,
                        "Reminder log write failed after a successful send; user will be re-mailed next run"
                    );
                }
                Err(e) => {
                    summary.failed += 1;
                    summary.errors.push(format!("user {}: {e}", candidate.user_id));
                    tracing::error!(
                        user_id = candidate.user_id,
                        error = %e,
                        "Reminder processing failed for user"
                    );
                }
            }
        }

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "Reminder batch complete"
        );

        summary
    }

    /// The full pipeline for a single user.
    async fn process_user(
        &self,
        candidate: &ReminderCandidate,
        now: DateTime<Utc>,
    ) -> Result<UserOutcome, ProcessError> {
        let today = now.date_naive();

        // 1. Resolve the frost anchor. Unresolvable is a skip, not an error.
        let zone_label = match candidate.hardiness_zone_id {
            Some(zone_id) => HardinessZoneRepo::get(&self.pool, zone_id)
                .await?
                .map(|zone| zone.last_frost_spring),
            None => None,
        };
        let Some(last_frost) =
            resolve_last_frost(candidate.last_frost_date, zone_label.as_deref(), today.year())
        else {
            tracing::debug!(user_id = candidate.user_id, "No frost date derivable, skipping");
            return Ok(UserOutcome::Skipped);
        };

        // 2–3. Aggregate toggle-filtered events, then window-match.
        let events = ScheduleAggregator::reminder_events(&self.pool, candidate, last_frost).await?;
        let due = match_window(&events, today, candidate.lead_days());

        // 4. Strip everything the ledger already covers.
        let logged = self
            .logged_keys(candidate.user_id, today, candidate.lead_days())
            .await?;
        let fresh = filter_new(due, &logged);
        if fresh.is_empty() {
            return Ok(UserOutcome::Skipped);
        }

        // 6–7. One consolidated email covering every bucket.
        let buckets = group_by_type(&fresh);
        let content = message::compose(&candidate.display_name, &buckets);
        self.mailer
            .send(&candidate.email, &content.subject, &content.body)
            .await?;

        // 8. Record the send: one row per unique (type, date) pair.
        for entry in collapse_log_entries(candidate.user_id, &fresh) {
            let inserted = ReminderLogRepo::insert_if_absent(&self.pool, &entry)
                .await
                .map_err(ProcessError::LogWrite)?;
            if !inserted {
                tracing::debug!(
                    user_id = candidate.user_id,
                    reminder_type = entry.reminder_type.as_str(),
                    target_date = %entry.target_date,
                    "Log row already recorded by a concurrent run"
                );
            }
        }

        Ok(UserOutcome::Sent)
    }

    /// Dedup keys already in the ledger for every year the reminder window
    /// touches (two when the window crosses New Year, else one).
    async fn logged_keys(
        &self,
        user_id: DbId,
        today: NaiveDate,
        lead_days: i32,
    ) -> Result<HashSet<String>, sqlx::Error> {
        let window_end = today + Duration::days(i64::from(lead_days));
        let mut years = vec![today.year()];
        if window_end.year() != today.year() {
            years.push(window_end.year());
        }

        let mut keys = HashSet::new();
        for year in years {
            for row in ReminderLogRepo::list_for_user_year(&self.pool, user_id, year).await? {
                keys.insert(row.dedup_key());
            }
        }
        Ok(keys)
    }
}

// ---------------------------------------------------------------------------
// Log row collapsing (pure)
// ---------------------------------------------------------------------------

/// Collapse sent candidates into log rows: one per unique
/// (reminder type, target date), with every covered plant in the snapshot,
/// mirroring the one consolidated email that covered all of them.
fn collapse_log_entries(user_id: DbId, events: &[PlantingEvent]) -> Vec<CreateReminderLogEntry> {
    let mut grouped: BTreeMap<(ReminderType, NaiveDate), Vec<String>> = BTreeMap::new();
    for event in events {
        if let Some(reminder_type) = event.reminder_type() {
            grouped
                .entry((reminder_type, event.date))
                .or_default()
                .push(event.display_label());
        }
    }

    grouped
        .into_iter()
        .map(|((reminder_type, target_date), plant_names)| CreateReminderLogEntry {
            user_id,
            reminder_type,
            target_date,
            plant_names,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::reminder::EventSource;
    use trellis_core::schedule::Stage;

    fn event(label: &str, stage: Stage, day: u32) -> PlantingEvent {
        PlantingEvent {
            plant_label: label.to_string(),
            variety: None,
            category: None,
            stage,
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            source: EventSource::Inventory,
        }
    }

    // -- collapse_log_entries -------------------------------------------------

    #[test]
    fn plants_sharing_type_and_date_collapse_into_one_row() {
        let events = vec![
            event("Kale", Stage::DirectSow, 16),
            event("Carrot", Stage::DirectSow, 16),
        ];
        let entries = collapse_log_entries(7, &events);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, 7);
        assert_eq!(entries[0].reminder_type, ReminderType::DirectSow);
        assert_eq!(entries[0].plant_names, vec!["Kale", "Carrot"]);
    }

    #[test]
    fn distinct_dates_get_distinct_rows() {
        let events = vec![
            event("Kale", Stage::DirectSow, 16),
            event("Carrot", Stage::DirectSow, 17),
        ];
        let entries = collapse_log_entries(7, &events);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn distinct_types_get_distinct_rows_even_on_one_date() {
        let events = vec![
            event("Tomato", Stage::Transplant, 16),
            event("Carrot", Stage::DirectSow, 16),
        ];
        let entries = collapse_log_entries(7, &events);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn unremindable_stages_produce_no_rows() {
        let events = vec![event("Squash", Stage::Harvest, 16)];
        assert!(collapse_log_entries(7, &events).is_empty());
    }
}
