//! Planting reminder log entity model and insert DTO.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use trellis_core::reminder::ReminderType;
use trellis_core::types::{DbId, Timestamp};

/// A row from the append-only `planting_reminder_log` table.
///
/// Natural key is (user_id, reminder_type, target_date), enforced by a
/// unique constraint; a row exists only for reminders that were actually
/// delivered. This engine never updates or deletes rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlantingReminderLogEntry {
    pub id: DbId,
    pub user_id: DbId,
    /// Stable string form of [`ReminderType`].
    pub reminder_type: String,
    pub target_date: NaiveDate,
    pub year: i32,
    /// Snapshot of the plant names the consolidated email covered.
    pub plant_names: serde_json::Value,
    pub created_at: Timestamp,
}

impl PlantingReminderLogEntry {
    /// The dedup key this row occupies, in the same format the core
    /// deduplicator builds from candidates.
    pub fn dedup_key(&self) -> String {
        format!("{}-{}", self.reminder_type, self.target_date.format("%Y-%m-%d"))
    }
}

/// DTO for recording one delivered (reminder type, target date) pair.
#[derive(Debug, Clone)]
pub struct CreateReminderLogEntry {
    pub user_id: DbId,
    pub reminder_type: ReminderType,
    pub target_date: NaiveDate,
    pub plant_names: Vec<String>,
}
