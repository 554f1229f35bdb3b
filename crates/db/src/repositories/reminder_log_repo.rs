//! Repository for the append-only `planting_reminder_log` table.

use chrono::Datelike;
use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::reminder_log::{CreateReminderLogEntry, PlantingReminderLogEntry};

/// Column list for `planting_reminder_log` queries.
const LOG_COLUMNS: &str =
    "id, user_id, reminder_type, target_date, year, plant_names, created_at";

/// Read and append access to the reminder send ledger. Rows are never
/// updated or deleted here; retention is an external concern.
pub struct ReminderLogRepo;

impl ReminderLogRepo {
    /// List a user's log rows for one year.
    pub async fn list_for_user_year(
        pool: &PgPool,
        user_id: DbId,
        year: i32,
    ) -> Result<Vec<PlantingReminderLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM planting_reminder_log \
             WHERE user_id = $1 AND year = $2 \
             ORDER BY target_date, reminder_type"
        );
        sqlx::query_as::<_, PlantingReminderLogEntry>(&query)
            .bind(user_id)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    /// Atomically record one delivered (reminder type, target date) pair.
    ///
    /// `INSERT ... ON CONFLICT DO NOTHING` keyed on the natural
    /// (user_id, reminder_type, target_date) constraint, in a single
    /// round-trip. Returns `true` when the row landed and `false` when a
    /// concurrent run already recorded the same pair; callers treat the
    /// latter as a benign no-op, never an error.
    pub async fn insert_if_absent(
        pool: &PgPool,
        entry: &CreateReminderLogEntry,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO planting_reminder_log \
                (user_id, reminder_type, target_date, year, plant_names) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, reminder_type, target_date) DO NOTHING",
        )
        .bind(entry.user_id)
        .bind(entry.reminder_type.as_str())
        .bind(entry.target_date)
        .bind(entry.target_date.year())
        .bind(serde_json::json!(entry.plant_names))
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
