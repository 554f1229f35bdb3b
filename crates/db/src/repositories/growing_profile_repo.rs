//! Repository for the `user_growing_profiles` table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::growing_profile::{ReminderCandidate, UserGrowingProfile};

/// Column list for `user_growing_profiles` queries.
const PROFILE_COLUMNS: &str = "id, user_id, hardiness_zone_id, last_frost_date, \
    first_frost_date, enable_indoor_start_reminders, enable_direct_sow_reminders, \
    enable_transplant_reminders, reminder_lead_days, created_at, updated_at";

/// Read access to growing profiles. Profiles are written by the settings
/// surface of the application, never by the reminder engine.
pub struct GrowingProfileRepo;

impl GrowingProfileRepo {
    /// Get the profile for a user, if they have configured one.
    pub async fn get_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserGrowingProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM user_growing_profiles WHERE user_id = $1");
        sqlx::query_as::<_, UserGrowingProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List every user the batch runner should consider this run: anyone
    /// with a global toggle on, or with at least one active seed carrying a
    /// per-seed override flag.
    pub async fn list_reminder_candidates(
        pool: &PgPool,
    ) -> Result<Vec<ReminderCandidate>, sqlx::Error> {
        sqlx::query_as::<_, ReminderCandidate>(
            "SELECT u.id AS user_id, u.email, u.display_name, \
                    p.hardiness_zone_id, p.last_frost_date, \
                    p.enable_indoor_start_reminders, p.enable_direct_sow_reminders, \
                    p.enable_transplant_reminders, p.reminder_lead_days \
             FROM users u \
             JOIN user_growing_profiles p ON p.user_id = u.id \
             WHERE p.enable_indoor_start_reminders \
                OR p.enable_direct_sow_reminders \
                OR p.enable_transplant_reminders \
                OR EXISTS ( \
                    SELECT 1 FROM inventory_seeds s \
                    WHERE s.user_id = u.id \
                      AND NOT s.is_archived \
                      AND (s.remind_indoor_start OR s.remind_direct_sow OR s.remind_transplant) \
                ) \
             ORDER BY u.id",
        )
        .fetch_all(pool)
        .await
    }
}
