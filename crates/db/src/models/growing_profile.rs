//! Growing profile entity model and the reminder-candidate projection.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use trellis_core::reminder::{ReminderToggles, DEFAULT_LEAD_DAYS};
use trellis_core::types::{DbId, Timestamp};

/// A row from the `user_growing_profiles` table.
///
/// Owned and mutated by the user through settings; strictly read-only to the
/// reminder engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserGrowingProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub hardiness_zone_id: Option<DbId>,
    /// Explicit last-frost override; only month/day are meaningful.
    pub last_frost_date: Option<NaiveDate>,
    pub first_frost_date: Option<NaiveDate>,
    pub enable_indoor_start_reminders: bool,
    pub enable_direct_sow_reminders: bool,
    pub enable_transplant_reminders: bool,
    pub reminder_lead_days: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One user the batch runner should consider: profile fields joined with the
/// mailbox, selected because at least one reminder toggle (global or
/// per-seed) is enabled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReminderCandidate {
    pub user_id: DbId,
    pub email: String,
    pub display_name: String,
    pub hardiness_zone_id: Option<DbId>,
    pub last_frost_date: Option<NaiveDate>,
    pub enable_indoor_start_reminders: bool,
    pub enable_direct_sow_reminders: bool,
    pub enable_transplant_reminders: bool,
    pub reminder_lead_days: Option<i32>,
}

impl ReminderCandidate {
    /// The profile-level (global scope) toggles.
    pub fn global_toggles(&self) -> ReminderToggles {
        ReminderToggles {
            indoor_start: self.enable_indoor_start_reminders,
            direct_sow: self.enable_direct_sow_reminders,
            transplant: self.enable_transplant_reminders,
        }
    }

    /// The reminder window length, defaulting when the profile is silent.
    pub fn lead_days(&self) -> i32 {
        self.reminder_lead_days.unwrap_or(DEFAULT_LEAD_DAYS)
    }
}
