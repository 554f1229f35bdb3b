//! Seed inventory entity models.

use serde::Serialize;
use sqlx::FromRow;
use trellis_core::reminder::ReminderToggles;
use trellis_core::schedule::PlantScheduleOffsets;
use trellis_core::types::{DbId, Timestamp};

/// A row from the `inventory_seeds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventorySeed {
    pub id: DbId,
    pub user_id: DbId,
    pub plant_guide_id: Option<DbId>,
    pub name: String,
    pub variety: Option<String>,
    pub category: Option<String>,
    pub quantity: i32,
    pub indoor_start_weeks: Option<i32>,
    pub outdoor_start_weeks: Option<i32>,
    pub transplant_weeks: Option<i32>,
    pub harvest_weeks: Option<i32>,
    pub remind_indoor_start: bool,
    pub remind_direct_sow: bool,
    pub remind_transplant: bool,
    pub is_archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An inventory seed joined to its linked encyclopedia guide, as the
/// aggregator consumes it. Guide columns are NULL when no link exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InventorySeedWithGuide {
    pub id: DbId,
    pub user_id: DbId,
    pub plant_guide_id: Option<DbId>,
    pub name: String,
    pub variety: Option<String>,
    pub category: Option<String>,
    pub indoor_start_weeks: Option<i32>,
    pub outdoor_start_weeks: Option<i32>,
    pub transplant_weeks: Option<i32>,
    pub harvest_weeks: Option<i32>,
    pub remind_indoor_start: bool,
    pub remind_direct_sow: bool,
    pub remind_transplant: bool,
    pub guide_category: Option<String>,
    pub guide_indoor_start_weeks: Option<i32>,
    pub guide_outdoor_start_weeks: Option<i32>,
    pub guide_transplant_weeks: Option<i32>,
    pub guide_harvest_weeks: Option<i32>,
}

impl InventorySeedWithGuide {
    /// Resolve the offsets this seed schedules by.
    ///
    /// A linked guide is authoritative in full; the seed's own custom
    /// offsets apply only when no link exists. Never a per-field hybrid.
    pub fn effective_offsets(&self) -> PlantScheduleOffsets {
        if self.plant_guide_id.is_some() {
            PlantScheduleOffsets {
                indoor_start_weeks: self.guide_indoor_start_weeks,
                outdoor_start_weeks: self.guide_outdoor_start_weeks,
                transplant_weeks: self.guide_transplant_weeks,
                harvest_weeks: self.guide_harvest_weeks,
            }
        } else {
            PlantScheduleOffsets {
                indoor_start_weeks: self.indoor_start_weeks,
                outdoor_start_weeks: self.outdoor_start_weeks,
                transplant_weeks: self.transplant_weeks,
                harvest_weeks: self.harvest_weeks,
            }
        }
    }

    /// The seed's own reminder override flags.
    pub fn item_toggles(&self) -> ReminderToggles {
        ReminderToggles {
            indoor_start: self.remind_indoor_start,
            direct_sow: self.remind_direct_sow,
            transplant: self.remind_transplant,
        }
    }

    /// Category for display, preferring the seed's own over the guide's.
    pub fn display_category(&self) -> Option<&str> {
        self.category.as_deref().or(self.guide_category.as_deref())
    }
}
