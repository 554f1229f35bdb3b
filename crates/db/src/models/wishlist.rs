//! Wishlist entity models.

use serde::Serialize;
use sqlx::FromRow;
use trellis_core::schedule::PlantScheduleOffsets;
use trellis_core::types::{DbId, Timestamp};

/// A row from the `wishlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistItem {
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
    pub is_purchased: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A wishlist item joined to its linked encyclopedia guide. Wishlist rows
/// carry no per-item reminder flags; the global toggles govern them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistItemWithGuide {
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
    pub guide_category: Option<String>,
    pub guide_indoor_start_weeks: Option<i32>,
    pub guide_outdoor_start_weeks: Option<i32>,
    pub guide_transplant_weeks: Option<i32>,
    pub guide_harvest_weeks: Option<i32>,
}

impl WishlistItemWithGuide {
    /// Resolve the offsets this item schedules by; same precedence rule as
    /// inventory seeds (linked guide wins entirely).
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

    /// Category for display, preferring the item's own over the guide's.
    pub fn display_category(&self) -> Option<&str> {
        self.category.as_deref().or(self.guide_category.as_deref())
    }
}
