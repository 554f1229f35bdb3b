//! Plant encyclopedia entity model.

use serde::Serialize;
use sqlx::FromRow;
use trellis_core::schedule::PlantScheduleOffsets;
use trellis_core::types::{DbId, Timestamp};

/// A row from the shared `plant_guides` encyclopedia table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlantGuide {
    pub id: DbId,
    pub name: String,
    pub variety: Option<String>,
    pub category: Option<String>,
    pub indoor_start_weeks: Option<i32>,
    pub outdoor_start_weeks: Option<i32>,
    pub transplant_weeks: Option<i32>,
    pub harvest_weeks: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PlantGuide {
    /// The guide's week offsets as the core calculator consumes them.
    pub fn offsets(&self) -> PlantScheduleOffsets {
        PlantScheduleOffsets {
            indoor_start_weeks: self.indoor_start_weeks,
            outdoor_start_weeks: self.outdoor_start_weeks,
            transplant_weeks: self.transplant_weeks,
            harvest_weeks: self.harvest_weeks,
        }
    }
}
