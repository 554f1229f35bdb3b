//! Repository for the `inventory_seeds` table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::inventory::InventorySeedWithGuide;

/// Read access to a user's seed inventory.
pub struct InventorySeedRepo;

impl InventorySeedRepo {
    /// List a user's non-archived seeds, each joined to its linked
    /// encyclopedia guide (guide columns NULL when no link exists).
    pub async fn list_active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<InventorySeedWithGuide>, sqlx::Error> {
        sqlx::query_as::<_, InventorySeedWithGuide>(
            "SELECT s.id, s.user_id, s.plant_guide_id, s.name, s.variety, s.category, \
                    s.indoor_start_weeks, s.outdoor_start_weeks, s.transplant_weeks, \
                    s.harvest_weeks, s.remind_indoor_start, s.remind_direct_sow, \
                    s.remind_transplant, \
                    g.category AS guide_category, \
                    g.indoor_start_weeks AS guide_indoor_start_weeks, \
                    g.outdoor_start_weeks AS guide_outdoor_start_weeks, \
                    g.transplant_weeks AS guide_transplant_weeks, \
                    g.harvest_weeks AS guide_harvest_weeks \
             FROM inventory_seeds s \
             LEFT JOIN plant_guides g ON g.id = s.plant_guide_id \
             WHERE s.user_id = $1 AND NOT s.is_archived \
             ORDER BY s.name, s.variety",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
