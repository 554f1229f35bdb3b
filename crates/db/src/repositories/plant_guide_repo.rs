//! Repository for the `plant_guides` encyclopedia table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::plant_guide::PlantGuide;

/// Column list for `plant_guides` queries.
const GUIDE_COLUMNS: &str = "id, name, variety, category, indoor_start_weeks, \
    outdoor_start_weeks, transplant_weeks, harvest_weeks, created_at, updated_at";

/// Read access to the shared plant encyclopedia.
pub struct PlantGuideRepo;

impl PlantGuideRepo {
    /// List guides, optionally restricted to one category. `None` is the
    /// "all" view.
    pub async fn list(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<PlantGuide>, sqlx::Error> {
        let query = format!(
            "SELECT {GUIDE_COLUMNS} FROM plant_guides \
             WHERE $1::TEXT IS NULL OR category = $1 \
             ORDER BY name, variety"
        );
        sqlx::query_as::<_, PlantGuide>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Get a guide by primary key.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<PlantGuide>, sqlx::Error> {
        let query = format!("SELECT {GUIDE_COLUMNS} FROM plant_guides WHERE id = $1");
        sqlx::query_as::<_, PlantGuide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
