//! Repository for the static `hardiness_zones` lookup table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::hardiness_zone::HardinessZone;

/// Column list for `hardiness_zones` queries.
const ZONE_COLUMNS: &str = "id, code, last_frost_spring, first_frost_fall, min_temp_f, max_temp_f";

/// Read access to hardiness zone reference data. Seed data only; nothing
/// here mutates the table.
pub struct HardinessZoneRepo;

impl HardinessZoneRepo {
    /// List all zones, coldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<HardinessZone>, sqlx::Error> {
        let query = format!("SELECT {ZONE_COLUMNS} FROM hardiness_zones ORDER BY min_temp_f");
        sqlx::query_as::<_, HardinessZone>(&query).fetch_all(pool).await
    }

    /// Get a zone by primary key.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<HardinessZone>, sqlx::Error> {
        let query = format!("SELECT {ZONE_COLUMNS} FROM hardiness_zones WHERE id = $1");
        sqlx::query_as::<_, HardinessZone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a zone by its code, e.g. `"7a"`.
    pub async fn get_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<HardinessZone>, sqlx::Error> {
        let query = format!("SELECT {ZONE_COLUMNS} FROM hardiness_zones WHERE code = $1");
        sqlx::query_as::<_, HardinessZone>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}
