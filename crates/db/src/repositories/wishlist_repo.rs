//! Repository for the `wishlist_items` table.

use sqlx::PgPool;
use trellis_core::types::DbId;

use crate::models::wishlist::WishlistItemWithGuide;

/// Read access to a user's wishlist.
pub struct WishlistRepo;

impl WishlistRepo {
    /// List a user's not-yet-purchased wishlist items, each joined to its
    /// linked encyclopedia guide (guide columns NULL when no link exists).
    pub async fn list_unpurchased_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WishlistItemWithGuide>, sqlx::Error> {
        sqlx::query_as::<_, WishlistItemWithGuide>(
            "SELECT w.id, w.user_id, w.plant_guide_id, w.name, w.variety, w.category, \
                    w.indoor_start_weeks, w.outdoor_start_weeks, w.transplant_weeks, \
                    w.harvest_weeks, \
                    g.category AS guide_category, \
                    g.indoor_start_weeks AS guide_indoor_start_weeks, \
                    g.outdoor_start_weeks AS guide_outdoor_start_weeks, \
                    g.transplant_weeks AS guide_transplant_weeks, \
                    g.harvest_weeks AS guide_harvest_weeks \
             FROM wishlist_items w \
             LEFT JOIN plant_guides g ON g.id = w.plant_guide_id \
             WHERE w.user_id = $1 AND NOT w.is_purchased \
             ORDER BY w.name, w.variety",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
