//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. The engine's contract with
//! user data is read-only; the reminder log is the single write path.

pub mod growing_profile_repo;
pub mod hardiness_zone_repo;
pub mod inventory_seed_repo;
pub mod plant_guide_repo;
pub mod reminder_log_repo;
pub mod wishlist_repo;

pub use growing_profile_repo::GrowingProfileRepo;
pub use hardiness_zone_repo::HardinessZoneRepo;
pub use inventory_seed_repo::InventorySeedRepo;
pub use plant_guide_repo::PlantGuideRepo;
pub use reminder_log_repo::ReminderLogRepo;
pub use wishlist_repo::WishlistRepo;
