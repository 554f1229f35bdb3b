//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus any joined-row or insert DTOs the repositories need. The engine
//! reads user data and writes only the reminder log, so create/update DTOs
//! exist only where a write path exists.

pub mod growing_profile;
pub mod hardiness_zone;
pub mod inventory;
pub mod plant_guide;
pub mod reminder_log;
pub mod user;
pub mod wishlist;
