//! Hardiness zone reference data model.

use serde::Serialize;
use sqlx::FromRow;
use trellis_core::types::DbId;

/// A row from the static `hardiness_zones` lookup table.
///
/// Frost columns are year-agnostic `"Mon D"` strings, or the literal
/// `"Frost-free"` sentinel for zones that never frost (11a and warmer).
/// Parsing and projection onto a concrete year happen in
/// `trellis_core::frost`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HardinessZone {
    pub id: DbId,
    /// Zone code, e.g. `"7a"`.
    pub code: String,
    pub last_frost_spring: String,
    pub first_frost_fall: String,
    pub min_temp_f: i16,
    pub max_temp_f: i16,
}
