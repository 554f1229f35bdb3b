//! User entity model.

use serde::Serialize;
use sqlx::FromRow;
use trellis_core::types::{DbId, Timestamp};

/// A user row from the `users` table.
///
/// Deliberately lean: account management, credentials, and roles belong to
/// the surrounding application. The reminder engine only needs a mailbox.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
