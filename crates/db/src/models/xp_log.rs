//! XP ledger entry model and DTOs.

use fitquest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An immutable row from the `xp_log` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct XpLogEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: i32,
    pub source: String,
    /// Correlation id such as `session:42`. Not unique.
    pub reference_id: Option<String>,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending a ledger entry.
#[derive(Debug, Clone)]
pub struct CreateXpLogEntry {
    pub user_id: DbId,
    pub amount: i32,
    pub source: String,
    pub reference_id: Option<String>,
    pub note: Option<String>,
}
