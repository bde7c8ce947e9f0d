//! Repository for the append-only `xp_log` table.

use fitquest_core::types::DbId;
use sqlx::postgres::PgExecutor;

use crate::models::xp_log::{CreateXpLogEntry, XpLogEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, amount, source, reference_id, note, created_at";

/// Appends and reads XP ledger entries. There is no update or delete path.
pub struct XpLogRepo;

impl XpLogRepo {
    /// Append a ledger entry, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateXpLogEntry,
    ) -> Result<XpLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO xp_log (user_id, amount, source, reference_id, note)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, XpLogEntry>(&query)
            .bind(input.user_id)
            .bind(input.amount)
            .bind(&input.source)
            .bind(&input.reference_id)
            .bind(&input.note)
            .fetch_one(executor)
            .await
    }

    /// List a user's entries, newest first.
    pub async fn list_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<XpLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM xp_log
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, XpLogEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// List every entry carrying a given correlation id, oldest first.
    pub async fn list_by_reference(
        executor: impl PgExecutor<'_>,
        reference_id: &str,
    ) -> Result<Vec<XpLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM xp_log
             WHERE reference_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, XpLogEntry>(&query)
            .bind(reference_id)
            .fetch_all(executor)
            .await
    }

    /// Sum of all amounts for a user. Equals the character's `xp`.
    pub async fn total_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM xp_log WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }
}
