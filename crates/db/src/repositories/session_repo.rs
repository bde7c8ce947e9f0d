//! Repository for the `user_sessions` table.
//!
//! The plaintext refresh token never reaches the database; every lookup
//! goes through its hash.

use fitquest_core::types::DbId;
use sqlx::postgres::PgExecutor;

use crate::models::session::{NewRefreshSession, RefreshSession};

const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, is_revoked, \
                       created_at, updated_at";

/// Issues, consumes and revokes refresh sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Store a newly issued refresh token.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &NewRefreshSession,
    ) -> Result<RefreshSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(executor)
            .await
    }

    /// Spend a refresh token.
    ///
    /// Revokes the live session matching `token_hash` in a single `UPDATE`
    /// and returns it as it was before revocation. Returns `None` when the
    /// token is unknown, expired or already spent. Of two concurrent calls
    /// with the same hash, exactly one gets the row.
    pub async fn consume(
        executor: impl PgExecutor<'_>,
        token_hash: &str,
    ) -> Result<Option<RefreshSession>, sqlx::Error> {
        let query = format!(
            "UPDATE user_sessions SET is_revoked = true
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(token_hash)
            .fetch_optional(executor)
            .await
    }

    /// Number of live sessions a user holds.
    pub async fn count_live_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_sessions
             WHERE user_id = $1 AND is_revoked = false AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(executor)
        .await
    }

    /// Revoke every live session of a user (logout). Returns how many were revoked.
    pub async fn revoke_all_for_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET is_revoked = true
             WHERE user_id = $1 AND is_revoked = false",
        )
        .bind(user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
