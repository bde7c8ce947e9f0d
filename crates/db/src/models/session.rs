//! Refresh-token sessions.
//!
//! A row is live while `is_revoked` is false and `expires_at` lies in the
//! future. Refreshing consumes the row and issues a new one, so each
//! refresh token is accepted at most once.

use fitquest_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    /// SHA-256 hex digest of the opaque token handed to the client.
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a freshly issued refresh token.
pub struct NewRefreshSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
