//! Persisted stat increments.

use fitquest_core::error::CoreError;
use fitquest_core::rpg::stats::Stat;
use fitquest_core::types::DbId;
use fitquest_db::repositories::CharacterRepo;
use sqlx::postgres::PgExecutor;

use super::EngineResult;

/// Add `amount` to one stat and return the new value, clamped to `[0, 100]`.
///
/// A single atomic `UPDATE`, so it is safe on a bare pool as well as inside
/// a transaction. Fails with `Character not found` when the user has no
/// character.
pub async fn increment_stat(
    executor: impl PgExecutor<'_>,
    user_id: DbId,
    stat: Stat,
    amount: i32,
) -> EngineResult<i32> {
    let value = CharacterRepo::increment_stat(executor, user_id, stat, amount)
        .await?
        .ok_or_else(|| CoreError::character_not_found(user_id))?;

    tracing::debug!(user_id, %stat, amount, value, "Stat incremented");
    Ok(value)
}
