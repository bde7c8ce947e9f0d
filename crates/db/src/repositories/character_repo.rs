//! Repository for the `characters` table.
//!
//! Read-modify-write sequences (XP awards, streak updates) must run inside
//! a transaction that first calls [`CharacterRepo::find_by_user_for_update`];
//! stat increments are a single atomic `UPDATE` and need no lock.

use fitquest_core::rpg::stats::{Stat, STAT_MAX, STAT_MIN};
use fitquest_core::rpg::streaks::StreakState;
use fitquest_core::types::DbId;
use sqlx::postgres::PgExecutor;

use crate::models::character::Character;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, level, xp, strength, endurance, discipline, \
                       current_streak, longest_streak, last_workout_date, avatar_config, \
                       created_at, updated_at";

/// Provides persistence for RPG characters, keyed by `user_id`.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a fresh character for `user_id` unless one already exists.
    ///
    /// Returns `None` when a row was already present; the existing row is
    /// never touched. All stats, XP and streaks start at their column
    /// defaults (level 1, everything else 0).
    pub async fn create_if_missing(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (user_id)
             VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Find the character owned by a user.
    pub async fn find_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE user_id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Find and row-lock a character for the rest of the enclosing transaction.
    ///
    /// Concurrent callers for the same user block here until the first
    /// transaction commits, so their read-modify-write cycles serialise.
    pub async fn find_by_user_for_update(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE user_id = $1 FOR UPDATE");
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Write `xp` and its derived `level` together.
    ///
    /// Returns `None` if the user has no character.
    pub async fn set_xp(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        xp: i32,
        level: i32,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET xp = $2, level = $3
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(xp)
            .bind(level)
            .fetch_optional(executor)
            .await
    }

    /// Atomically add `amount` to one stat, clamped to `[STAT_MIN, STAT_MAX]`.
    ///
    /// Returns the new value, or `None` if the user has no character.
    pub async fn increment_stat(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        stat: Stat,
        amount: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        let column = stat.column();
        let query = format!(
            "UPDATE characters
             SET {column} = LEAST($3, GREATEST($4, {column}::BIGINT + $2))::INTEGER
             WHERE user_id = $1
             RETURNING {column}"
        );
        sqlx::query_scalar::<_, i32>(&query)
            .bind(user_id)
            .bind(amount)
            .bind(i64::from(STAT_MAX))
            .bind(i64::from(STAT_MIN))
            .fetch_optional(executor)
            .await
    }

    /// Persist the streak fields.
    ///
    /// Returns `None` if the user has no character.
    pub async fn update_streak(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        streak: &StreakState,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                current_streak = $2,
                longest_streak = $3,
                last_workout_date = $4
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(streak.current_streak)
            .bind(streak.longest_streak)
            .bind(streak.last_workout_date)
            .fetch_optional(executor)
            .await
    }

    /// Replace the avatar configuration. The caller validates it first.
    pub async fn update_avatar_config(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        avatar_config: &serde_json::Value,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET avatar_config = $2
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(avatar_config)
            .fetch_optional(executor)
            .await
    }
}
