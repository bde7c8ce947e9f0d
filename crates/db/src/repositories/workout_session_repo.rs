//! Repository for the `workout_sessions` table.

use fitquest_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use fitquest_core::scheduling::{STATUS_CANCELLED, STATUS_COMPLETED, STATUS_SCHEDULED};
use fitquest_core::types::{DbId, Timestamp};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::workout_session::{
    CreateWorkoutSession, UpdateWorkoutSession, WorkoutSession, WorkoutSessionFilter,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, coach_id, session_type, origin, status, \
                       scheduled_at, completed_at, notes, created_at, updated_at";

/// Provides CRUD and status transitions for workout sessions.
pub struct WorkoutSessionRepo;

impl WorkoutSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateWorkoutSession,
    ) -> Result<WorkoutSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO workout_sessions
                (client_id, coach_id, session_type, origin, status, scheduled_at, completed_at, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(input.client_id)
            .bind(input.coach_id)
            .bind(&input.session_type)
            .bind(&input.origin)
            .bind(&input.status)
            .bind(input.scheduled_at)
            .bind(input.completed_at)
            .bind(&input.notes)
            .fetch_one(executor)
            .await
    }

    /// Find a session by its ID.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workout_sessions WHERE id = $1");
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List sessions matching a filter, most recently scheduled first.
    pub async fn list(
        pool: &PgPool,
        filter: &WorkoutSessionFilter,
    ) -> Result<Vec<WorkoutSession>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM workout_sessions
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY COALESCE(scheduled_at, completed_at, created_at) DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(filter.client_id)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Edit a session that is still scheduled. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the session does not exist or is no longer scheduled.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkoutSession,
    ) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_sessions SET
                session_type = COALESCE($2, session_type),
                scheduled_at = COALESCE($3, scheduled_at),
                notes = COALESCE($4, notes)
             WHERE id = $1 AND status = '{STATUS_SCHEDULED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .bind(&input.session_type)
            .bind(input.scheduled_at)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Move a scheduled session to completed.
    ///
    /// The status guard in the `WHERE` clause makes this a compare-and-set:
    /// of two concurrent completions only one gets a row back.
    pub async fn mark_completed(
        executor: impl PgExecutor<'_>,
        id: DbId,
        completed_at: Timestamp,
    ) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_sessions SET status = '{STATUS_COMPLETED}', completed_at = $2
             WHERE id = $1 AND status = '{STATUS_SCHEDULED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .bind(completed_at)
            .fetch_optional(executor)
            .await
    }

    /// Move a scheduled session to cancelled. Returns `None` if it was not scheduled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<WorkoutSession>, sqlx::Error> {
        let query = format!(
            "UPDATE workout_sessions SET status = '{STATUS_CANCELLED}'
             WHERE id = $1 AND status = '{STATUS_SCHEDULED}'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkoutSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
