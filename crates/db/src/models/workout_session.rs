//! Workout session entity model and DTOs.

use fitquest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workout_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkoutSession {
    pub id: DbId,
    pub client_id: DbId,
    pub coach_id: Option<DbId>,
    /// Free text fed to the stat classifier (e.g. `"Upper body strength"`).
    pub session_type: Option<String>,
    /// `scheduled` or `self_logged`.
    pub origin: String,
    /// `scheduled`, `completed` or `cancelled`.
    pub status: String,
    pub scheduled_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a session. `origin` and `status` are set by the caller.
#[derive(Debug, Clone)]
pub struct CreateWorkoutSession {
    pub client_id: DbId,
    pub coach_id: Option<DbId>,
    pub session_type: Option<String>,
    pub origin: String,
    pub status: String,
    pub scheduled_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for editing a scheduled session. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutSession {
    pub session_type: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// Filters for listing sessions.
#[derive(Debug, Clone, Default)]
pub struct WorkoutSessionFilter {
    pub client_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
