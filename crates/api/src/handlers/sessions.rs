//! Handlers for workout sessions (`/sessions`).
//!
//! Coaches schedule sessions for clients; clients complete them or log their
//! own. Completion runs the RPG orchestrator in the same transaction as the
//! status change.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use fitquest_core::error::CoreError;
use fitquest_core::scheduling::{self, ORIGIN_SCHEDULED, STATUS_CANCELLED, STATUS_SCHEDULED};
use fitquest_core::types::{DbId, Timestamp};
use fitquest_db::models::workout_session::{
    CreateWorkoutSession, UpdateWorkoutSession, WorkoutSession, WorkoutSessionFilter,
};
use fitquest_db::repositories::{UserRepo, WorkoutSessionRepo};
use serde::Deserialize;
use validator::Validate;

use crate::engine::session::{complete_scheduled_session, log_self_workout};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireCoach};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListSessionsParams {
    pub client_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Body for `POST /sessions`.
#[derive(Debug, Deserialize, Validate)]
pub struct ScheduleSessionRequest {
    pub client_id: DbId,
    #[validate(length(max = 100))]
    pub session_type: Option<String>,
    pub scheduled_at: Timestamp,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Body for `PUT /sessions/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSessionRequest {
    #[validate(length(max = 100))]
    pub session_type: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Body for `POST /sessions/log`.
#[derive(Debug, Deserialize, Validate)]
pub struct LogWorkoutRequest {
    #[validate(length(max = 100))]
    pub session_type: Option<String>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_session(state: &AppState, id: DbId) -> AppResult<WorkoutSession> {
    WorkoutSessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WorkoutSession",
            id,
        }))
}

/// Load a session the caller owns, or any session for staff.
async fn load_accessible(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<WorkoutSession> {
    let session = load_session(state, id).await?;
    user.ensure_can_access(session.client_id)?;
    Ok(session)
}

/// Status-guarded writes return `None` when another request moved the
/// session first.
fn moved_on(id: DbId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Session {id} is no longer {STATUS_SCHEDULED}"
    )))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions
///
/// Clients always see only their own sessions. Staff may filter by client.
pub async fn list_sessions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ListSessionsParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        scheduling::validate_status(status)?;
    }

    let client_id = if user.is_staff() {
        params.client_id
    } else {
        if let Some(requested) = params.client_id {
            user.ensure_can_access(requested)?;
        }
        Some(user.user_id)
    };

    let filter = WorkoutSessionFilter {
        client_id,
        status: params.status,
        limit: params.limit,
        offset: params.offset,
    };
    let sessions = WorkoutSessionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// POST /api/v1/sessions
///
/// Schedule a session for a client.
pub async fn schedule_session(
    RequireCoach(coach): RequireCoach,
    State(state): State<AppState>,
    Json(input): Json<ScheduleSessionRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(label) = input.session_type.as_deref() {
        scheduling::validate_session_type(label)?;
    }
    UserRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.client_id,
        }))?;

    let session = WorkoutSessionRepo::create(
        &state.pool,
        &CreateWorkoutSession {
            client_id: input.client_id,
            coach_id: Some(coach.user_id),
            session_type: input.session_type,
            origin: ORIGIN_SCHEDULED.to_string(),
            status: STATUS_SCHEDULED.to_string(),
            scheduled_at: Some(input.scheduled_at),
            completed_at: None,
            notes: input.notes,
        },
    )
    .await?;

    tracing::info!(
        session_id = session.id,
        client_id = session.client_id,
        coach_id = coach.user_id,
        "Session scheduled",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = load_accessible(&state, &user, id).await?;
    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/sessions/{id}
///
/// Reschedule or relabel a session that is still scheduled.
pub async fn update_session(
    RequireCoach(_coach): RequireCoach,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSessionRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let existing = load_session(&state, id).await?;
    scheduling::validate_editable(&existing.status)?;

    let update = UpdateWorkoutSession {
        session_type: input.session_type,
        scheduled_at: input.scheduled_at,
        notes: input.notes,
    };
    let session = WorkoutSessionRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| moved_on(id))?;
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/sessions/{id}/cancel
pub async fn cancel_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = load_accessible(&state, &user, id).await?;
    scheduling::validate_transition(&existing.status, STATUS_CANCELLED)?;

    let session = WorkoutSessionRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| moved_on(id))?;

    tracing::info!(session_id = id, user_id = user.user_id, "Session cancelled");
    Ok(Json(DataResponse { data: session }))
}

/// POST /api/v1/sessions/{id}/complete
///
/// Marks the session completed and applies its XP, stat and streak rewards.
/// A session that is not scheduled yields 409, so it never pays out twice.
///
/// The status change and the rewards share one transaction. A failing
/// reward step rolls both back and surfaces as an HTTP error; the
/// `rewards` body therefore always reports `success: true`, unlike
/// [`crate::engine::session::on_session_complete`], which folds failures
/// into `success: false`.
pub async fn complete_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_accessible(&state, &user, id).await?;

    let completed =
        complete_scheduled_session(&state.pool, id, Utc::now(), state.streak_offset()).await?;

    tracing::info!(
        session_id = id,
        client_id = completed.session.client_id,
        xp_awarded = completed.rewards.xp_awarded,
        "Session completed",
    );
    Ok(Json(DataResponse { data: completed }))
}

/// POST /api/v1/sessions/log
///
/// Record a workout the client did on their own.
///
/// Like `complete_session`, a failing reward step discards the new session
/// row and returns an HTTP error rather than `success: false`.
pub async fn log_workout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<LogWorkoutRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let logged = log_self_workout(
        &state.pool,
        user.user_id,
        input.session_type,
        input.notes,
        Utc::now(),
        state.streak_offset(),
    )
    .await?;

    tracing::info!(
        session_id = logged.session.id,
        client_id = user.user_id,
        xp_awarded = logged.rewards.xp_awarded,
        "Workout self-logged",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: logged })))
}
