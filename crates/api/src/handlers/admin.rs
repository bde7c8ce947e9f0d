//! Handlers for the `/admin` resource: user management and manual RPG grants.
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fitquest_core::error::CoreError;
use fitquest_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use fitquest_core::roles::{ROLE_CLIENT, VALID_ROLES};
use fitquest_core::rpg::stats::Stat;
use fitquest_core::rpg::xp::SOURCE_MANUAL;
use fitquest_core::types::DbId;
use fitquest_db::models::user::{CreateUser, UserResponse};
use fitquest_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::engine::ledger::{self, XpGrant};
use crate::engine::stats;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Query for `GET /admin/users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    pub role: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /admin/rpg/{user_id}/xp`.
#[derive(Debug, Deserialize, Validate)]
pub struct AwardXpRequest {
    #[validate(range(min = 1, max = 100_000))]
    pub amount: i32,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

/// Request body for `POST /admin/rpg/{user_id}/stats`.
#[derive(Debug, Deserialize, Validate)]
pub struct IncrementStatRequest {
    pub stat: String,
    #[validate(range(min = -100, max = 100))]
    pub amount: i32,
}

#[derive(Debug, Serialize)]
pub struct StatValue {
    pub stat: Stat,
    pub value: i32,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a user. Clients get their character in the same transaction.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if !VALID_ROLES.contains(&input.role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid role '{}'. Must be one of: {VALID_ROLES:?}",
            input.role
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut tx = state.pool.begin().await?;
    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role: input.role,
        },
    )
    .await?;
    if user.role == ROLE_CLIENT {
        ledger::initialize_character_inner(&mut tx, user.id).await?;
    }
    tx.commit().await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = user.id,
        role = %user.role,
        "User created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListUsersParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let users = UserRepo::list(&state.pool, params.role.as_deref(), limit, offset).await?;
    let data: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

// ---------------------------------------------------------------------------
// Manual RPG grants
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/rpg/{user_id}/xp
///
/// Grant XP outside the session flow. 404 when the user has no character.
pub async fn award_xp(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
    Json(input): Json<AwardXpRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let reference = format!("admin:{}", admin.user_id);
    let award = ledger::award_xp(
        &state.pool,
        user_id,
        XpGrant {
            amount: input.amount,
            source: SOURCE_MANUAL,
            reference_id: Some(&reference),
            note: input.note.as_deref(),
        },
    )
    .await?;
    Ok(Json(DataResponse { data: award }))
}

/// POST /api/v1/admin/rpg/{user_id}/stats
///
/// Adjust one stat; the result is clamped to `[0, 100]`.
pub async fn increment_stat(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<DbId>,
    Json(input): Json<IncrementStatRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let stat: Stat = input.stat.parse()?;
    let value = stats::increment_stat(&state.pool, user_id, stat, input.amount).await?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id,
        %stat,
        amount = input.amount,
        value,
        "Stat adjusted by admin",
    );

    Ok(Json(DataResponse {
        data: StatValue { stat, value },
    }))
}
