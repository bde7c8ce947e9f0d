//! Handlers for the caller's own RPG character (`/rpg`).
//!
//! All endpoints require authentication via [`RequireAuth`] and operate on
//! the authenticated user's character.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use fitquest_core::error::CoreError;
use fitquest_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use fitquest_core::rpg::avatar::{unlock_statuses, validate_avatar_config, AvatarConfig};
use fitquest_core::rpg::levels::{level_progress, LevelProgress, MAX_LEVEL};
use fitquest_core::rpg::stats::{stat_label_for_value, stat_tiers, StatTiers};
use fitquest_core::types::DbId;
use fitquest_db::models::character::Character;
use fitquest_db::repositories::{CharacterRepo, XpLogRepo};
use serde::Serialize;

use crate::engine::{ledger, streaks};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A character row with its derived progress and tiers.
#[derive(Debug, Serialize)]
pub struct CharacterView {
    #[serde(flatten)]
    pub character: Character,
    pub progress: LevelProgress,
    pub tiers: StatTiers,
}

impl From<Character> for CharacterView {
    fn from(character: Character) -> Self {
        Self {
            progress: level_progress(character.xp),
            tiers: stat_tiers(character.strength, character.endurance, character.discipline),
            character,
        }
    }
}

/// Progress screen payload.
#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub level: LevelProgress,
    pub max_level: i32,
    pub tiers: StatTiers,
    pub stat_labels: StatLabels,
    pub total_xp: i32,
}

#[derive(Debug, Serialize)]
pub struct StatLabels {
    pub strength: &'static str,
    pub endurance: &'static str,
    pub discipline: &'static str,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_character(state: &AppState, user_id: DbId) -> AppResult<Character> {
    CharacterRepo::find_by_user(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::character_not_found(user_id)))
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// GET /api/v1/rpg/character
///
/// Return the caller's character, creating it on first access.
pub async fn get_character(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let character = ledger::initialize_character(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: CharacterView::from(character),
    }))
}

/// POST /api/v1/rpg/character/init
///
/// Idempotent: an existing character is returned untouched.
pub async fn init_character(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let character = ledger::initialize_character(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: CharacterView::from(character),
    }))
}

/// GET /api/v1/rpg/progress
pub async fn get_progress(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let c = load_character(&state, user.user_id).await?;

    let view = ProgressView {
        level: level_progress(c.xp),
        max_level: MAX_LEVEL,
        tiers: stat_tiers(c.strength, c.endurance, c.discipline),
        stat_labels: StatLabels {
            strength: stat_label_for_value(c.strength),
            endurance: stat_label_for_value(c.endurance),
            discipline: stat_label_for_value(c.discipline),
        },
        total_xp: c.xp,
    };

    Ok(Json(DataResponse { data: view }))
}

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// GET /api/v1/rpg/streak
///
/// Read-only. A user without a character gets an empty status, not a 404.
pub async fn get_streak(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let status =
        streaks::streak_status(&state.pool, user.user_id, Utc::now(), state.streak_offset())
            .await?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /api/v1/rpg/streak/record
///
/// Record a workout at the current time without creating a session.
pub async fn record_streak(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let update =
        streaks::record_workout(&state.pool, user.user_id, Utc::now(), state.streak_offset())
            .await?;
    Ok(Json(DataResponse { data: update }))
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// GET /api/v1/rpg/xp-log
///
/// The caller's ledger, newest first.
pub async fn list_xp_log(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);
    let entries = XpLogRepo::list_by_user(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Avatar
// ---------------------------------------------------------------------------

/// PUT /api/v1/rpg/avatar
///
/// Replace the equipped cosmetics. Every item must exist, sit in its own
/// slot, and be unlocked at the character's current level.
pub async fn update_avatar(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(config): Json<AvatarConfig>,
) -> AppResult<impl IntoResponse> {
    let character = load_character(&state, user.user_id).await?;
    validate_avatar_config(&config, character.level)?;

    let value = serde_json::to_value(&config)
        .map_err(|e| AppError::InternalError(format!("Avatar serialization error: {e}")))?;
    let updated = CharacterRepo::update_avatar_config(&state.pool, user.user_id, &value)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::character_not_found(user.user_id)))?;

    tracing::info!(user_id = user.user_id, "Avatar updated");

    Ok(Json(DataResponse {
        data: CharacterView::from(updated),
    }))
}

/// GET /api/v1/rpg/unlocks
///
/// The cosmetic catalog flagged against the caller's level. Users without a
/// character see the level-1 view.
pub async fn list_unlocks(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let level = CharacterRepo::find_by_user(&state.pool, user.user_id)
        .await?
        .map_or(1, |c| c.level);
    Ok(Json(DataResponse {
        data: unlock_statuses(level),
    }))
}
