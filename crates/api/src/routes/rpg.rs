//! Route definitions for the caller's RPG character.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::rpg;
use crate::state::AppState;

/// Routes mounted at `/rpg`. All require authentication.
///
/// ```text
/// GET  /character        -> get_character (creates on first access)
/// POST /character/init   -> init_character
/// GET  /progress         -> get_progress
/// GET  /streak           -> get_streak
/// POST /streak/record    -> record_streak
/// GET  /xp-log           -> list_xp_log
/// PUT  /avatar           -> update_avatar
/// GET  /unlocks          -> list_unlocks
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/character", get(rpg::get_character))
        .route("/character/init", post(rpg::init_character))
        .route("/progress", get(rpg::get_progress))
        .route("/streak", get(rpg::get_streak))
        .route("/streak/record", post(rpg::record_streak))
        .route("/xp-log", get(rpg::list_xp_log))
        .route("/avatar", put(rpg::update_avatar))
        .route("/unlocks", get(rpg::list_unlocks))
}
