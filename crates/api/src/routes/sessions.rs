//! Route definitions for workout sessions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sessions;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET  /                 -> list_sessions
/// POST /                 -> schedule_session (coach)
/// POST /log              -> log_workout
/// GET  /{id}             -> get_session
/// PUT  /{id}             -> update_session (coach)
/// POST /{id}/cancel      -> cancel_session
/// POST /{id}/complete    -> complete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sessions::list_sessions).post(sessions::schedule_session),
        )
        .route("/log", post(sessions::log_workout))
        .route(
            "/{id}",
            get(sessions::get_session).put(sessions::update_session),
        )
        .route("/{id}/cancel", post(sessions::cancel_session))
        .route("/{id}/complete", post(sessions::complete_session))
}
