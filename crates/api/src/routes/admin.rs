//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// GET    /users                   -> list_users
/// POST   /users                   -> create_user
/// GET    /users/{id}              -> get_user
/// POST   /rpg/{user_id}/xp        -> award_xp
/// POST   /rpg/{user_id}/stats     -> increment_stat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users).post(admin::create_user))
        .route("/users/{id}", get(admin::get_user))
        .route("/rpg/{user_id}/xp", post(admin::award_xp))
        .route("/rpg/{user_id}/stats", post(admin::increment_stat))
}
