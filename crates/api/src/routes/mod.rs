pub mod admin;
pub mod auth;
pub mod health;
pub mod rpg;
pub mod sessions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login | /auth/refresh | /auth/logout
///
/// /admin/users                      list, create (admin)
/// /admin/users/{id}                 get (admin)
/// /admin/rpg/{user_id}/xp           manual XP grant (admin)
/// /admin/rpg/{user_id}/stats        manual stat adjustment (admin)
///
/// /rpg/character                    get-or-initialise own character
/// /rpg/character/init               explicit idempotent init
/// /rpg/progress                     level progress, tiers, labels
/// /rpg/streak                       streak status
/// /rpg/streak/record                record a workout now
/// /rpg/xp-log                       paginated ledger
/// /rpg/avatar                       update avatar config
/// /rpg/unlocks                      cosmetic catalog with unlock flags
///
/// /sessions                         list, schedule
/// /sessions/log                     self-log a completed workout
/// /sessions/{id}                    get, update
/// /sessions/{id}/cancel             cancel
/// /sessions/{id}/complete           complete and apply rewards
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/rpg", rpg::router())
        .nest("/sessions", sessions::router())
}
