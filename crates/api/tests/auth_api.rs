//! HTTP-level tests for the auth and admin endpoints.
//!
//! Covers login, refresh rotation, logout, account lockout, RBAC, admin user
//! management and the manual XP and stat grants.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, user_with_token, TEST_PASSWORD};
use fitquest_core::roles::{ROLE_ADMIN, ROLE_CLIENT, ROLE_COACH};
use fitquest_db::repositories::{CharacterRepo, SessionRepo, XpLogRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn login(pool: &PgPool, username: &str, password: &str) -> axum::response::Response {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "username": username, "password": password }),
    )
    .await
}

async fn refresh(pool: &PgPool, refresh_token: &str) -> axum::response::Response {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Login / refresh / logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens(pool: PgPool) {
    let user = common::create_user(&pool, "ada", ROLE_CLIENT).await;

    let response = login(&pool, "ada", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "client");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_401(pool: PgPool) {
    common::create_user(&pool, "ada", ROLE_CLIENT).await;

    let response = login(&pool, "ada", "not-the-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = login(&pool, "nobody", TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_locks_after_repeated_failures(pool: PgPool) {
    common::create_user(&pool, "ada", ROLE_CLIENT).await;

    for _ in 0..5 {
        let response = login(&pool, "ada", "not-the-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = login(&pool, "ada", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    common::create_user(&pool, "ada", ROLE_CLIENT).await;
    let tokens = body_json(login(&pool, "ada", TEST_PASSWORD).await).await;
    let original = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = refresh(&pool, &original).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"], original.as_str());

    let reused = refresh(&pool, &original).await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_refreshes_spend_the_token_once(pool: PgPool) {
    let user = common::create_user(&pool, "ada", ROLE_CLIENT).await;
    let tokens = body_json(login(&pool, "ada", TEST_PASSWORD).await).await;
    let token = tokens["refresh_token"].as_str().unwrap().to_string();

    let (first, second) = tokio::join!(refresh(&pool, &token), refresh(&pool, &token));
    let mut statuses = [first.status(), second.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::UNAUTHORIZED]);

    let live = SessionRepo::count_live_for_user(&pool, user.id).await.unwrap();
    assert_eq!(live, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    common::create_user(&pool, "ada", ROLE_CLIENT).await;
    let tokens = body_json(login(&pool, "ada", TEST_PASSWORD).await).await;
    let access = tokens["access_token"].as_str().unwrap();
    let refresh_token = tokens["refresh_token"].as_str().unwrap();

    let response = common::post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let after = refresh(&pool, refresh_token).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_401(pool: PgPool) {
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/rpg/character",
        "not.a.jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin: users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_client_with_character(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &token,
        json!({
            "username": "newbie",
            "email": "newbie@fitquest.test",
            "password": "squat-rack-9",
            "role": "client",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let character = CharacterRepo::find_by_user(&pool, id).await.unwrap();
    assert!(character.is_some_and(|c| c.level == 1 && c.xp == 0));

    let signed_in = login(&pool, "newbie", "squat-rack-9").await;
    assert_eq!(signed_in.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_coach_without_character(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users",
        &token,
        json!({
            "username": "coachy",
            "email": "coachy@fitquest.test",
            "password": "squat-rack-9",
            "role": "coach",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    assert!(CharacterRepo::find_by_user(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_is_409(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;
    common::create_user(&pool, "taken", ROLE_CLIENT).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/users",
        &token,
        json!({
            "username": "taken",
            "email": "other@fitquest.test",
            "password": "squat-rack-9",
            "role": "client",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_user_input_is_400(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;

    let cases = [
        json!({ "username": "ok-name", "email": "a@b.test", "password": "short", "role": "client" }),
        json!({ "username": "ok-name", "email": "a@b.test", "password": "squat-rack-9", "role": "wizard" }),
        json!({ "username": "x", "email": "a@b.test", "password": "squat-rack-9", "role": "client" }),
        json!({ "username": "ok-name", "email": "not-an-email", "password": "squat-rack-9", "role": "client" }),
    ];
    for body in cases {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/users",
            &token,
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_admins_cannot_manage_users(pool: PgPool) {
    let (_coach, coach_token) = user_with_token(&pool, "coach", ROLE_COACH).await;
    let (_client, client_token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    for token in [&coach_token, &client_token] {
        let response = get_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/admin/users",
            token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_lists_users_by_role(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;
    common::create_user(&pool, "ada", ROLE_CLIENT).await;
    common::create_user(&pool, "coach", ROLE_COACH).await;

    let json = body_json(
        get_auth(
            common::build_test_app(pool),
            "/api/v1/admin/users?role=client",
            &token,
        )
        .await,
    )
    .await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "ada");
}

// ---------------------------------------------------------------------------
// Admin: manual RPG grants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_awards_xp(pool: PgPool) {
    let (admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;
    let (client, client_token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &client_token).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/admin/rpg/{}/xp", client.id),
        &token,
        json!({ "amount": 500, "note": "Challenge winner" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["new_xp"], 500);
    assert_eq!(data["new_level"], 6);
    assert_eq!(data["did_level_up"], true);
    assert_eq!(data["unlocks"][0], "Level 5: Bronze armor outfit");

    let entries = XpLogRepo::list_by_reference(&pool, &format!("admin:{}", admin.id))
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, "manual_award");
    assert_eq!(entries[0].note.as_deref(), Some("Challenge winner"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn awarding_xp_without_character_is_404(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;
    let (client, _) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/admin/rpg/{}/xp", client.id),
        &token,
        json!({ "amount": 50 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Character not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_adjusts_stats(pool: PgPool) {
    let (_admin, token) = user_with_token(&pool, "root", ROLE_ADMIN).await;
    let (client, client_token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &client_token).await;
    let uri = format!("/api/v1/admin/rpg/{}/stats", client.id);

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &token,
        json!({ "stat": "discipline", "amount": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["stat"], "discipline");
    assert_eq!(data["value"], 5);

    let floored = body_json(
        post_json_auth(
            common::build_test_app(pool.clone()),
            &uri,
            &token,
            json!({ "stat": "discipline", "amount": -20 }),
        )
        .await,
    )
    .await;
    assert_eq!(floored["data"]["value"], 0);

    let unknown = post_json_auth(
        common::build_test_app(pool),
        &uri,
        &token,
        json!({ "stat": "charisma", "amount": 1 }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}
