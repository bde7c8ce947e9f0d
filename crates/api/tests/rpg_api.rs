//! HTTP-level tests for the `/rpg` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, put_json_auth, user_with_token};
use fitquest_core::roles::ROLE_CLIENT;
use fitquest_db::repositories::CharacterRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn character_is_created_on_first_read(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    let app = common::build_test_app(pool.clone());

    let response = get_auth(app, "/api/v1/rpg/character", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["user_id"], user.id);
    assert_eq!(data["level"], 1);
    assert_eq!(data["xp"], 0);
    assert_eq!(data["avatar_config"]["outfit"], "training_tee");
    assert_eq!(data["progress"]["required"], 100);
    assert!(data["tiers"]["muscle_tier"].is_string());

    assert!(CharacterRepo::find_by_user(&pool, user.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn init_character_is_idempotent(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    let first = body_json(
        post_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character/init", &token).await,
    )
    .await;
    let second = body_json(
        post_auth(common::build_test_app(pool), "/api/v1/rpg/character/init", &token).await,
    )
    .await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_without_character_is_404(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/rpg/progress", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Character not found");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_reports_level_and_labels(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &token).await;
    CharacterRepo::set_xp(&pool, user.id, 150, 2).await.unwrap();

    let response = get_auth(common::build_test_app(pool), "/api/v1/rpg/progress", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["level"]["level"], 2);
    assert_eq!(data["level"]["current"], 50);
    assert_eq!(data["level"]["percentage"], 50);
    assert_eq!(data["max_level"], 50);
    assert_eq!(data["total_xp"], 150);
    assert!(data["stat_labels"]["discipline"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn streak_record_and_status(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    let empty = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/streak", &token).await,
    )
    .await;
    assert_eq!(empty["data"]["current_streak"], 0);

    let missing = post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/rpg/streak/record",
        &token,
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &token).await;
    let recorded = body_json(
        post_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/rpg/streak/record",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(recorded["data"]["streak_updated"], true);
    assert_eq!(recorded["data"]["current_streak"], 1);

    let status = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/rpg/streak", &token).await,
    )
    .await;
    assert_eq!(status["data"]["current_streak"], 1);
    assert_eq!(status["data"]["days_until_break"], 2);
    assert_eq!(status["data"]["is_at_risk"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xp_log_lists_own_entries(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    let (_other, other_token) = user_with_token(&pool, "bo", ROLE_CLIENT).await;

    common::post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/sessions/log",
        &token,
        json!({ "session_type": "cardio" }),
    )
    .await;

    let mine = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/xp-log", &token).await,
    )
    .await;
    let entries = mine["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["amount"], 75);
    assert_eq!(entries[0]["source"], "self_logged_workout");

    let theirs = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/rpg/xp-log", &other_token).await,
    )
    .await;
    assert!(theirs["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn avatar_items_are_level_gated(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &token).await;

    let locked = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/rpg/avatar",
        &token,
        json!({ "outfit": "bronze_armor" }),
    )
    .await;
    assert_eq!(locked.status(), StatusCode::BAD_REQUEST);

    CharacterRepo::set_xp(&pool, user.id, 450, 5).await.unwrap();
    let equipped = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/rpg/avatar",
        &token,
        json!({ "outfit": "bronze_armor" }),
    )
    .await;
    assert_eq!(equipped.status(), StatusCode::OK);

    let json = body_json(equipped).await;
    assert_eq!(json["data"]["avatar_config"]["outfit"], "bronze_armor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn avatar_item_in_wrong_slot_is_rejected(pool: PgPool) {
    let (_user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;
    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &token).await;

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/rpg/avatar",
        &token,
        json!({ "aura": "training_tee" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unlocks_follow_character_level(pool: PgPool) {
    let (user, token) = user_with_token(&pool, "ada", ROLE_CLIENT).await;

    let fresh = body_json(
        get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/unlocks", &token).await,
    )
    .await;
    let unlocked = |json: &serde_json::Value| {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|item| item["unlocked"] == true)
            .count()
    };
    assert_eq!(unlocked(&fresh), 1);

    get_auth(common::build_test_app(pool.clone()), "/api/v1/rpg/character", &token).await;
    CharacterRepo::set_xp(&pool, user.id, 1_400, 10).await.unwrap();

    let later = body_json(
        get_auth(common::build_test_app(pool), "/api/v1/rpg/unlocks", &token).await,
    )
    .await;
    assert_eq!(unlocked(&later), 3);
}
