//! Integration tests for `CharacterRepo` and `XpLogRepo`.

mod common;

use chrono::{TimeZone, Utc};
use fitquest_core::rpg::stats::Stat;
use fitquest_core::rpg::streaks::StreakState;
use fitquest_db::models::xp_log::CreateXpLogEntry;
use fitquest_db::repositories::{CharacterRepo, XpLogRepo};
use sqlx::PgPool;

use common::seed_user;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_if_missing_is_idempotent(pool: PgPool) {
    let user_id = seed_user(&pool, "athena", "client").await;

    let created = CharacterRepo::create_if_missing(&pool, user_id)
        .await
        .unwrap()
        .expect("first insert creates the row");
    assert_eq!(created.level, 1);
    assert_eq!(created.xp, 0);
    assert_eq!(created.strength, 0);
    assert_eq!(created.current_streak, 0);
    assert!(created.last_workout_date.is_none());
    assert_eq!(created.avatar_config["outfit"], "training_tee");

    CharacterRepo::set_xp(&pool, user_id, 250, 3).await.unwrap();

    let second = CharacterRepo::create_if_missing(&pool, user_id).await.unwrap();
    assert!(second.is_none(), "existing row must not be re-created");

    let row = CharacterRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(row.xp, 250, "existing row must not be overwritten");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn increment_stat_clamps_both_ends(pool: PgPool) {
    let user_id = seed_user(&pool, "hercules", "client").await;
    CharacterRepo::create_if_missing(&pool, user_id).await.unwrap();

    sqlx::query("UPDATE characters SET strength = 98 WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let value = CharacterRepo::increment_stat(&pool, user_id, Stat::Strength, 5)
        .await
        .unwrap();
    assert_eq!(value, Some(100));

    let value = CharacterRepo::increment_stat(&pool, user_id, Stat::Endurance, -3)
        .await
        .unwrap();
    assert_eq!(value, Some(0));

    let value = CharacterRepo::increment_stat(&pool, user_id, Stat::Discipline, i32::MAX)
        .await
        .unwrap();
    assert_eq!(value, Some(100));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn increment_stat_without_character_returns_none(pool: PgPool) {
    let user_id = seed_user(&pool, "nobody", "client").await;
    let value = CharacterRepo::increment_stat(&pool, user_id, Stat::Strength, 1)
        .await
        .unwrap();
    assert_eq!(value, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_streak_persists_all_fields(pool: PgPool) {
    let user_id = seed_user(&pool, "runner", "client").await;
    CharacterRepo::create_if_missing(&pool, user_id).await.unwrap();

    let when = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();
    let row = CharacterRepo::update_streak(
        &pool,
        user_id,
        &StreakState {
            current_streak: 4,
            longest_streak: 9,
            last_workout_date: Some(when),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(row.current_streak, 4);
    assert_eq!(row.longest_streak, 9);
    assert_eq!(row.last_workout_date, Some(when));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_constraints_guard_invariants(pool: PgPool) {
    let user_id = seed_user(&pool, "cheater", "client").await;
    CharacterRepo::create_if_missing(&pool, user_id).await.unwrap();

    let too_high = CharacterRepo::set_xp(&pool, user_id, 999_999, 51).await;
    assert!(too_high.is_err(), "level above 50 must be rejected");

    let bad_streak = CharacterRepo::update_streak(
        &pool,
        user_id,
        &StreakState {
            current_streak: 5,
            longest_streak: 2,
            last_workout_date: None,
        },
    )
    .await;
    assert!(bad_streak.is_err(), "longest below current must be rejected");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn row_lock_reads_inside_transaction(pool: PgPool) {
    let user_id = seed_user(&pool, "locker", "client").await;
    CharacterRepo::create_if_missing(&pool, user_id).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let locked = CharacterRepo::find_by_user_for_update(&mut *tx, user_id)
        .await
        .unwrap();
    assert!(locked.is_some());
    CharacterRepo::set_xp(&mut *tx, user_id, 100, 2).await.unwrap();
    tx.rollback().await.unwrap();

    let row = CharacterRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(row.xp, 0, "rolled-back write must not be visible");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xp_log_lists_newest_first_and_totals(pool: PgPool) {
    let user_id = seed_user(&pool, "ledger", "client").await;

    for (amount, source) in [(100, "session_complete"), (150, "streak_bonus"), (75, "self_logged_workout")] {
        XpLogRepo::create(
            &pool,
            &CreateXpLogEntry {
                user_id,
                amount,
                source: source.to_string(),
                reference_id: Some("session:1".to_string()),
                note: None,
            },
        )
        .await
        .unwrap();
    }

    let entries = XpLogRepo::list_by_user(&pool, user_id, 2, 0).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].source, "self_logged_workout");
    assert_eq!(entries[1].source, "streak_bonus");

    let by_reference = XpLogRepo::list_by_reference(&pool, "session:1").await.unwrap();
    assert_eq!(by_reference.len(), 3);
    assert_eq!(by_reference[0].amount, 100);

    assert_eq!(XpLogRepo::total_for_user(&pool, user_id).await.unwrap(), 325);
}
