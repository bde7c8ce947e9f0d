//! Persisted streak tracking with milestone and discipline bonuses.

use chrono::FixedOffset;
use fitquest_core::error::CoreError;
use fitquest_core::rpg::stats::Stat;
use fitquest_core::rpg::streaks::{advance_streak, streak_status as status_of, StreakStatus};
use fitquest_core::rpg::xp::{LevelUp, SOURCE_STREAK_BONUS};
use fitquest_core::types::{DbId, Timestamp};
use fitquest_db::models::character::Character;
use fitquest_db::repositories::CharacterRepo;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use super::ledger::{award_xp_inner, XpGrant};
use super::stats::increment_stat;
use super::EngineResult;

/// What recording a workout did to the streak and which bonuses it paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    /// `false` for a same-day repeat; nothing was written.
    pub streak_updated: bool,
    pub streak_broken: bool,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub bonus_awarded: bool,
    /// Milestone XP paid out, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_xp: Option<i32>,
    pub discipline_gained: bool,
    /// Present when the milestone bonus raised the level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_up: Option<LevelUp>,
}

impl StreakUpdate {
    fn unchanged(character: &Character) -> Self {
        Self {
            streak_updated: false,
            streak_broken: false,
            current_streak: character.current_streak,
            longest_streak: character.longest_streak,
            bonus_awarded: false,
            bonus_xp: None,
            discipline_gained: false,
            level_up: None,
        }
    }
}

/// Record a workout in its own transaction. See [`record_workout_inner`].
pub async fn record_workout(
    pool: &PgPool,
    user_id: DbId,
    now: Timestamp,
    offset: FixedOffset,
) -> EngineResult<StreakUpdate> {
    let mut tx = pool.begin().await?;
    let update = record_workout_inner(&mut tx, user_id, now, offset, None).await?;
    tx.commit().await?;
    Ok(update)
}

/// Advance the user's streak for a workout at `now`.
///
/// Same-day repeats return early without writing. Otherwise the new streak
/// is persisted, a milestone (7/30/90 days) pays its XP bonus tagged
/// `streak_bonus`, and every multiple of 7 days adds discipline. Fails with
/// `Character not found` when the user has no character.
pub async fn record_workout_inner(
    conn: &mut PgConnection,
    user_id: DbId,
    now: Timestamp,
    offset: FixedOffset,
    reference_id: Option<&str>,
) -> EngineResult<StreakUpdate> {
    let character = CharacterRepo::find_by_user_for_update(&mut *conn, user_id)
        .await?
        .ok_or_else(|| CoreError::character_not_found(user_id))?;

    let transition = advance_streak(&character.streak_state(), now, offset);
    if !transition.is_update() {
        tracing::debug!(user_id, "Workout already recorded today, streak unchanged");
        return Ok(StreakUpdate::unchanged(&character));
    }

    CharacterRepo::update_streak(&mut *conn, user_id, &transition.next).await?;

    let current_streak = transition.next.current_streak;
    let mut level_up = None;
    if let Some(bonus) = transition.milestone_bonus {
        let note = format!("{current_streak}-day streak");
        let award = award_xp_inner(
            &mut *conn,
            user_id,
            XpGrant {
                amount: bonus,
                source: SOURCE_STREAK_BONUS,
                reference_id,
                note: Some(&note),
            },
        )
        .await?;
        level_up = award.level_up();
        tracing::info!(user_id, current_streak, bonus, "Streak milestone reached");
    }

    if transition.discipline_gain {
        increment_stat(
            &mut *conn,
            user_id,
            Stat::Discipline,
            Stat::Discipline.default_increment(),
        )
        .await?;
    }

    if transition.is_broken() {
        tracing::info!(
            user_id,
            longest_streak = transition.next.longest_streak,
            "Streak broken, restarting at 1",
        );
    }

    Ok(StreakUpdate {
        streak_updated: true,
        streak_broken: transition.is_broken(),
        current_streak,
        longest_streak: transition.next.longest_streak,
        bonus_awarded: transition.milestone_bonus.is_some(),
        bonus_xp: transition.milestone_bonus,
        discipline_gained: transition.discipline_gain,
        level_up,
    })
}

/// Read-only streak view. A user without a character gets an empty status.
pub async fn streak_status(
    pool: &PgPool,
    user_id: DbId,
    now: Timestamp,
    offset: FixedOffset,
) -> EngineResult<StreakStatus> {
    let status = match CharacterRepo::find_by_user(pool, user_id).await? {
        Some(character) => status_of(&character.streak_state(), now, offset),
        None => StreakStatus::empty(),
    };
    Ok(status)
}
