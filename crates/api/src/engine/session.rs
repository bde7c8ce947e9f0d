//! Session-completion orchestrator.
//!
//! Completing a workout initialises the character if needed, awards the
//! base XP, trains the stats the session type targets, and advances the
//! streak. All of it commits in one transaction or not at all.

use chrono::FixedOffset;
use fitquest_core::error::CoreError;
use fitquest_core::rpg::stats::{classify_session_stats, Stat};
use fitquest_core::rpg::xp::{
    LevelUp, SOURCE_SELF_LOGGED, SOURCE_SESSION_COMPLETE, XP_SCHEDULED_SESSION,
    XP_SELF_LOGGED_SESSION,
};
use fitquest_core::scheduling::{
    self, ORIGIN_SCHEDULED, ORIGIN_SELF_LOGGED, STATUS_COMPLETED, STATUS_SCHEDULED,
};
use fitquest_core::types::{DbId, Timestamp};
use fitquest_db::models::workout_session::{CreateWorkoutSession, WorkoutSession};
use fitquest_db::repositories::WorkoutSessionRepo;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use super::ledger::{award_xp_inner, initialize_character_inner, XpGrant};
use super::stats::increment_stat;
use super::streaks::{record_workout_inner, StreakUpdate};
use super::EngineResult;

/// How the completed session came to exist. Selects the base XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Scheduled by a coach: 100 XP.
    Scheduled,
    /// Logged by the client: 75 XP.
    SelfLogged,
}

impl SessionOrigin {
    pub fn base_xp(self) -> i32 {
        match self {
            SessionOrigin::Scheduled => XP_SCHEDULED_SESSION,
            SessionOrigin::SelfLogged => XP_SELF_LOGGED_SESSION,
        }
    }

    pub fn xp_source(self) -> &'static str {
        match self {
            SessionOrigin::Scheduled => SOURCE_SESSION_COMPLETE,
            SessionOrigin::SelfLogged => SOURCE_SELF_LOGGED,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionOrigin::Scheduled => ORIGIN_SCHEDULED,
            SessionOrigin::SelfLogged => ORIGIN_SELF_LOGGED,
        }
    }
}

/// Everything the orchestrator needs to know about a finished workout.
#[derive(Debug, Clone, Copy)]
pub struct SessionCompletion<'a> {
    pub session_id: DbId,
    pub client_id: DbId,
    pub session_type: Option<&'a str>,
    pub origin: SessionOrigin,
    pub completed_at: Timestamp,
}

/// New stat values after the session's increments. `None` means untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsUpdated {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endurance: Option<i32>,
}

/// Aggregated outcome of a session completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCompletionResult {
    pub success: bool,
    pub xp_awarded: i32,
    /// Present only when the base XP award raised the level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_up: Option<LevelUp>,
    pub stats_updated: StatsUpdated,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_update: Option<StreakUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionCompletionResult {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            xp_awarded: 0,
            level_up: None,
            stats_updated: StatsUpdated::default(),
            streak_update: None,
            error: Some(message),
        }
    }
}

/// Correlation id written to the XP ledger for a session.
pub fn session_reference(session_id: DbId) -> String {
    format!("session:{session_id}")
}

/// Apply the RPG rewards for a completed session.
///
/// Never returns an error: any failure rolls the whole completion back and
/// is reported as `success: false` with a message.
pub async fn on_session_complete(
    pool: &PgPool,
    completion: &SessionCompletion<'_>,
    offset: FixedOffset,
) -> SessionCompletionResult {
    let outcome = async {
        let mut tx = pool.begin().await?;
        let result = apply_session_rewards(&mut tx, completion, offset).await?;
        tx.commit().await?;
        Ok::<_, super::EngineError>(result)
    }
    .await;

    match outcome {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(
                session_id = completion.session_id,
                client_id = completion.client_id,
                error = %e,
                "Session completion rolled back",
            );
            SessionCompletionResult::failed(e.to_string())
        }
    }
}

/// The orchestrator body, run on a caller-owned transaction.
pub async fn apply_session_rewards(
    conn: &mut PgConnection,
    completion: &SessionCompletion<'_>,
    offset: FixedOffset,
) -> EngineResult<SessionCompletionResult> {
    let client_id = completion.client_id;
    let reference = session_reference(completion.session_id);

    // 1. Character.
    initialize_character_inner(&mut *conn, client_id).await?;

    // 2. Base XP.
    let xp_awarded = completion.origin.base_xp();
    let award = award_xp_inner(
        &mut *conn,
        client_id,
        XpGrant {
            amount: xp_awarded,
            source: completion.origin.xp_source(),
            reference_id: Some(&reference),
            note: completion.session_type,
        },
    )
    .await?;

    // 3. Stats.
    let gains = classify_session_stats(completion.session_type);
    let mut stats_updated = StatsUpdated::default();
    if let Some(amount) = gains.strength {
        stats_updated.strength =
            Some(increment_stat(&mut *conn, client_id, Stat::Strength, amount).await?);
    }
    if let Some(amount) = gains.endurance {
        stats_updated.endurance =
            Some(increment_stat(&mut *conn, client_id, Stat::Endurance, amount).await?);
    }

    // 4. Streak.
    let streak_update = record_workout_inner(
        &mut *conn,
        client_id,
        completion.completed_at,
        offset,
        Some(&reference),
    )
    .await?;

    tracing::info!(
        session_id = completion.session_id,
        client_id,
        origin = completion.origin.as_str(),
        xp_awarded,
        current_streak = streak_update.current_streak,
        "Session rewards applied",
    );

    Ok(SessionCompletionResult {
        success: true,
        xp_awarded,
        level_up: award.level_up(),
        stats_updated,
        streak_update: Some(streak_update),
        error: None,
    })
}

// ---------------------------------------------------------------------------
// Workout-session flows
// ---------------------------------------------------------------------------

/// A workout session together with the rewards its completion produced.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedSession {
    pub session: WorkoutSession,
    pub rewards: SessionCompletionResult,
}

/// Complete a scheduled session and apply its rewards atomically.
///
/// Fails with `Conflict` when the session is not in the scheduled state,
/// so a session can only ever pay out once.
pub async fn complete_scheduled_session(
    pool: &PgPool,
    session_id: DbId,
    now: Timestamp,
    offset: FixedOffset,
) -> EngineResult<CompletedSession> {
    let mut tx = pool.begin().await?;

    let existing = WorkoutSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkoutSession",
            id: session_id,
        })?;
    scheduling::validate_transition(&existing.status, STATUS_COMPLETED)?;

    let session = WorkoutSessionRepo::mark_completed(&mut *tx, session_id, now)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(format!("Session {session_id} is no longer {STATUS_SCHEDULED}"))
        })?;

    let rewards = apply_session_rewards(
        &mut tx,
        &SessionCompletion {
            session_id,
            client_id: session.client_id,
            session_type: session.session_type.as_deref(),
            origin: SessionOrigin::Scheduled,
            completed_at: now,
        },
        offset,
    )
    .await?;

    tx.commit().await?;
    Ok(CompletedSession { session, rewards })
}

/// Create an already-completed, self-logged session and apply its rewards.
///
/// Not idempotent: logging the same workout twice pays out twice.
pub async fn log_self_workout(
    pool: &PgPool,
    client_id: DbId,
    session_type: Option<String>,
    notes: Option<String>,
    now: Timestamp,
    offset: FixedOffset,
) -> EngineResult<CompletedSession> {
    let mut tx = pool.begin().await?;

    let session = WorkoutSessionRepo::create(
        &mut *tx,
        &CreateWorkoutSession {
            client_id,
            coach_id: None,
            session_type,
            origin: ORIGIN_SELF_LOGGED.to_string(),
            status: STATUS_COMPLETED.to_string(),
            scheduled_at: None,
            completed_at: Some(now),
            notes,
        },
    )
    .await?;

    let rewards = apply_session_rewards(
        &mut tx,
        &SessionCompletion {
            session_id: session.id,
            client_id,
            session_type: session.session_type.as_deref(),
            origin: SessionOrigin::SelfLogged,
            completed_at: now,
        },
        offset,
    )
    .await?;

    tx.commit().await?;
    Ok(CompletedSession { session, rewards })
}
