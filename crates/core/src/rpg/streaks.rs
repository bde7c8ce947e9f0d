//! Day-granularity workout streaks.
//!
//! [`advance_streak`] is the whole state machine: given the persisted
//! streak fields and "now", it decides whether the streak starts, continues,
//! breaks, or is left alone for a same-day repeat. Milestone XP and
//! discipline bonuses are reported alongside so the caller can apply them
//! in the same transaction.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;

use crate::types::Timestamp;

/// Streak lengths that pay a one-time XP bonus, with the amount.
pub const STREAK_MILESTONES: &[(i32, i32)] = &[(7, 150), (30, 500), (90, 1500)];

/// Every multiple of this many days grants a discipline bonus.
pub const DISCIPLINE_STREAK_INTERVAL: i32 = 7;

/// The streak fields of a character row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_workout_date: Option<Timestamp>,
}

/// What a workout did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// No previous workout on record.
    Started,
    /// Already worked out on this calendar day; nothing changes.
    SameDay,
    /// Worked out on the previous calendar day.
    Continued,
    /// Gap of two or more calendar days; streak restarts at 1.
    Broken,
}

/// Result of [`advance_streak`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakTransition {
    pub change: StreakChange,
    /// State to persist. Equal to the input for [`StreakChange::SameDay`].
    pub next: StreakState,
    /// XP to award when the new streak lands exactly on a milestone.
    pub milestone_bonus: Option<i32>,
    /// Whether the new streak length earns a discipline bonus.
    pub discipline_gain: bool,
}

impl StreakTransition {
    /// `false` only for same-day repeats, which must not be written.
    pub fn is_update(&self) -> bool {
        self.change != StreakChange::SameDay
    }

    pub fn is_broken(&self) -> bool {
        self.change == StreakChange::Broken
    }
}

/// Calendar date of `ts` in the configured day-boundary offset.
pub fn calendar_day(ts: Timestamp, offset: FixedOffset) -> NaiveDate {
    ts.with_timezone(&offset).date_naive()
}

/// Whole calendar days from `earlier` to `later`. Time of day is ignored.
pub fn days_between(earlier: Timestamp, later: Timestamp, offset: FixedOffset) -> i64 {
    (calendar_day(later, offset) - calendar_day(earlier, offset)).num_days()
}

/// XP bonus for reaching exactly `streak` days, if it is a milestone.
pub fn milestone_bonus(streak: i32) -> Option<i32> {
    STREAK_MILESTONES
        .iter()
        .find(|(days, _)| *days == streak)
        .map(|(_, xp)| *xp)
}

/// Positive multiples of [`DISCIPLINE_STREAK_INTERVAL`] earn discipline.
pub fn earns_discipline(streak: i32) -> bool {
    streak > 0 && streak % DISCIPLINE_STREAK_INTERVAL == 0
}

/// Apply a workout at `now` to the streak.
///
/// A `now` earlier than the last workout's calendar day is treated like a
/// same-day repeat, so clock skew can never shorten a streak.
pub fn advance_streak(state: &StreakState, now: Timestamp, offset: FixedOffset) -> StreakTransition {
    let (change, current_streak) = match state.last_workout_date {
        None => (StreakChange::Started, 1),
        Some(last) => match days_between(last, now, offset) {
            i64::MIN..=0 => (StreakChange::SameDay, state.current_streak),
            1 => (StreakChange::Continued, state.current_streak + 1),
            _ => (StreakChange::Broken, 1),
        },
    };

    if change == StreakChange::SameDay {
        return StreakTransition {
            change,
            next: *state,
            milestone_bonus: None,
            discipline_gain: false,
        };
    }

    StreakTransition {
        change,
        next: StreakState {
            current_streak,
            longest_streak: state.longest_streak.max(current_streak),
            last_workout_date: Some(now),
        },
        milestone_bonus: milestone_bonus(current_streak),
        discipline_gain: earns_discipline(current_streak),
    }
}

/// Read-only view of a streak at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakStatus {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_workout_date: Option<Timestamp>,
    /// A workout today extends the streak; skipping today breaks it.
    pub is_at_risk: bool,
    /// Calendar days left before the streak is lost: 2 right after a
    /// workout, 1 when at risk, 0 once broken or when there is no streak.
    pub days_until_break: i64,
}

impl StreakStatus {
    /// Status for a user with no character yet.
    pub fn empty() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_workout_date: None,
            is_at_risk: false,
            days_until_break: 0,
        }
    }
}

pub fn streak_status(state: &StreakState, now: Timestamp, offset: FixedOffset) -> StreakStatus {
    let Some(last) = state.last_workout_date else {
        return StreakStatus {
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            ..StreakStatus::empty()
        };
    };

    let days = days_between(last, now, offset).max(0);
    let days_until_break = if state.current_streak > 0 {
        (2 - days).max(0)
    } else {
        0
    };

    StreakStatus {
        current_streak: state.current_streak,
        longest_streak: state.longest_streak,
        last_workout_date: Some(last),
        is_at_risk: days == 1,
        days_until_break,
    }
}
