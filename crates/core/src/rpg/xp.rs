//! XP award arithmetic and the level-up unlock text.

use serde::Serialize;

use super::avatar::COSMETIC_CATALOG;
use super::levels::level_for_xp;

/// Base award for completing a coach-scheduled session.
pub const XP_SCHEDULED_SESSION: i32 = 100;
/// Base award for a self-logged workout.
pub const XP_SELF_LOGGED_SESSION: i32 = 75;

pub const SOURCE_SESSION_COMPLETE: &str = "session_complete";
pub const SOURCE_SELF_LOGGED: &str = "self_logged_workout";
pub const SOURCE_STREAK_BONUS: &str = "streak_bonus";
pub const SOURCE_MANUAL: &str = "manual_award";

/// Descriptions of everything unlocked by moving from `old_level` to
/// `new_level`. Every milestone in `(old_level, new_level]` is listed, so
/// a multi-level jump reports all of them.
pub fn unlocks_between(old_level: i32, new_level: i32) -> Vec<String> {
    COSMETIC_CATALOG
        .iter()
        .filter(|item| item.required_level > old_level && item.required_level <= new_level)
        .map(|item| format!("Level {}: {}", item.required_level, item.description))
        .collect()
}

/// Outcome of adding XP to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpAward {
    pub old_xp: i32,
    pub new_xp: i32,
    pub old_level: i32,
    pub new_level: i32,
    pub did_level_up: bool,
    pub unlocks: Vec<String>,
}

/// Level-up details surfaced to clients when an award crosses a level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub old_level: i32,
    pub new_level: i32,
    pub unlocks: Vec<String>,
}

impl XpAward {
    /// `Some` only when the award raised the level.
    pub fn level_up(&self) -> Option<LevelUp> {
        self.did_level_up.then(|| LevelUp {
            old_level: self.old_level,
            new_level: self.new_level,
            unlocks: self.unlocks.clone(),
        })
    }

    /// Add `amount` to `old_xp` and recompute the level from the level table.
    pub fn compute(old_xp: i32, amount: i32) -> Self {
        let new_xp = old_xp.saturating_add(amount);
        let old_level = level_for_xp(old_xp);
        let new_level = level_for_xp(new_xp);
        let did_level_up = new_level > old_level;
        let unlocks = if did_level_up {
            unlocks_between(old_level, new_level)
        } else {
            Vec::new()
        };

        Self {
            old_xp,
            new_xp,
            old_level,
            new_level,
            did_level_up,
            unlocks,
        }
    }
}
