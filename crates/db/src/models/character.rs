//! RPG character entity model.

use fitquest_core::rpg::streaks::StreakState;
use fitquest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A character row from the `characters` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub user_id: DbId,
    /// Always equal to `level_for_xp(xp)`.
    pub level: i32,
    pub xp: i32,
    pub strength: i32,
    pub endurance: i32,
    pub discipline: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_workout_date: Option<Timestamp>,
    /// NOT NULL in the database; see `fitquest_core::rpg::avatar::AvatarConfig`.
    pub avatar_config: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Character {
    pub fn streak_state(&self) -> StreakState {
        StreakState {
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_workout_date: self.last_workout_date,
        }
    }
}
