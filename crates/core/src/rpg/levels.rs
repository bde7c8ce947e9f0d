//! Level table: cumulative XP thresholds and progress within a level.

use serde::Serialize;

/// Highest reachable level.
pub const MAX_LEVEL: i32 = 50;

/// XP needed to advance *from* `level` to `level + 1`.
///
/// Piecewise constant by tier: 1-5 cost 100, 6-10 cost 200, 11-20 cost
/// 400, 21-30 cost 600, and everything from 31 up costs 800.
pub fn xp_cost_of_level(level: i32) -> i32 {
    match level {
        i32::MIN..=5 => 100,
        6..=10 => 200,
        11..=20 => 400,
        21..=30 => 600,
        _ => 800,
    }
}

/// Cumulative XP required to reach `level`. Zero for level 1 and below.
///
/// Levels past `MAX_LEVEL + 1` report the `MAX_LEVEL + 1` threshold, which
/// keeps the sum within `i32` for any input.
pub fn xp_for_level(level: i32) -> i32 {
    (1..level.min(MAX_LEVEL + 1)).map(xp_cost_of_level).sum()
}

/// Highest level whose threshold does not exceed `xp`, capped at
/// [`MAX_LEVEL`]. Negative XP maps to level 1.
pub fn level_for_xp(xp: i32) -> i32 {
    let mut level = 1;
    let mut next_threshold = xp_cost_of_level(1);
    while level < MAX_LEVEL && xp >= next_threshold {
        level += 1;
        next_threshold += xp_cost_of_level(level);
    }
    level
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    /// XP earned above the current level's threshold.
    pub current: i32,
    /// XP between this level and the next. Zero at the max level.
    pub required: i32,
    /// `floor(current / required * 100)`, pinned to 100 at the max level.
    pub percentage: i32,
    pub is_max_level: bool,
}

/// Compute progress toward the next level for a cumulative `xp` total.
pub fn level_progress(xp: i32) -> LevelProgress {
    let xp = xp.max(0);
    let level = level_for_xp(xp);
    let floor = xp_for_level(level);
    let current = xp - floor;

    if level >= MAX_LEVEL {
        return LevelProgress {
            level,
            current,
            required: 0,
            percentage: 100,
            is_max_level: true,
        };
    }

    let required = xp_for_level(level + 1) - floor;
    let percentage = (i64::from(current) * 100 / i64::from(required)) as i32;

    LevelProgress {
        level,
        current,
        required,
        percentage,
        is_max_level: false,
    }
}
