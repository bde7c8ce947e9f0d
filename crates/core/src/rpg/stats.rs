//! Character stats: bounded increments, tier names, labels and the
//! session-type classifier that decides which stats a workout trains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest value any stat can hold.
pub const STAT_MIN: i32 = 0;
/// Highest value any stat can hold.
pub const STAT_MAX: i32 = 100;

pub const DEFAULT_STRENGTH_INCREMENT: i32 = 1;
pub const DEFAULT_ENDURANCE_INCREMENT: i32 = 1;
pub const DEFAULT_DISCIPLINE_INCREMENT: i32 = 2;

// ---------------------------------------------------------------------------
// Stat kinds
// ---------------------------------------------------------------------------

/// One of the three persisted character stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Endurance,
    Discipline,
}

impl Stat {
    /// Column name in the `characters` table.
    pub fn column(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Endurance => "endurance",
            Stat::Discipline => "discipline",
        }
    }

    pub fn default_increment(self) -> i32 {
        match self {
            Stat::Strength => DEFAULT_STRENGTH_INCREMENT,
            Stat::Endurance => DEFAULT_ENDURANCE_INCREMENT,
            Stat::Discipline => DEFAULT_DISCIPLINE_INCREMENT,
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Stat::Strength),
            "endurance" => Ok(Stat::Endurance),
            "discipline" => Ok(Stat::Discipline),
            other => Err(CoreError::Validation(format!(
                "Unknown stat '{other}'. Must be one of: strength, endurance, discipline"
            ))),
        }
    }
}

/// Add `amount` to `current`, keeping the result inside `[STAT_MIN, STAT_MAX]`.
pub fn apply_increment(current: i32, amount: i32) -> i32 {
    current.saturating_add(amount).clamp(STAT_MIN, STAT_MAX)
}

// ---------------------------------------------------------------------------
// Power level and tiers
// ---------------------------------------------------------------------------

/// Floor of the mean of the three stats (true floor, also for negatives).
pub fn power_level(strength: i32, endurance: i32, discipline: i32) -> i32 {
    (strength + endurance + discipline).div_euclid(3)
}

const MUSCLE_TIERS: [&str; 4] = ["normal", "defined", "muscular", "huge"];
const LEANNESS_TIERS: [&str; 4] = ["standard", "lean", "athletic", "shredded"];
const AURA_TIERS: [&str; 4] = ["none", "faint", "bright", "radiant"];

/// Index into a four-way tier table: `[0,25)`, `[25,50)`, `[50,75)`, `[75,100]`.
fn tier_index(value: i32) -> usize {
    match value {
        i32::MIN..=24 => 0,
        25..=49 => 1,
        50..=74 => 2,
        _ => 3,
    }
}

/// Visual tiers derived from the three stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTiers {
    /// Driven by strength.
    pub muscle_tier: &'static str,
    /// Driven by endurance.
    pub leanness_tier: &'static str,
    /// Driven by discipline.
    pub aura_tier: &'static str,
    pub power_level: i32,
}

pub fn stat_tiers(strength: i32, endurance: i32, discipline: i32) -> StatTiers {
    StatTiers {
        muscle_tier: MUSCLE_TIERS[tier_index(strength)],
        leanness_tier: LEANNESS_TIERS[tier_index(endurance)],
        aura_tier: AURA_TIERS[tier_index(discipline)],
        power_level: power_level(strength, endurance, discipline),
    }
}

/// Six-way label used on progress screens. Independent of the tier table.
pub fn stat_label_for_value(value: i32) -> &'static str {
    match value {
        i32::MIN..=9 => "Novice",
        10..=24 => "Beginner",
        25..=49 => "Intermediate",
        50..=74 => "Advanced",
        75..=89 => "Expert",
        _ => "Master",
    }
}

// ---------------------------------------------------------------------------
// Session classification
// ---------------------------------------------------------------------------

pub const STRENGTH_KEYWORDS: &[&str] = &["strength", "weights", "resistance", "lifting"];
pub const ENDURANCE_KEYWORDS: &[&str] = &["cardio", "running", "endurance", "hiit"];

/// Stat increments earned by a session. `None` means the stat is untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatGains {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endurance: Option<i32>,
}

/// Decide which stats a session trains from its free-text type label.
///
/// Case-insensitive substring match against [`STRENGTH_KEYWORDS`] and
/// [`ENDURANCE_KEYWORDS`]; both may match. Anything unrecognised, including
/// an empty or missing label, trains both.
pub fn classify_session_stats(label: Option<&str>) -> StatGains {
    let label = label.unwrap_or_default().to_lowercase();
    let trains_strength = STRENGTH_KEYWORDS.iter().any(|k| label.contains(k));
    let trains_endurance = ENDURANCE_KEYWORDS.iter().any(|k| label.contains(k));

    if !trains_strength && !trains_endurance {
        return StatGains {
            strength: Some(DEFAULT_STRENGTH_INCREMENT),
            endurance: Some(DEFAULT_ENDURANCE_INCREMENT),
        };
    }

    StatGains {
        strength: trains_strength.then_some(DEFAULT_STRENGTH_INCREMENT),
        endurance: trains_endurance.then_some(DEFAULT_ENDURANCE_INCREMENT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_level_uses_true_floor() {
        assert_eq!(power_level(-10, 0, 0), -4);
        assert_eq!(power_level(100, 100, 100), 100);
        assert_eq!(power_level(10, 20, 30), 20);
        assert_eq!(power_level(1, 1, 0), 0);
    }

    #[test]
    fn increment_clamps_high_and_low() {
        assert_eq!(apply_increment(98, 5), 100);
        assert_eq!(apply_increment(3, -10), 0);
        assert_eq!(apply_increment(40, 2), 42);
        assert_eq!(apply_increment(99, i32::MAX), 100);
    }

    #[test]
    fn tier_boundaries_are_inclusive_lower() {
        let t = stat_tiers(24, 25, 50);
        assert_eq!(t.muscle_tier, "normal");
        assert_eq!(t.leanness_tier, "lean");
        assert_eq!(t.aura_tier, "bright");

        let t = stat_tiers(75, 100, 0);
        assert_eq!(t.muscle_tier, "huge");
        assert_eq!(t.leanness_tier, "shredded");
        assert_eq!(t.aura_tier, "none");
        assert_eq!(t.power_level, 58);
    }

    #[test]
    fn labels_follow_six_way_thresholds() {
        assert_eq!(stat_label_for_value(0), "Novice");
        assert_eq!(stat_label_for_value(10), "Beginner");
        assert_eq!(stat_label_for_value(25), "Intermediate");
        assert_eq!(stat_label_for_value(50), "Advanced");
        assert_eq!(stat_label_for_value(89), "Expert");
        assert_eq!(stat_label_for_value(90), "Master");
    }

    #[test]
    fn classify_endurance_only() {
        let gains = classify_session_stats(Some("running"));
        assert_eq!(gains.strength, None);
        assert_eq!(gains.endurance, Some(1));
    }

    #[test]
    fn classify_is_case_insensitive() {
        let gains = classify_session_stats(Some("Olympic LIFTING"));
        assert_eq!(gains.strength, Some(1));
        assert_eq!(gains.endurance, None);
    }

    #[test]
    fn classify_both_keywords() {
        let gains = classify_session_stats(Some("hiit weights circuit"));
        assert_eq!(gains.strength, Some(1));
        assert_eq!(gains.endurance, Some(1));
    }

    #[test]
    fn classify_unknown_or_empty_is_balanced() {
        let balanced = StatGains {
            strength: Some(1),
            endurance: Some(1),
        };
        assert_eq!(classify_session_stats(Some("UNKNOWN")), balanced);
        assert_eq!(classify_session_stats(Some("")), balanced);
        assert_eq!(classify_session_stats(None), balanced);
    }

    #[test]
    fn stat_parses_from_column_name() {
        assert_eq!("discipline".parse::<Stat>().unwrap(), Stat::Discipline);
        assert!("charisma".parse::<Stat>().is_err());
        assert_eq!(Stat::Strength.to_string(), "strength");
        assert_eq!(Stat::Discipline.default_increment(), 2);
    }
}
