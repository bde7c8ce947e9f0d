//! Cosmetic avatar catalog and level gating.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const SLOT_OUTFIT: &str = "outfit";
pub const SLOT_AURA: &str = "aura";
pub const SLOT_ACCESSORY: &str = "accessory";
pub const SLOT_CAPE: &str = "cape";
pub const SLOT_TITLE: &str = "title";

/// A cosmetic that can be equipped once the character reaches `required_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CosmeticItem {
    pub slot: &'static str,
    pub key: &'static str,
    pub description: &'static str,
    pub required_level: i32,
}

/// Every equippable item. Items above level 1 are the level-up unlocks.
pub const COSMETIC_CATALOG: &[CosmeticItem] = &[
    CosmeticItem {
        slot: SLOT_OUTFIT,
        key: "training_tee",
        description: "Training tee",
        required_level: 1,
    },
    CosmeticItem {
        slot: SLOT_OUTFIT,
        key: "bronze_armor",
        description: "Bronze armor outfit",
        required_level: 5,
    },
    CosmeticItem {
        slot: SLOT_AURA,
        key: "silver_aura",
        description: "Silver aura effect",
        required_level: 10,
    },
    CosmeticItem {
        slot: SLOT_ACCESSORY,
        key: "gold_kettlebell",
        description: "Gold kettlebell accessory",
        required_level: 15,
    },
    CosmeticItem {
        slot: SLOT_CAPE,
        key: "platinum_cape",
        description: "Platinum champion cape",
        required_level: 20,
    },
    CosmeticItem {
        slot: SLOT_TITLE,
        key: "iron_will",
        description: "Title: Iron Will",
        required_level: 25,
    },
];

pub fn find_item(key: &str) -> Option<&'static CosmeticItem> {
    COSMETIC_CATALOG.iter().find(|item| item.key == key)
}

/// The equipped cosmetics, stored as JSONB in `characters.avatar_config`.
/// `None` leaves a slot empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    pub outfit: Option<String>,
    pub aura: Option<String>,
    pub accessory: Option<String>,
    pub cape: Option<String>,
    pub title: Option<String>,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            outfit: Some("training_tee".to_string()),
            aura: None,
            accessory: None,
            cape: None,
            title: None,
        }
    }
}

impl AvatarConfig {
    fn slots(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (SLOT_OUTFIT, self.outfit.as_deref()),
            (SLOT_AURA, self.aura.as_deref()),
            (SLOT_ACCESSORY, self.accessory.as_deref()),
            (SLOT_CAPE, self.cape.as_deref()),
            (SLOT_TITLE, self.title.as_deref()),
        ]
    }
}

/// Reject unknown items, items equipped in the wrong slot, and items the
/// character's level has not unlocked yet.
pub fn validate_avatar_config(config: &AvatarConfig, level: i32) -> Result<(), CoreError> {
    for (slot, key) in config.slots() {
        let Some(key) = key else { continue };
        let item = find_item(key).ok_or_else(|| {
            CoreError::Validation(format!("Unknown cosmetic item '{key}'"))
        })?;
        if item.slot != slot {
            return Err(CoreError::Validation(format!(
                "Item '{key}' belongs in the {} slot, not {slot}",
                item.slot
            )));
        }
        if item.required_level > level {
            return Err(CoreError::Validation(format!(
                "Item '{key}' unlocks at level {}",
                item.required_level
            )));
        }
    }
    Ok(())
}

/// Catalog entry annotated with whether a given level has unlocked it.
#[derive(Debug, Clone, Serialize)]
pub struct UnlockStatus {
    #[serde(flatten)]
    pub item: CosmeticItem,
    pub unlocked: bool,
}

pub fn unlock_statuses(level: i32) -> Vec<UnlockStatus> {
    COSMETIC_CATALOG
        .iter()
        .map(|item| UnlockStatus {
            item: *item,
            unlocked: item.required_level <= level,
        })
        .collect()
}
