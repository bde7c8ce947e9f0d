//! Domain logic for FitQuest with zero internal dependencies.
//!
//! Everything here is pure: the leveling, stat, streak and unlock rules of
//! the RPG layer, plus validation constants shared by the repository and
//! HTTP layers.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod rpg;
pub mod scheduling;
pub mod types;
