//! The RPG layer: levels, stats, streaks, XP unlocks and avatar gating.
//!
//! All functions here are deterministic and side-effect free. Persistence
//! and transactions are handled by the API engine, which feeds these rules
//! with rows read from the `characters` table.

pub mod avatar;
pub mod levels;
pub mod stats;
pub mod streaks;
pub mod xp;
