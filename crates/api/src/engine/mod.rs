//! RPG progression engine.
//!
//! Composes the pure rules in `fitquest_core::rpg` with the character and
//! XP ledger repositories. Every read-modify-write runs inside a
//! transaction holding the character's row lock, so concurrent workouts
//! for the same user cannot lose updates.
//!
//! Each operation comes in two forms: a `*_inner` function that takes an
//! open connection (usually `&mut *tx`) so it can be composed, and a
//! pool-level wrapper that owns its transaction.

pub mod ledger;
pub mod session;
pub mod stats;
pub mod streaks;

use fitquest_core::error::CoreError;

/// Errors raised by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
