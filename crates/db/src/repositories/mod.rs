//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Methods that may run inside a transaction accept any [`PgExecutor`]
//! (`&PgPool` or `&mut *tx`); the rest take `&PgPool` directly.
//!
//! [`PgExecutor`]: sqlx::postgres::PgExecutor

pub mod character_repo;
pub mod session_repo;
pub mod user_repo;
pub mod workout_session_repo;
pub mod xp_log_repo;

pub use character_repo::CharacterRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use workout_session_repo::WorkoutSessionRepo;
pub use xp_log_repo::XpLogRepo;
