//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches where the entity is editable

pub mod character;
pub mod session;
pub mod user;
pub mod workout_session;
pub mod xp_log;
