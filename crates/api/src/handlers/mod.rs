//! Request handlers, one module per resource.
//!
//! Handlers extract the caller, delegate to repositories or the progression
//! engine, and map failures through [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod rpg;
pub mod sessions;
