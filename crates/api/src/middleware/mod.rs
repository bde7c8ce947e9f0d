//! Request extractors for authentication and role checks.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer JWT.
//! - [`rbac::RequireAuth`] -- any authenticated user.
//! - [`rbac::RequireCoach`] -- `coach` or `admin`.
//! - [`rbac::RequireAdmin`] -- `admin` only.

pub mod auth;
pub mod rbac;
