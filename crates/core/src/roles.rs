/// Full access, including user management and manual XP grants.
pub const ROLE_ADMIN: &str = "admin";
/// Schedules and reviews sessions for clients.
pub const ROLE_COACH: &str = "coach";
/// Trains, completes sessions, owns a character.
pub const ROLE_CLIENT: &str = "client";

/// All valid role names, matching the `ck_users_role` check constraint.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_COACH, ROLE_CLIENT];

/// Returns `true` for roles allowed to manage other users' sessions.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_COACH
}
