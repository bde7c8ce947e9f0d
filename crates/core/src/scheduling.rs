//! Workout session statuses, origins and the status state machine.
//!
//! Stored as TEXT in `workout_sessions` and guarded by check constraints
//! that list the same values.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Planned by a coach, not yet done.
pub const STATUS_SCHEDULED: &str = "scheduled";
/// Done; RPG rewards have been applied.
pub const STATUS_COMPLETED: &str = "completed";
/// Called off before completion.
pub const STATUS_CANCELLED: &str = "cancelled";

pub const VALID_STATUSES: &[&str] = &[STATUS_SCHEDULED, STATUS_COMPLETED, STATUS_CANCELLED];

// ---------------------------------------------------------------------------
// Origins
// ---------------------------------------------------------------------------

/// Created by a coach or admin ahead of time.
pub const ORIGIN_SCHEDULED: &str = "scheduled";
/// Logged by the client after the fact.
pub const ORIGIN_SELF_LOGGED: &str = "self_logged";

/// Maximum length of a free-text session type label.
pub const MAX_SESSION_TYPE_LEN: usize = 100;

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the statuses reachable from `from`. Completed and cancelled are
/// terminal.
pub fn valid_transitions(from: &str) -> &'static [&'static str] {
    match from {
        STATUS_SCHEDULED => &[STATUS_COMPLETED, STATUS_CANCELLED],
        _ => &[],
    }
}

/// Check whether a transition from `from` to `to` is valid.
pub fn can_transition(from: &str, to: &str) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a status transition, returning a `Conflict` for invalid ones.
pub fn validate_transition(from: &str, to: &str) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move a {from} session to {to}"
        )))
    }
}

/// Only scheduled sessions may be edited.
pub fn validate_editable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_SCHEDULED {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Session is {status} and can no longer be edited"
        )))
    }
}

/// Validate an optional status filter from a query string.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {VALID_STATUSES:?}"
        )))
    }
}

/// Validate a free-text session type label.
pub fn validate_session_type(label: &str) -> Result<(), CoreError> {
    if label.len() > MAX_SESSION_TYPE_LEN {
        return Err(CoreError::Validation(format!(
            "Session type must be at most {MAX_SESSION_TYPE_LEN} characters"
        )));
    }
    Ok(())
}
