use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Referenced entity does not exist. `id` is the lookup key (a user id
    /// for characters, a row id for everything else).
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The error raised whenever a user has no character row yet.
    pub fn character_not_found(user_id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Character",
            id: user_id,
        }
    }
}
