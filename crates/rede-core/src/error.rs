use thiserror::Error;
use uuid::Uuid;

/// Application-wide error types for the rede backend.
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced entity (user, module, membership, news, logo) absent.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (duplicate email or title).
    #[error("{0}")]
    Conflict(String),

    /// Missing/invalid/expired token, or credential mismatch at login.
    /// Carries no detail so account existence cannot be probed.
    #[error("invalid credentials or token")]
    Unauthenticated,

    /// Malformed input rejected before reaching the core.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// The user record itself is absent.
    pub fn user_not_found(id: Uuid) -> Self {
        AppError::NotFound(format!("user not found: {id}"))
    }

    /// The user exists but has no membership for this module. Kept distinct
    /// from [`AppError::user_not_found`] — callers rely on telling the two
    /// apart.
    pub fn membership_not_found(user_id: Uuid, module_id: Uuid) -> Self {
        AppError::NotFound(format!(
            "module {module_id} not assigned to user {user_id}"
        ))
    }
}
