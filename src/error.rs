//! Error types for WLD.

use thiserror::Error;

use crate::validation::ValidationError;

/// Common error type for WLD.
#[derive(Error, Debug)]
pub enum WldError {
    /// Database error.
    ///
    /// Any store failure that is not a constraint violation.
    #[error("database error: {0}")]
    Database(String),

    /// A unique, foreign-key or check constraint was violated.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Free-text input rejected by the validator.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The user is not allowed to view the resource.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl WldError {
    /// Shorthand for a `NotFound` naming the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        WldError::NotFound(what.into())
    }
}

// Constraint failures become Integrity, everything else is a plain database error.
impl From<sqlx::Error> for WldError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation()
                || db_err.is_foreign_key_violation()
                || db_err.is_check_violation()
            {
                return WldError::Integrity(db_err.message().to_string());
            }
        }
        WldError::Database(e.to_string())
    }
}

/// Result type alias for WLD operations.
pub type Result<T> = std::result::Result<T, WldError>;
