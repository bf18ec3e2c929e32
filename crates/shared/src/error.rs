//! Application-wide error types.
//!
//! Domain errors carry their own codes; these variants cover request
//! validation, missing resources and storage failures.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Database failures are reported generically; their detail belongs in
    /// server-side logs only.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }
}
