//! Unified error handling for the registration service.
//!
//! Provides the error type surfaced to callers of the service, plus the
//! error types the two collaborators report:
//! - `DirectoryError` from user storage
//! - `NotifyError` from the notification channel

use domain::DomainError;
use thiserror::Error;

/// Application error types surfaced by the registration service.
#[derive(Error, Debug)]
pub enum AppError {
    // Caller errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    AlreadyExists(String),

    // Storage errors, passed through unchanged
    #[error("Persistence error: {0}")]
    Persistence(#[source] DirectoryError),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

/// Errors reported by a user directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// No record with the given identifier
    #[error("User not found")]
    NotFound,

    /// Storage could not be reached or is in a bad state
    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DirectoryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        DirectoryError::Unavailable(msg.into())
    }
}

/// Errors reported by a notification channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl NotifyError {
    pub fn delivery(msg: impl Into<String>) -> Self {
        NotifyError::Delivery(msg.into())
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound => AppError::NotFound,
            other => AppError::Persistence(other),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::InvalidInput(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn already_exists(entity: impl Into<String>) -> Self {
        AppError::AlreadyExists(entity.into())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn directory_not_found_maps_to_not_found() {
        let err = AppError::from(DirectoryError::NotFound);
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn directory_failure_is_wrapped_unchanged() {
        let err = AppError::from(DirectoryError::unavailable("connection refused"));

        assert!(matches!(
            &err,
            AppError::Persistence(DirectoryError::Unavailable(msg)) if msg == "connection refused"
        ));
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Directory unavailable: connection refused".to_string())
        );
    }

    #[test]
    fn validation_maps_to_invalid_input() {
        let err = AppError::from(DomainError::validation("email must not be empty"));
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "email must not be empty"));
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn already_exists_message_names_entity() {
        let err = AppError::already_exists("Username");
        assert_eq!(err.to_string(), "Username already exists");
    }

    #[test]
    fn option_ext_converts_none() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(1).ok_or_not_found().unwrap(), 1);
    }
}
