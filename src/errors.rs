//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Repository
//! failures pass through the service layer unchanged.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound => self.to_string(),

            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AppError::NotFound.code(), "NOT_FOUND");
        assert_eq!(
            AppError::Database(sea_orm::DbErr::Custom("x".into())).code(),
            "DATABASE_ERROR"
        );
        assert_eq!(AppError::internal("boom").code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_user_message_hides_internal_details() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.user_message(), "An internal error occurred");

        let err = AppError::Database(sea_orm::DbErr::Custom("secret".into()));
        assert_eq!(err.user_message(), "A database error occurred");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(AppError::NotFound.user_message(), "Resource not found");
    }

    #[test]
    fn test_option_ext() {
        assert_eq!(Some(7).ok_or_not_found().ok(), Some(7));
        assert!(matches!(None::<i32>.ok_or_not_found(), Err(AppError::NotFound)));
    }
}
