//! Application error types
//!
//! Failures raised while assembling and running the application.

use reaction_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Storage errors
    #[error("Database error: {0}")]
    Database(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP status for a domain error
#[must_use]
pub fn domain_status_code(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_validation() {
        400
    } else if e.is_conflict() {
        409
    } else if e.is_unavailable() {
        503
    } else {
        500
    }
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Database(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status_code(e),
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reaction_core::EntityId;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("missing DATABASE_URL".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("x".to_string()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_domain_status_codes() {
        let not_found: AppError = DomainError::PostNotFound(EntityId::new(1)).into();
        assert_eq!(not_found.status_code(), 404);

        let conflict: AppError = DomainError::conflict(EntityId::new(1), EntityId::new(2)).into();
        assert_eq!(conflict.status_code(), 409);
        assert_eq!(conflict.error_code(), "REACTION_CONFLICT");

        let unavailable: AppError = DomainError::StoreUnavailable("pool timed out".to_string()).into();
        assert_eq!(unavailable.status_code(), 503);

        let invalid: AppError = DomainError::InvalidReactionKind("love".to_string()).into();
        assert_eq!(invalid.status_code(), 400);
    }

    #[test]
    fn test_domain_errors_are_transparent() {
        let err = AppError::from(DomainError::UserNotFound(EntityId::new(4)));
        assert_eq!(err.to_string(), "User not found: 4");
    }
}
