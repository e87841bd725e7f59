//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::EntityId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(EntityId),

    #[error("User not found: {0}")]
    UserNotFound(EntityId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Concurrent reaction update for user {user_id} on post {post_id}")]
    ReactionConflict { user_id: EntityId, post_id: EntityId },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::ReactionConflict { .. } => "REACTION_CONFLICT",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a conflict error for a (user, post) pair
    pub fn conflict(user_id: EntityId, post_id: EntityId) -> Self {
        Self::ReactionConflict { user_id, post_id }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidReactionKind(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionConflict { .. })
    }

    /// Check if the underlying store failed
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }

    /// Conflicts may succeed when retried against fresh state
    pub fn is_retryable(&self) -> bool {
        self.is_conflict()
    }
}
