//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use reaction_core::{DomainError, EntityId, ReactionKind};
use serde::Deserialize;
use validator::{Validate, ValidationError};

fn validate_positive_id(id: &EntityId) -> Result<(), ValidationError> {
    if id.into_inner() > 0 {
        Ok(())
    } else {
        Err(ValidationError::new("positive_id").with_message("ids must be positive".into()))
    }
}

/// Toggle request: the acting user and the pressed control
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ToggleReactionRequest {
    #[validate(custom(function = "validate_positive_id"))]
    pub user_id: EntityId,

    #[validate(length(min = 1, max = 16, message = "Kind must be 'like' or 'dislike'"))]
    pub kind: String,
}

impl ToggleReactionRequest {
    /// Parsed reaction kind
    pub fn reaction_kind(&self) -> Result<ReactionKind, DomainError> {
        self.kind.parse()
    }
}

/// Batch lookup of a user's reactions across posts
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionLookupRequest {
    #[validate(length(min = 1, message = "post_ids must not be empty"))]
    pub post_ids: Vec<EntityId>,
}
