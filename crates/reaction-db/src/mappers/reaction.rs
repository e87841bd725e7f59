//! Reaction entity <-> model mapper

use reaction_core::{DomainError, EntityId, ReactionEdge, ReactionKind};

use crate::models::ReactionModel;

/// Convert ReactionModel to ReactionEdge entity
///
/// The kind column is constrained by a CHECK, so a parse failure means the
/// schema and the code disagree.
impl TryFrom<ReactionModel> for ReactionEdge {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let kind = kind_from_column(&model.kind)?;
        Ok(ReactionEdge {
            user_id: EntityId::new(model.user_id),
            post_id: EntityId::new(model.post_id),
            kind,
            created_at: model.created_at,
        })
    }
}

/// Parse the stored kind column
pub fn kind_from_column(value: &str) -> Result<ReactionKind, DomainError> {
    match value {
        "like" => Ok(ReactionKind::Like),
        "dislike" => Ok(ReactionKind::Dislike),
        other => Err(DomainError::InternalError(format!(
            "unexpected reaction kind in store: {other}"
        ))),
    }
}

/// Map a page of rows, failing on the first malformed one
pub fn edges_from_models(models: Vec<ReactionModel>) -> Result<Vec<ReactionEdge>, DomainError> {
    models.into_iter().map(ReactionEdge::try_from).collect()
}
