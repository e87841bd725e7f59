//! Path parameter extractors
//!
//! Ids and reaction kinds arrive as strings and are parsed here so handlers
//! get typed values and a uniform 400 on malformed input.

use reaction_core::{EntityId, ReactionKind};
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<EntityId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with post_id
#[derive(Debug, Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    pub fn post_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.post_id, "post_id")
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

/// Path parameters with post_id and user_id
#[derive(Debug, Deserialize)]
pub struct PostUserPath {
    pub post_id: String,
    pub user_id: String,
}

impl PostUserPath {
    pub fn post_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.post_id, "post_id")
    }

    pub fn user_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}

fn parse_kind(raw: &str) -> Result<ReactionKind, ApiError> {
    Ok(raw.parse::<ReactionKind>()?)
}

/// Path parameters with post_id and a reaction kind
#[derive(Debug, Deserialize)]
pub struct PostKindPath {
    pub post_id: String,
    pub kind: String,
}

impl PostKindPath {
    pub fn post_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.post_id, "post_id")
    }

    /// Parse kind (`like`, `likes`, `dislike`, `dislikes`)
    pub fn kind(&self) -> Result<ReactionKind, ApiError> {
        parse_kind(&self.kind)
    }
}

/// Path parameters with user_id and a reaction kind
#[derive(Debug, Deserialize)]
pub struct UserKindPath {
    pub user_id: String,
    pub kind: String,
}

impl UserKindPath {
    pub fn user_id(&self) -> Result<EntityId, ApiError> {
        parse_id(&self.user_id, "user_id")
    }

    /// Parse kind (`like`, `likes`, `dislike`, `dislikes`)
    pub fn kind(&self) -> Result<ReactionKind, ApiError> {
        parse_kind(&self.kind)
    }
}
