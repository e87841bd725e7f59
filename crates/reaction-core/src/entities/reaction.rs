//! Reaction entity - a user's like or dislike on a post

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::EntityId;

/// The two mutually exclusive reaction kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    /// Storage / wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }

    /// The logical state a user is in while holding an edge of this kind
    #[inline]
    pub const fn as_state(self) -> ReactionState {
        match self {
            Self::Like => ReactionState::Liked,
            Self::Dislike => ReactionState::Disliked,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" | "likes" => Ok(Self::Like),
            "dislike" | "dislikes" => Ok(Self::Dislike),
            _ => Err(DomainError::InvalidReactionKind(s.to_string())),
        }
    }
}

/// Logical reaction state of a (user, post) pair
///
/// Exactly mirrors the existence and kind of the pair's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl ReactionState {
    /// Kind of the edge backing this state, if any
    #[inline]
    pub const fn kind(self) -> Option<ReactionKind> {
        match self {
            Self::None => None,
            Self::Liked => Some(ReactionKind::Like),
            Self::Disliked => Some(ReactionKind::Dislike),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Liked => "LIKED",
            Self::Disliked => "DISLIKED",
        }
    }
}

impl fmt::Display for ReactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction edge - links one user to one post with a kind
///
/// At most one edge exists per (user_id, post_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEdge {
    pub user_id: EntityId,
    pub post_id: EntityId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl ReactionEdge {
    /// Create a new edge stamped with the current time
    ///
    /// The timestamp is truncated to microseconds, the precision page
    /// cursors and Postgres carry.
    pub fn new(user_id: EntityId, post_id: EntityId, kind: ReactionKind) -> Self {
        Self {
            user_id,
            post_id,
            kind,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    #[inline]
    pub fn is_kind(&self, kind: ReactionKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn state(&self) -> ReactionState {
        self.kind.as_state()
    }
}
