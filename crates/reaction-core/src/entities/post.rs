//! Post counter projection
//!
//! `like_count` / `dislike_count` are a cache of the edge set, never a source
//! of truth. They only move through [`CounterDelta`]s produced by a
//! [`Transition`](super::Transition) or by reconciliation.

use serde::{Deserialize, Serialize};

use crate::value_objects::EntityId;

use super::ReactionKind;

/// Denormalized reaction counters stored on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostCounters {
    pub like_count: i64,
    pub dislike_count: i64,
}

impl PostCounters {
    pub const fn new(like_count: i64, dislike_count: i64) -> Self {
        Self {
            like_count,
            dislike_count,
        }
    }

    /// Apply a delta, refusing to go negative
    pub fn checked_apply(&self, delta: CounterDelta) -> Option<Self> {
        let like_count = self.like_count.checked_add(delta.likes)?;
        let dislike_count = self.dislike_count.checked_add(delta.dislikes)?;
        if like_count < 0 || dislike_count < 0 {
            return None;
        }
        Some(Self {
            like_count,
            dislike_count,
        })
    }
}

/// Signed change to a post's counters, applied atomically by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    /// +1 on the counter of `kind`
    pub const fn increment(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self { likes: 1, dislikes: 0 },
            ReactionKind::Dislike => Self { likes: 0, dislikes: 1 },
        }
    }

    /// -1 on the counter of `kind`
    pub const fn decrement(kind: ReactionKind) -> Self {
        match kind {
            ReactionKind::Like => Self { likes: -1, dislikes: 0 },
            ReactionKind::Dislike => Self { likes: 0, dislikes: -1 },
        }
    }

    pub const fn combine(self, other: Self) -> Self {
        Self {
            likes: self.likes + other.likes,
            dislikes: self.dislikes + other.dislikes,
        }
    }
}

/// Outcome of recomputing a post's counters from its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub post_id: EntityId,
    /// Counters as stored before reconciliation
    pub before: PostCounters,
    /// Counters derived from the edge set (now stored)
    pub after: PostCounters,
}

impl ReconcileReport {
    /// Whether the stored projection had drifted
    pub fn repaired(&self) -> bool {
        self.before != self.after
    }
}
