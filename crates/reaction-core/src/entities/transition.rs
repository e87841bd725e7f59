//! Toggle state machine
//!
//! | Current  | Like                     | Dislike                   |
//! |----------|--------------------------|---------------------------|
//! | NONE     | LIKED (+like)            | DISLIKED (+dislike)       |
//! | LIKED    | NONE (-like)             | DISLIKED (-like +dislike) |
//! | DISLIKED | LIKED (-dislike +like)   | NONE (-dislike)           |
//!
//! Requesting the kind that is already active clears it. Switching kind
//! retires the old edge and installs the new one in the same step.

use serde::Serialize;

use super::{CounterDelta, ReactionKind, ReactionState};

/// Mutation of the edge record that a transition requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    /// No edge exists; insert one of this kind
    Create(ReactionKind),
    /// The edge of this kind is deleted
    Remove(ReactionKind),
    /// The edge flips kind in place
    Replace {
        from: ReactionKind,
        to: ReactionKind,
    },
}

impl EdgeChange {
    /// Edge kind the store must currently hold for this change to apply
    pub const fn expected(self) -> Option<ReactionKind> {
        match self {
            Self::Create(_) => None,
            Self::Remove(kind) => Some(kind),
            Self::Replace { from, .. } => Some(from),
        }
    }

    /// Edge kind after the change
    pub const fn resulting(self) -> Option<ReactionKind> {
        match self {
            Self::Create(kind) => Some(kind),
            Self::Remove(_) => None,
            Self::Replace { to, .. } => Some(to),
        }
    }
}

/// A single legal step of the toggle state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: ReactionState,
    pub to: ReactionState,
    pub requested: ReactionKind,
}

impl Transition {
    /// Compute the transition for `requested` from `current`
    pub const fn compute(current: ReactionState, requested: ReactionKind) -> Self {
        let to = match (current, requested) {
            (ReactionState::None, kind) => kind.as_state(),
            (ReactionState::Liked, ReactionKind::Like)
            | (ReactionState::Disliked, ReactionKind::Dislike) => ReactionState::None,
            (ReactionState::Liked, ReactionKind::Dislike) => ReactionState::Disliked,
            (ReactionState::Disliked, ReactionKind::Like) => ReactionState::Liked,
        };

        Self {
            from: current,
            to,
            requested,
        }
    }

    /// The edge mutation this transition performs
    pub const fn edge_change(&self) -> EdgeChange {
        match (self.from.kind(), self.to.kind()) {
            (None, Some(kind)) => EdgeChange::Create(kind),
            (Some(kind), None) => EdgeChange::Remove(kind),
            (Some(from), Some(to)) => EdgeChange::Replace { from, to },
            // compute() never yields NONE -> NONE
            (None, None) => EdgeChange::Create(self.requested),
        }
    }

    /// Counter changes that keep the projection equal to the edge set
    pub const fn delta(&self) -> CounterDelta {
        match self.edge_change() {
            EdgeChange::Create(kind) => CounterDelta::increment(kind),
            EdgeChange::Remove(kind) => CounterDelta::decrement(kind),
            EdgeChange::Replace { from, to } => {
                CounterDelta::decrement(from).combine(CounterDelta::increment(to))
            }
        }
    }
}
