//! Domain to DTO mappers

use reaction_core::{EntityId, PostCounters, ReactionKind, ReconcileReport};

use super::responses::{
    CountersResponse, PostReactionResponse, ReactionLookupResponse, ReactorsResponse,
    ReconcileResponse, ToggleReactionResponse, UserReactionsResponse,
};
use crate::services::{Page, PostReaction, ToggleOutcome};

fn ids_to_strings(ids: &[EntityId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

impl ToggleReactionResponse {
    pub fn new(user_id: EntityId, post_id: EntityId, outcome: &ToggleOutcome) -> Self {
        Self {
            post_id: post_id.to_string(),
            user_id: user_id.to_string(),
            state: outcome.state,
            like_count: outcome.counters.like_count,
            dislike_count: outcome.counters.dislike_count,
            changed: outcome.changed,
            attempts: outcome.attempts,
        }
    }
}

impl CountersResponse {
    pub fn new(post_id: EntityId, counters: PostCounters) -> Self {
        Self {
            post_id: post_id.to_string(),
            like_count: counters.like_count,
            dislike_count: counters.dislike_count,
        }
    }
}

impl ReactorsResponse {
    pub fn new(post_id: EntityId, kind: ReactionKind, page: &Page<EntityId>) -> Self {
        Self {
            post_id: post_id.to_string(),
            kind,
            user_ids: ids_to_strings(&page.items),
            next_cursor: page.next_cursor.map(|cursor| cursor.to_string()),
        }
    }
}

impl UserReactionsResponse {
    pub fn new(user_id: EntityId, kind: ReactionKind, page: &Page<EntityId>) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind,
            post_ids: ids_to_strings(&page.items),
            next_cursor: page.next_cursor.map(|cursor| cursor.to_string()),
        }
    }
}

impl From<&PostReaction> for PostReactionResponse {
    fn from(reaction: &PostReaction) -> Self {
        Self {
            post_id: reaction.post_id.to_string(),
            state: reaction.state,
        }
    }
}

impl ReactionLookupResponse {
    pub fn new(user_id: EntityId, reactions: &[PostReaction]) -> Self {
        Self {
            user_id: user_id.to_string(),
            reactions: reactions.iter().map(PostReactionResponse::from).collect(),
        }
    }
}

impl From<ReconcileReport> for ReconcileResponse {
    fn from(report: ReconcileReport) -> Self {
        Self {
            post_id: report.post_id.to_string(),
            repaired: report.repaired(),
            before: report.before,
            after: report.after,
        }
    }
}
