//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use reaction_core::{PostCounters, ReactionKind, ReactionState};
use serde::Serialize;

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a toggle
#[derive(Debug, Clone, Serialize)]
pub struct ToggleReactionResponse {
    pub post_id: String,
    pub user_id: String,
    pub state: ReactionState,
    pub like_count: i64,
    pub dislike_count: i64,
    pub changed: bool,
    pub attempts: u32,
}

/// A user's current reaction to one post
#[derive(Debug, Clone, Serialize)]
pub struct ReactionStateResponse {
    pub post_id: String,
    pub user_id: String,
    pub state: ReactionState,
}

/// Post counters
#[derive(Debug, Clone, Serialize)]
pub struct CountersResponse {
    pub post_id: String,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// One page of users who reacted to a post
#[derive(Debug, Clone, Serialize)]
pub struct ReactorsResponse {
    pub post_id: String,
    pub kind: ReactionKind,
    pub user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// One page of posts a user reacted to
#[derive(Debug, Clone, Serialize)]
pub struct UserReactionsResponse {
    pub user_id: String,
    pub kind: ReactionKind,
    pub post_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// Batch lookup entry
#[derive(Debug, Clone, Serialize)]
pub struct PostReactionResponse {
    pub post_id: String,
    pub state: ReactionState,
}

/// Batch lookup result, in request order
#[derive(Debug, Clone, Serialize)]
pub struct ReactionLookupResponse {
    pub user_id: String,
    pub reactions: Vec<PostReactionResponse>,
}

/// Counter reconciliation result
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub post_id: String,
    pub before: PostCounters,
    pub after: PostCounters,
    pub repaired: bool,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
