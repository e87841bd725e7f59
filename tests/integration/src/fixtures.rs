//! Test fixtures and data generators
//!
//! Seed ids, request bodies and response shapes used by the API tests.

use reaction_core::{EntityId, PostCounters};
use reaction_db::MemoryReactionStore;
use serde::{Deserialize, Serialize};

/// Users 1..=SEED_USERS exist in every seeded store
pub const SEED_USERS: i64 = 32;

/// Post with no reactions
pub const EMPTY_POST: i64 = 100;

/// Post seeded with 5 likes and 2 dislikes
pub const BUSY_POST: i64 = 200;

/// Ids that are never seeded
pub const UNKNOWN_POST: i64 = 9_999;
pub const UNKNOWN_USER: i64 = 8_888;

/// Store with users, an empty post and a post carrying prior counters
pub fn seeded_store() -> MemoryReactionStore {
    let store = MemoryReactionStore::new();
    for id in 1..=SEED_USERS {
        store.insert_user(EntityId::new(id));
    }
    store.insert_post(EntityId::new(EMPTY_POST));
    store.insert_post(EntityId::new(BUSY_POST));
    store.set_counters(EntityId::new(BUSY_POST), PostCounters::new(5, 2));
    store
}

/// Toggle request body
#[derive(Debug, Serialize)]
pub struct ToggleBody {
    pub user_id: String,
    pub kind: String,
}

impl ToggleBody {
    pub fn like(user_id: i64) -> Self {
        Self::new(user_id, "like")
    }

    pub fn dislike(user_id: i64) -> Self {
        Self::new(user_id, "dislike")
    }

    pub fn new(user_id: i64, kind: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Batch lookup body
#[derive(Debug, Serialize)]
pub struct LookupBody {
    pub post_ids: Vec<String>,
}

impl LookupBody {
    pub fn of(post_ids: &[i64]) -> Self {
        Self {
            post_ids: post_ids.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Toggle response
#[derive(Debug, Deserialize)]
pub struct ToggleResult {
    pub post_id: String,
    pub user_id: String,
    pub state: String,
    pub like_count: i64,
    pub dislike_count: i64,
    pub changed: bool,
    pub attempts: u32,
}

/// Counters response
#[derive(Debug, Deserialize)]
pub struct Counters {
    pub post_id: String,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Current reaction of one user on one post
#[derive(Debug, Deserialize)]
pub struct UserState {
    pub post_id: String,
    pub user_id: String,
    pub state: String,
}

/// Page of reactors
#[derive(Debug, Deserialize)]
pub struct Reactors {
    pub post_id: String,
    pub kind: String,
    pub user_ids: Vec<String>,
    pub next_cursor: Option<String>,
}

/// Page of a user's reacted posts
#[derive(Debug, Deserialize)]
pub struct UserPosts {
    pub user_id: String,
    pub kind: String,
    pub post_ids: Vec<String>,
    pub next_cursor: Option<String>,
}

/// Batch lookup response
#[derive(Debug, Deserialize)]
pub struct Lookup {
    pub user_id: String,
    pub reactions: Vec<LookupEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LookupEntry {
    pub post_id: String,
    pub state: String,
}

/// Snapshot of a post's counters
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct CounterPair {
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Reconcile response
#[derive(Debug, Deserialize)]
pub struct Reconcile {
    pub post_id: String,
    pub before: CounterPair,
    pub after: CounterPair,
    pub repaired: bool,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorInfo,
}

#[derive(Debug, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}
