//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{PostCounters, ReactionEdge, ReactionKind, ReconcileReport, Transition};
use crate::error::DomainError;
use crate::value_objects::{EntityId, PageRequest};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Store (write side)
// ============================================================================

/// Durable (user, post) -> kind mapping plus the post counter projection.
///
/// Edge mutations are only reachable through [`ReactionStore::apply_transition`]
/// and [`ReactionStore::reconcile`], so an edge never changes without its
/// counters changing in the same atomic unit.
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Current edge for the pair, read from the primary
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>>;

    /// Apply a transition atomically.
    ///
    /// The edge mutation is conditional on the stored edge still matching
    /// `transition.from`; otherwise nothing is written and
    /// `DomainError::ReactionConflict` is returned. Counter deltas are applied
    /// as in-place increments. Returns the post counters after commit.
    async fn apply_transition(
        &self,
        user_id: EntityId,
        post_id: EntityId,
        transition: &Transition,
    ) -> RepoResult<PostCounters>;

    /// Stored counters of a post, read from the primary
    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>>;

    /// Recompute a post's counters from its edges and overwrite the projection
    async fn reconcile(&self, post_id: EntityId) -> RepoResult<ReconcileReport>;

    /// Cheap connectivity check
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Reaction Reader (query side)
// ============================================================================

/// Read-only access to edges and counters. May be served from a replica.
#[async_trait]
pub trait ReactionReader: Send + Sync {
    /// Edge for the pair, if any
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>>;

    /// Edges `user_id` holds on any of `post_ids`
    async fn find_for_posts(
        &self,
        user_id: EntityId,
        post_ids: &[EntityId],
    ) -> RepoResult<Vec<ReactionEdge>>;

    /// Edges of `kind` on a post, ordered by (created_at, user_id)
    async fn find_by_post(
        &self,
        post_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>>;

    /// Edges of `kind` held by a user, ordered by (created_at, post_id)
    async fn find_by_user(
        &self,
        user_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>>;

    /// Stored counters of a post, `None` when the post does not exist
    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>>;
}

// ============================================================================
// External collaborators
// ============================================================================

/// Post collaborator - owns post creation and deletion
#[async_trait]
pub trait PostDirectory: Send + Sync {
    async fn exists(&self, post_id: EntityId) -> RepoResult<bool>;
}

/// User collaborator - used for validation only
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn exists(&self, user_id: EntityId) -> RepoResult<bool>;
}
