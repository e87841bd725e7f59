//! In-process reaction store
//!
//! Backs local development and tests. Edges, counters and the user/post
//! directories live behind one `parking_lot::RwLock`; every transition runs
//! inside a single write critical section, which gives it the same
//! all-or-nothing behaviour as the PostgreSQL transaction.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use reaction_core::{
    DomainError, EdgeChange, EntityId, PageCursor, PageRequest, PostCounters, PostDirectory,
    ReactionEdge, ReactionKind, ReactionReader, ReactionStore, ReconcileReport, RepoResult,
    Transition, UserDirectory,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: HashSet<EntityId>,
    posts: HashMap<EntityId, PostCounters>,
    /// Keyed by (user_id, post_id)
    edges: HashMap<(EntityId, EntityId), ReactionEdge>,
}

impl MemoryState {
    fn tally(&self, post_id: EntityId) -> PostCounters {
        self.edges
            .values()
            .filter(|edge| edge.post_id == post_id)
            .fold(PostCounters::default(), |mut acc, edge| {
                match edge.kind {
                    ReactionKind::Like => acc.like_count += 1,
                    ReactionKind::Dislike => acc.dislike_count += 1,
                }
                acc
            })
    }
}

/// Shared in-memory store; clones see the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryReactionStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryReactionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    pub fn insert_user(&self, user_id: EntityId) {
        self.state.write().users.insert(user_id);
    }

    /// Register a post with zeroed counters. Existing counters are kept.
    pub fn insert_post(&self, post_id: EntityId) {
        self.state.write().posts.entry(post_id).or_default();
    }

    /// Overwrite a post's stored counters without touching its edges
    pub fn set_counters(&self, post_id: EntityId, counters: PostCounters) {
        self.state.write().posts.insert(post_id, counters);
    }

    /// Counters derived from the edges, independent of the stored projection
    #[must_use]
    pub fn edge_tally(&self, post_id: EntityId) -> PostCounters {
        self.state.read().tally(post_id)
    }

    fn page(
        mut edges: Vec<ReactionEdge>,
        page: PageRequest,
        key: impl Fn(&ReactionEdge) -> PageCursor,
    ) -> Vec<ReactionEdge> {
        edges.sort_by_key(&key);
        edges
            .into_iter()
            .filter(|edge| page.after.is_none_or(|after| key(edge) > after))
            .take(page.limit as usize)
            .collect()
    }
}

#[async_trait]
impl ReactionStore for MemoryReactionStore {
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>> {
        Ok(self.state.read().edges.get(&(user_id, post_id)).cloned())
    }

    #[instrument(skip(self))]
    async fn apply_transition(
        &self,
        user_id: EntityId,
        post_id: EntityId,
        transition: &Transition,
    ) -> RepoResult<PostCounters> {
        let mut state = self.state.write();

        let Some(current) = state.posts.get(&post_id).copied() else {
            return Err(DomainError::PostNotFound(post_id));
        };
        if !state.users.contains(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }

        let change = transition.edge_change();
        let key = (user_id, post_id);
        let stored = state.edges.get(&key).map(|edge| edge.kind);
        if stored != change.expected() {
            debug!(user_id = %user_id, post_id = %post_id, "Edge changed underneath transition");
            return Err(DomainError::conflict(user_id, post_id));
        }

        let counters = current.checked_apply(transition.delta()).ok_or_else(|| {
            DomainError::InternalError(format!(
                "counter projection for post {post_id} is out of sync with its edges"
            ))
        })?;

        match change {
            EdgeChange::Create(kind) | EdgeChange::Replace { to: kind, .. } => {
                state
                    .edges
                    .insert(key, ReactionEdge::new(user_id, post_id, kind));
            }
            EdgeChange::Remove(_) => {
                state.edges.remove(&key);
            }
        }
        state.posts.insert(post_id, counters);

        Ok(counters)
    }

    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>> {
        Ok(self.state.read().posts.get(&post_id).copied())
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, post_id: EntityId) -> RepoResult<ReconcileReport> {
        let mut state = self.state.write();

        let before = state
            .posts
            .get(&post_id)
            .copied()
            .ok_or(DomainError::PostNotFound(post_id))?;
        let after = state.tally(post_id);
        state.posts.insert(post_id, after);

        Ok(ReconcileReport {
            post_id,
            before,
            after,
        })
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ReactionReader for MemoryReactionStore {
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>> {
        Ok(self.state.read().edges.get(&(user_id, post_id)).cloned())
    }

    async fn find_for_posts(
        &self,
        user_id: EntityId,
        post_ids: &[EntityId],
    ) -> RepoResult<Vec<ReactionEdge>> {
        let state = self.state.read();
        Ok(post_ids
            .iter()
            .filter_map(|post_id| state.edges.get(&(user_id, *post_id)).cloned())
            .collect())
    }

    async fn find_by_post(
        &self,
        post_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>> {
        let edges = self
            .state
            .read()
            .edges
            .values()
            .filter(|edge| edge.post_id == post_id && edge.is_kind(kind))
            .cloned()
            .collect();

        Ok(Self::page(edges, page, |edge| {
            PageCursor::new(edge.created_at, edge.user_id)
        }))
    }

    async fn find_by_user(
        &self,
        user_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>> {
        let edges = self
            .state
            .read()
            .edges
            .values()
            .filter(|edge| edge.user_id == user_id && edge.is_kind(kind))
            .cloned()
            .collect();

        Ok(Self::page(edges, page, |edge| {
            PageCursor::new(edge.created_at, edge.post_id)
        }))
    }

    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>> {
        Ok(self.state.read().posts.get(&post_id).copied())
    }
}

#[async_trait]
impl PostDirectory for MemoryReactionStore {
    async fn exists(&self, post_id: EntityId) -> RepoResult<bool> {
        Ok(self.state.read().posts.contains_key(&post_id))
    }
}

#[async_trait]
impl UserDirectory for MemoryReactionStore {
    async fn exists(&self, user_id: EntityId) -> RepoResult<bool> {
        Ok(self.state.read().users.contains(&user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reaction_core::ReactionState;

    fn id(raw: i64) -> EntityId {
        EntityId::new(raw)
    }

    fn seeded() -> MemoryReactionStore {
        let store = MemoryReactionStore::new();
        for user in 1..=3 {
            store.insert_user(id(user));
        }
        store.insert_post(id(100));
        store
    }

    async fn toggle(store: &MemoryReactionStore, user: i64, kind: ReactionKind) -> RepoResult<PostCounters> {
        let current = ReactionStore::find(store, id(user), id(100))
            .await?
            .map_or(ReactionState::None, |edge| edge.state());
        let transition = Transition::compute(current, kind);
        store.apply_transition(id(user), id(100), &transition).await
    }

    #[tokio::test]
    async fn test_transition_updates_edge_and_counters() {
        let store = seeded();

        let counters = toggle(&store, 1, ReactionKind::Like).await.unwrap();
        assert_eq!(counters, PostCounters::new(1, 0));

        let counters = toggle(&store, 1, ReactionKind::Dislike).await.unwrap();
        assert_eq!(counters, PostCounters::new(0, 1));
        let edge = ReactionStore::find(&store, id(1), id(100)).await.unwrap().unwrap();
        assert_eq!(edge.kind, ReactionKind::Dislike);

        let counters = toggle(&store, 1, ReactionKind::Dislike).await.unwrap();
        assert_eq!(counters, PostCounters::new(0, 0));
        assert!(ReactionStore::find(&store, id(1), id(100)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stale_transition_is_rejected_without_writes() {
        let store = seeded();
        let stale = Transition::compute(ReactionState::None, ReactionKind::Like);

        store.apply_transition(id(1), id(100), &stale).await.unwrap();
        let err = store.apply_transition(id(1), id(100), &stale).await.unwrap_err();

        assert!(err.is_conflict());
        assert_eq!(
            ReactionReader::counters(&store, id(100)).await.unwrap(),
            Some(PostCounters::new(1, 0))
        );
    }

    #[tokio::test]
    async fn test_unknown_post_and_user() {
        let store = seeded();
        let like = Transition::compute(ReactionState::None, ReactionKind::Like);

        let err = store.apply_transition(id(1), id(999), &like).await.unwrap_err();
        assert!(matches!(err, DomainError::PostNotFound(_)));

        let err = store.apply_transition(id(42), id(100), &like).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(_)));
        assert_eq!(store.edge_tally(id(100)), PostCounters::default());
    }

    #[tokio::test]
    async fn test_reconcile_repairs_drift() {
        let store = seeded();
        toggle(&store, 1, ReactionKind::Like).await.unwrap();
        toggle(&store, 2, ReactionKind::Dislike).await.unwrap();
        store.set_counters(id(100), PostCounters::new(9, 9));

        let report = store.reconcile(id(100)).await.unwrap();
        assert!(report.repaired());
        assert_eq!(report.before, PostCounters::new(9, 9));
        assert_eq!(report.after, PostCounters::new(1, 1));

        let report = store.reconcile(id(100)).await.unwrap();
        assert!(!report.repaired());
    }

    #[tokio::test]
    async fn test_find_by_post_pages_in_order() {
        let store = seeded();
        for user in 1..=3 {
            toggle(&store, user, ReactionKind::Like).await.unwrap();
        }

        let first = store
            .find_by_post(id(100), ReactionKind::Like, PageRequest::first(2))
            .await
            .unwrap();
        assert_eq!(first.len(), 2);

        let last = first.last().unwrap();
        let next = PageRequest {
            limit: 2,
            after: Some(PageCursor::new(last.created_at, last.user_id)),
        };
        let second = store
            .find_by_post(id(100), ReactionKind::Like, next)
            .await
            .unwrap();
        assert_eq!(second.len(), 1);

        let mut seen: Vec<_> = first.iter().chain(&second).map(|e| e.user_id).collect();
        seen.sort();
        assert_eq!(seen, vec![id(1), id(2), id(3)]);
    }

    #[tokio::test]
    async fn test_find_for_posts_skips_missing() {
        let store = seeded();
        store.insert_post(id(101));
        toggle(&store, 1, ReactionKind::Like).await.unwrap();

        let edges = store
            .find_for_posts(id(1), &[id(100), id(101), id(102)])
            .await
            .unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].post_id, id(100));
    }
}
