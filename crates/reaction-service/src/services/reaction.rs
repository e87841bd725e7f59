//! Reaction service
//!
//! The toggle coordinator. A toggle reads the pair's current state, decides a
//! [`Transition`] and hands it to the store, which applies the edge change and
//! the counter deltas atomically and only if the edge is still in the state the
//! decision was based on. A lost race is retried from a fresh read; when the
//! fresh state already is the state this call was trying to reach, a
//! concurrent identical request won and this call reports it unchanged.
//!
//! The toggle deadline bounds reads and backoff. It is checked before every
//! `apply_transition` but never interrupts one: an apply that started runs to
//! its commit or rollback, so the reported outcome always matches the store.

use std::future::Future;

use reaction_core::{
    DomainError, EntityId, PostCounters, ReactionKind, ReactionState, ReconcileReport,
    Transition,
};
use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::retry::RetryPolicy;

/// What a toggle call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    /// State of the pair after the call
    pub state: ReactionState,
    /// Post counters after the commit
    pub counters: PostCounters,
    /// False when a concurrent identical request already produced `state`
    pub changed: bool,
    /// Optimistic attempts used
    pub attempts: u32,
}

/// Identifies one toggle call for deadline checks and logs
#[derive(Debug, Clone, Copy)]
struct ToggleCall {
    user_id: EntityId,
    post_id: EntityId,
    deadline: Instant,
}

impl ToggleCall {
    fn deadline_exceeded(&self) -> DomainError {
        warn!(
            user_id = %self.user_id,
            post_id = %self.post_id,
            "Toggle deadline exceeded"
        );
        DomainError::conflict(self.user_id, self.post_id)
    }

    fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Run a read under the deadline. Reads have no side effects, so
    /// dropping one midway is safe.
    async fn read<T>(&self, fut: impl Future<Output = ServiceResult<T>>) -> ServiceResult<T> {
        match tokio::time::timeout_at(self.deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(self.deadline_exceeded().into()),
        }
    }
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set, switch or clear `user_id`'s reaction to `post_id`
    ///
    /// Fails with `UNKNOWN_POST` / `UNKNOWN_USER` before touching the store,
    /// and with `REACTION_CONFLICT` when the retry budget or the deadline runs
    /// out. A failed call leaves the edge and the counters as they were.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        user_id: EntityId,
        post_id: EntityId,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        let policy = RetryPolicy::from(self.ctx.config());
        let call = ToggleCall {
            user_id,
            post_id,
            deadline: Instant::now() + policy.timeout,
        };

        call.read(self.ensure_participants(user_id, post_id)).await?;
        self.run_toggle(call, kind, policy).await
    }

    /// Recompute a post's counters from its edges
    #[instrument(skip(self))]
    pub async fn reconcile_counters(&self, post_id: EntityId) -> ServiceResult<ReconcileReport> {
        let report = self.ctx.reaction_store().reconcile(post_id).await?;

        if report.repaired() {
            warn!(
                post_id = %post_id,
                stored_likes = report.before.like_count,
                stored_dislikes = report.before.dislike_count,
                like_count = report.after.like_count,
                dislike_count = report.after.dislike_count,
                "Counter drift repaired"
            );
        } else {
            debug!(post_id = %post_id, "Counters already consistent");
        }

        Ok(report)
    }

    async fn ensure_participants(&self, user_id: EntityId, post_id: EntityId) -> ServiceResult<()> {
        if !self.ctx.post_directory().exists(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }
        if !self.ctx.user_directory().exists(user_id).await? {
            return Err(DomainError::UserNotFound(user_id).into());
        }
        Ok(())
    }

    async fn current_state(&self, user_id: EntityId, post_id: EntityId) -> ServiceResult<ReactionState> {
        let edge = self.ctx.reaction_store().find(user_id, post_id).await?;
        Ok(edge.map_or(ReactionState::None, |edge| edge.state()))
    }

    async fn stored_counters(&self, post_id: EntityId) -> ServiceResult<PostCounters> {
        self.ctx
            .reaction_store()
            .counters(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    async fn run_toggle(
        &self,
        call: ToggleCall,
        kind: ReactionKind,
        policy: RetryPolicy,
    ) -> ServiceResult<ToggleOutcome> {
        let ToggleCall { user_id, post_id, .. } = call;
        let store = self.ctx.reaction_store();
        let max_attempts = policy.max_attempts;
        let mut current = call.read(self.current_state(user_id, post_id)).await?;

        for attempt in 1..=max_attempts {
            if call.expired() {
                return Err(call.deadline_exceeded().into());
            }
            let transition = Transition::compute(current, kind);

            match store.apply_transition(user_id, post_id, &transition).await {
                Ok(counters) => {
                    info!(
                        user_id = %user_id,
                        post_id = %post_id,
                        from = %transition.from,
                        to = %transition.to,
                        attempt,
                        "Reaction toggled"
                    );
                    return Ok(ToggleOutcome {
                        state: transition.to,
                        counters,
                        changed: true,
                        attempts: attempt,
                    });
                }
                Err(e) if e.is_retryable() => {
                    let fresh = call.read(self.current_state(user_id, post_id)).await?;
                    if fresh == transition.to {
                        let counters = call.read(self.stored_counters(post_id)).await?;
                        debug!(
                            user_id = %user_id,
                            post_id = %post_id,
                            state = %fresh,
                            attempt,
                            "Concurrent toggle already reached target"
                        );
                        return Ok(ToggleOutcome {
                            state: fresh,
                            counters,
                            changed: false,
                            attempts: attempt,
                        });
                    }

                    debug!(
                        user_id = %user_id,
                        post_id = %post_id,
                        attempt,
                        "Reaction changed concurrently, retrying"
                    );
                    current = fresh;
                    if policy.allows_retry_after(attempt) {
                        let wake = Instant::now() + policy.delay(attempt);
                        tokio::time::sleep_until(wake.min(call.deadline)).await;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            user_id = %user_id,
            post_id = %post_id,
            max_attempts,
            "Toggle gave up under contention"
        );
        Err(DomainError::conflict(user_id, post_id).into())
    }
}
