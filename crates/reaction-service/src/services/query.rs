//! Reaction queries
//!
//! Read-side helpers used to render reaction affordances and reactor lists.
//! Everything here goes through the [`ReactionReader`](reaction_core::ReactionReader),
//! which may lag the primary; results are advisory and never gate a write.

use reaction_core::{
    DomainError, EntityId, PageCursor, PageRequest, PostCounters, ReactionEdge, ReactionKind,
    ReactionState,
};
use serde::Serialize;
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// One page of ids plus the cursor for the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Set when the page came back full; there may be more behind it
    pub next_cursor: Option<PageCursor>,
}

impl Page<EntityId> {
    fn from_edges(edges: &[ReactionEdge], limit: u32, id_of: impl Fn(&ReactionEdge) -> EntityId) -> Self {
        let next_cursor = if edges.len() >= limit as usize {
            edges
                .last()
                .map(|edge| PageCursor::new(edge.created_at, id_of(edge)))
        } else {
            None
        };

        Self {
            items: edges.iter().map(&id_of).collect(),
            next_cursor,
        }
    }
}

/// State of one post in a batch lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostReaction {
    pub post_id: EntityId,
    pub state: ReactionState,
}

/// Reaction query service
pub struct ReactionQueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionQueryService<'a> {
    /// Create a new ReactionQueryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current reaction of a user to a post; no edge means `NONE`
    #[instrument(skip(self))]
    pub async fn current_reaction(
        &self,
        user_id: EntityId,
        post_id: EntityId,
    ) -> ServiceResult<ReactionState> {
        let edge = self.ctx.reaction_reader().find(user_id, post_id).await?;
        Ok(edge.map_or(ReactionState::None, |edge| edge.state()))
    }

    /// Users holding a `kind` edge on a post, oldest first
    #[instrument(skip(self))]
    pub async fn reactors_of(
        &self,
        post_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> ServiceResult<Page<EntityId>> {
        if !self.ctx.post_directory().exists(post_id).await? {
            return Err(DomainError::PostNotFound(post_id).into());
        }

        let page = page.clamped(self.ctx.config().max_page_size);
        let edges = self
            .ctx
            .reaction_reader()
            .find_by_post(post_id, kind, page)
            .await?;

        Ok(Page::from_edges(&edges, page.limit, |edge| edge.user_id))
    }

    /// Posts a user holds a `kind` edge on, oldest first
    #[instrument(skip(self))]
    pub async fn reactions_of(
        &self,
        user_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> ServiceResult<Page<EntityId>> {
        if !self.ctx.user_directory().exists(user_id).await? {
            return Err(DomainError::UserNotFound(user_id).into());
        }

        let page = page.clamped(self.ctx.config().max_page_size);
        let edges = self
            .ctx
            .reaction_reader()
            .find_by_user(user_id, kind, page)
            .await?;

        Ok(Page::from_edges(&edges, page.limit, |edge| edge.post_id))
    }

    /// States of a user across a batch of posts, in request order
    ///
    /// Duplicate ids are answered once per occurrence. Posts without an edge,
    /// unknown posts included, map to `NONE`.
    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    pub async fn reactions_for(
        &self,
        user_id: EntityId,
        post_ids: &[EntityId],
    ) -> ServiceResult<Vec<PostReaction>> {
        let max = self.ctx.config().max_page_size as usize;
        if post_ids.len() > max {
            return Err(ServiceError::validation(format!(
                "at most {max} post ids per lookup"
            )));
        }

        let edges = self
            .ctx
            .reaction_reader()
            .find_for_posts(user_id, post_ids)
            .await?;

        Ok(post_ids
            .iter()
            .map(|&post_id| PostReaction {
                post_id,
                state: edges
                    .iter()
                    .find(|edge| edge.post_id == post_id)
                    .map_or(ReactionState::None, ReactionEdge::state),
            })
            .collect())
    }

    /// Stored counters of a post
    #[instrument(skip(self))]
    pub async fn counters(&self, post_id: EntityId) -> ServiceResult<PostCounters> {
        self.ctx
            .reaction_reader()
            .counters(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }
}
