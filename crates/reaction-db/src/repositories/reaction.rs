//! PostgreSQL implementation of the reaction store and reader

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use reaction_core::{
    DomainError, EdgeChange, EntityId, PageRequest, PostCounters, ReactionEdge, ReactionKind,
    ReactionReader, ReactionStore, ReconcileReport, RepoResult, Transition,
};

use crate::mappers::edges_from_models;
use crate::models::{PostCountersModel, ReactionModel};

use super::error::{map_db_error, map_write_error};

/// PostgreSQL reaction store
///
/// Writes always go to `pool`. Reads through [`ReactionReader`] go to
/// `read_pool`, which is the primary unless a replica was supplied.
#[derive(Clone)]
pub struct PgReactionStore {
    pool: PgPool,
    read_pool: PgPool,
}

impl PgReactionStore {
    /// Create a store that reads and writes through the same pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            read_pool: pool.clone(),
            pool,
        }
    }

    /// Route reader queries to a replica
    #[must_use]
    pub fn with_read_pool(mut self, read_pool: PgPool) -> Self {
        self.read_pool = read_pool;
        self
    }

    async fn fetch_edge(
        pool: &PgPool,
        user_id: EntityId,
        post_id: EntityId,
    ) -> RepoResult<Option<ReactionEdge>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, kind, created_at
            FROM post_reactions
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(post_id.into_inner())
        .fetch_optional(pool)
        .await
        .map_err(map_db_error)?;

        result.map(ReactionEdge::try_from).transpose()
    }

    async fn fetch_counters(pool: &PgPool, post_id: EntityId) -> RepoResult<Option<PostCounters>> {
        let result = sqlx::query_as::<_, PostCountersModel>(
            "SELECT like_count, dislike_count FROM posts WHERE id = $1",
        )
        .bind(post_id.into_inner())
        .fetch_optional(pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PostCounters::from))
    }

    /// Conditional edge write. Returns the number of rows touched; zero means
    /// the stored edge no longer matches the expected kind.
    async fn write_edge(
        tx: &mut Transaction<'_, Postgres>,
        user_id: EntityId,
        post_id: EntityId,
        change: EdgeChange,
    ) -> Result<u64, sqlx::Error> {
        let result = match change {
            EdgeChange::Create(kind) => {
                sqlx::query(
                    r#"
                    INSERT INTO post_reactions (user_id, post_id, kind, created_at)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (user_id, post_id) DO NOTHING
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(post_id.into_inner())
                .bind(kind.as_str())
                .bind(Utc::now())
                .execute(&mut **tx)
                .await?
            }
            EdgeChange::Remove(kind) => {
                sqlx::query(
                    r#"
                    DELETE FROM post_reactions
                    WHERE user_id = $1 AND post_id = $2 AND kind = $3
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(post_id.into_inner())
                .bind(kind.as_str())
                .execute(&mut **tx)
                .await?
            }
            EdgeChange::Replace { from, to } => {
                sqlx::query(
                    r#"
                    UPDATE post_reactions
                    SET kind = $4, created_at = $5
                    WHERE user_id = $1 AND post_id = $2 AND kind = $3
                    "#,
                )
                .bind(user_id.into_inner())
                .bind(post_id.into_inner())
                .bind(from.as_str())
                .bind(to.as_str())
                .bind(Utc::now())
                .execute(&mut **tx)
                .await?
            }
        };

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ReactionStore for PgReactionStore {
    #[instrument(skip(self))]
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>> {
        Self::fetch_edge(&self.pool, user_id, post_id).await
    }

    #[instrument(skip(self))]
    async fn apply_transition(
        &self,
        user_id: EntityId,
        post_id: EntityId,
        transition: &Transition,
    ) -> RepoResult<PostCounters> {
        let write_err = |e| map_write_error(e, user_id, post_id);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let touched = Self::write_edge(&mut tx, user_id, post_id, transition.edge_change())
            .await
            .map_err(write_err)?;
        if touched == 0 {
            debug!(user_id = %user_id, post_id = %post_id, "Edge changed underneath transition");
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::conflict(user_id, post_id));
        }

        let delta = transition.delta();
        let counters = sqlx::query_as::<_, PostCountersModel>(
            r#"
            UPDATE posts
            SET like_count = like_count + $2, dislike_count = dislike_count + $3
            WHERE id = $1
            RETURNING like_count, dislike_count
            "#,
        )
        .bind(post_id.into_inner())
        .bind(delta.likes)
        .bind(delta.dislikes)
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_err)?;

        let Some(counters) = counters else {
            tx.rollback().await.map_err(map_db_error)?;
            return Err(DomainError::PostNotFound(post_id));
        };

        tx.commit().await.map_err(write_err)?;

        Ok(counters.into())
    }

    #[instrument(skip(self))]
    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>> {
        Self::fetch_counters(&self.pool, post_id).await
    }

    #[instrument(skip(self))]
    async fn reconcile(&self, post_id: EntityId) -> RepoResult<ReconcileReport> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The row lock orders this against in-flight counter updates
        let before = sqlx::query_as::<_, PostCountersModel>(
            r#"
            SELECT like_count, dislike_count
            FROM posts
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::PostNotFound(post_id))?;

        let tally = sqlx::query_as::<_, PostCountersModel>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE kind = 'like') AS like_count,
                COUNT(*) FILTER (WHERE kind = 'dislike') AS dislike_count
            FROM post_reactions
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("UPDATE posts SET like_count = $2, dislike_count = $3 WHERE id = $1")
            .bind(post_id.into_inner())
            .bind(tally.like_count)
            .bind(tally.dislike_count)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ReconcileReport {
            post_id,
            before: before.into(),
            after: tally.into(),
        })
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

#[async_trait]
impl ReactionReader for PgReactionStore {
    #[instrument(skip(self))]
    async fn find(&self, user_id: EntityId, post_id: EntityId) -> RepoResult<Option<ReactionEdge>> {
        Self::fetch_edge(&self.read_pool, user_id, post_id).await
    }

    #[instrument(skip(self))]
    async fn find_for_posts(
        &self,
        user_id: EntityId,
        post_ids: &[EntityId],
    ) -> RepoResult<Vec<ReactionEdge>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = post_ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, kind, created_at
            FROM post_reactions
            WHERE user_id = $1 AND post_id = ANY($2)
            "#,
        )
        .bind(user_id.into_inner())
        .bind(ids)
        .fetch_all(&self.read_pool)
        .await
        .map_err(map_db_error)?;

        edges_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_post(
        &self,
        post_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, kind, created_at
            FROM post_reactions
            WHERE post_id = $1 AND kind = $2
              AND ($3::timestamptz IS NULL OR (created_at, user_id) > ($3, $4::bigint))
            ORDER BY created_at, user_id
            LIMIT $5
            "#,
        )
        .bind(post_id.into_inner())
        .bind(kind.as_str())
        .bind(page.after.map(|c| c.created_at))
        .bind(page.after.map(|c| c.id.into_inner()))
        .bind(i64::from(page.limit))
        .fetch_all(&self.read_pool)
        .await
        .map_err(map_db_error)?;

        edges_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: EntityId,
        kind: ReactionKind,
        page: PageRequest,
    ) -> RepoResult<Vec<ReactionEdge>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT user_id, post_id, kind, created_at
            FROM post_reactions
            WHERE user_id = $1 AND kind = $2
              AND ($3::timestamptz IS NULL OR (created_at, post_id) > ($3, $4::bigint))
            ORDER BY created_at, post_id
            LIMIT $5
            "#,
        )
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .bind(page.after.map(|c| c.created_at))
        .bind(page.after.map(|c| c.id.into_inner()))
        .bind(i64::from(page.limit))
        .fetch_all(&self.read_pool)
        .await
        .map_err(map_db_error)?;

        edges_from_models(results)
    }

    #[instrument(skip(self))]
    async fn counters(&self, post_id: EntityId) -> RepoResult<Option<PostCounters>> {
        Self::fetch_counters(&self.read_pool, post_id).await
    }
}
