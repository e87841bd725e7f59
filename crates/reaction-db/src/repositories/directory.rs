//! Existence checks against the users and posts tables

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reaction_core::{EntityId, PostDirectory, RepoResult, UserDirectory};

use super::error::map_db_error;

/// PostgreSQL implementation of PostDirectory
#[derive(Clone)]
pub struct PgPostDirectory {
    pool: PgPool,
}

impl PgPostDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostDirectory for PgPostDirectory {
    #[instrument(skip(self))]
    async fn exists(&self, post_id: EntityId) -> RepoResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists.0)
    }
}

/// PostgreSQL implementation of UserDirectory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    #[instrument(skip(self))]
    async fn exists(&self, user_id: EntityId) -> RepoResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists.0)
    }
}
