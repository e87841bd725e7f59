//! Post counter database model

use sqlx::FromRow;

/// Counter columns of the posts table, also used for edge tallies
#[derive(Debug, Clone, Copy, FromRow)]
pub struct PostCountersModel {
    pub like_count: i64,
    pub dislike_count: i64,
}
