//! Cursor-based paging over reaction edges
//!
//! Listings are ordered by edge creation time, ties broken by the listed id.
//! The cursor is the (created_at, id) of the last item of the previous page,
//! rendered as `"{micros}.{id}"`.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::EntityId;

/// Position in an ordered edge listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageCursor {
    pub created_at: DateTime<Utc>,
    pub id: EntityId,
}

impl PageCursor {
    pub fn new(created_at: DateTime<Utc>, id: EntityId) -> Self {
        Self { created_at, id }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.created_at.timestamp_micros(), self.id)
    }
}

/// Error when parsing a cursor from a query string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid page cursor")]
pub struct PageCursorParseError;

impl FromStr for PageCursor {
    type Err = PageCursorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (micros, id) = s.split_once('.').ok_or(PageCursorParseError)?;
        let micros: i64 = micros.parse().map_err(|_| PageCursorParseError)?;
        let created_at = DateTime::from_timestamp_micros(micros).ok_or(PageCursorParseError)?;
        let id = EntityId::parse(id).map_err(|_| PageCursorParseError)?;
        Ok(Self { created_at, id })
    }
}

/// A page request against an edge listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub after: Option<PageCursor>,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 50;

    pub fn first(limit: u32) -> Self {
        Self { limit, after: None }
    }

    /// Clamp the limit into `1..=max`
    pub fn clamped(self, max: u32) -> Self {
        Self {
            limit: self.limit.clamp(1, max.max(1)),
            after: self.after,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(Self::DEFAULT_LIMIT)
    }
}
