//! Error handling utilities for repositories

use reaction_core::{DomainError, EntityId};
use sqlx::Error as SqlxError;

/// SQLSTATE serialization_failure
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE deadlock_detected
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE check_violation
const CHECK_VIOLATION: &str = "23514";

/// Convert SQLx error to DomainError
///
/// Connectivity problems (pool timeouts, I/O, closed pool) are reported as
/// `StoreUnavailable`; everything else is an internal error.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut
        | SqlxError::PoolClosed
        | SqlxError::Io(_)
        | SqlxError::Tls(_)
        | SqlxError::WorkerCrashed => DomainError::StoreUnavailable(e.to_string()),
        other => DomainError::InternalError(other.to_string()),
    }
}

/// Error mapping for the transition write path
///
/// Serialization failures and deadlocks lose a race, so they surface as a
/// conflict the coordinator may retry. Foreign key violations name the
/// missing side of the edge.
pub fn map_write_error(e: SqlxError, user_id: EntityId, post_id: EntityId) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.code().as_deref() {
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED) => {
                return DomainError::conflict(user_id, post_id);
            }
            Some(CHECK_VIOLATION) => {
                return DomainError::InternalError(format!(
                    "counter projection for post {post_id} is out of sync with its edges"
                ));
            }
            _ => {}
        }

        if db_err.is_foreign_key_violation() {
            let on_user = db_err
                .constraint()
                .is_some_and(|name| name.contains("user_id"));
            return if on_user {
                DomainError::UserNotFound(user_id)
            } else {
                DomainError::PostNotFound(post_id)
            };
        }
    }
    map_db_error(e)
}
