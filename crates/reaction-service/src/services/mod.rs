//! Business logic services
//!
//! The toggle coordinator, the read-side query service and the dependency
//! container they share.

pub mod context;
pub mod error;
pub mod query;
pub mod reaction;
pub mod retry;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use query::{Page, PostReaction, ReactionQueryService};
pub use reaction::{ReactionService, ToggleOutcome};
pub use retry::RetryPolicy;
