//! # reaction-core
//!
//! Domain layer for post reactions: edge and counter types, the like/dislike
//! toggle state machine, domain errors, and the store ports.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CounterDelta, EdgeChange, PostCounters, ReactionEdge, ReactionKind, ReactionState,
    ReconcileReport, Transition,
};
pub use error::DomainError;
pub use traits::{PostDirectory, ReactionReader, ReactionStore, RepoResult, UserDirectory};
pub use value_objects::{EntityId, EntityIdParseError, PageCursor, PageCursorParseError, PageRequest};
