//! Domain entities - core business objects

mod post;
mod reaction;
mod transition;

pub use post::{CounterDelta, PostCounters, ReconcileReport};
pub use reaction::{ReactionEdge, ReactionKind, ReactionState};
pub use transition::{EdgeChange, Transition};
