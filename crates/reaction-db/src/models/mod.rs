//! Database models with SQLx `FromRow` derives

mod post;
mod reaction;

pub use post::PostCountersModel;
pub use reaction::ReactionModel;
