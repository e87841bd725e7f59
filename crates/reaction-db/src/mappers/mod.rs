//! Entity <-> Model mappers

mod post;
mod reaction;

pub use reaction::{edges_from_models, kind_from_column};
