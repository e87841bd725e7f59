//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{PostDirectory, ReactionReader, ReactionStore, RepoResult, UserDirectory};
