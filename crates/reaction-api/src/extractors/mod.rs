//! Axum extractors for request handling
//!
//! Custom extractors for path parsing, validation, and pagination.

mod pagination;
mod path;
mod validated;

pub use pagination::{Pagination, PaginationParams};
pub use path::{PostIdPath, PostKindPath, PostUserPath, UserIdPath, UserKindPath};
pub use validated::ValidatedJson;
