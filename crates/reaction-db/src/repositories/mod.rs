//! Repository implementations
//!
//! PostgreSQL implementations of the store and directory traits defined in
//! reaction-core.

mod directory;
mod error;
mod reaction;

pub use directory::{PgPostDirectory, PgUserDirectory};
pub use error::{map_db_error, map_write_error};
pub use reaction::PgReactionStore;
