//! # reaction-db
//!
//! Storage layer implementing the reaction store traits.
//!
//! ## Overview
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity <-> Model mappers
//! - [`PgReactionStore`]: conditional edge writes plus in-place counter
//!   deltas inside one transaction, with an optional read replica
//! - [`MemoryReactionStore`]: an in-process store with the same semantics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reaction_db::{create_pool, PgReactionStore, PoolConfig};
//!
//! async fn example(config: &reaction_common::DatabaseConfig) -> Result<(), sqlx::Error> {
//!     let pool = create_pool(&PoolConfig::primary(config)).await?;
//!     let store = PgReactionStore::new(pool);
//!
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryReactionStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgPostDirectory, PgReactionStore, PgUserDirectory};
