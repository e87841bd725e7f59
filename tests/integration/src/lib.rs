//! Integration test utilities for the reaction server
//!
//! Spawns the real Axum application over a seeded in-memory store and
//! drives it through HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
