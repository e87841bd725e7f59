//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from service results to response DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{ReactionLookupRequest, ToggleReactionRequest};

pub use responses::{
    CountersResponse, HealthChecks, HealthResponse, PostReactionResponse, ReactionLookupResponse,
    ReactionStateResponse, ReactorsResponse, ReadinessResponse, ReconcileResponse,
    ToggleReactionResponse, UserReactionsResponse,
};
