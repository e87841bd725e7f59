//! # reaction-service
//!
//! Application layer containing the toggle coordinator, reaction queries, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    Page, PostReaction, ReactionQueryService, ReactionService, RetryPolicy, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ToggleOutcome,
};
