//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, reactions};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(user_routes())
}

/// Reactions addressed by post
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/:post_id/reactions", get(reactions::get_counters))
        .route(
            "/posts/:post_id/reactions/toggle",
            post(reactions::toggle_reaction),
        )
        .route(
            "/posts/:post_id/reactions/reconcile",
            post(reactions::reconcile_counters),
        )
        .route(
            "/posts/:post_id/reactions/users/:user_id",
            get(reactions::get_user_reaction),
        )
        .route("/posts/:post_id/reactions/:kind", get(reactions::get_reactors))
}

/// Reactions addressed by user
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/reactions/lookup",
            post(reactions::lookup_reactions),
        )
        .route(
            "/users/:user_id/reactions/:kind",
            get(reactions::get_user_reactions),
        )
}
