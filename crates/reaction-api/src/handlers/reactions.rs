//! Reaction handlers
//!
//! Endpoints for toggling reactions and reading reaction state.

use axum::{
    extract::{Path, State},
    Json,
};
use reaction_service::dto::{
    CountersResponse, ReactionLookupRequest, ReactionLookupResponse, ReactionStateResponse,
    ReactorsResponse, ReconcileResponse, ToggleReactionRequest, ToggleReactionResponse,
    UserReactionsResponse,
};
use reaction_service::{ReactionQueryService, ReactionService};

use crate::extractors::{
    Pagination, PostIdPath, PostKindPath, PostUserPath, UserIdPath, UserKindPath, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle a reaction
///
/// POST /posts/{post_id}/reactions/toggle
pub async fn toggle_reaction(
    State(state): State<AppState>,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<ToggleReactionRequest>,
) -> ApiResult<Json<ToggleReactionResponse>> {
    let post_id = path.post_id()?;
    let kind = request.reaction_kind()?;

    let service = ReactionService::new(state.service_context());
    let outcome = service
        .toggle_reaction(request.user_id, post_id, kind)
        .await?;

    Ok(Json(ToggleReactionResponse::new(
        request.user_id,
        post_id,
        &outcome,
    )))
}

/// Get post counters
///
/// GET /posts/{post_id}/reactions
pub async fn get_counters(
    State(state): State<AppState>,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<CountersResponse>> {
    let post_id = path.post_id()?;

    let service = ReactionQueryService::new(state.service_context());
    let counters = service.counters(post_id).await?;

    Ok(Json(CountersResponse::new(post_id, counters)))
}

/// Get a user's current reaction to a post
///
/// GET /posts/{post_id}/reactions/users/{user_id}
pub async fn get_user_reaction(
    State(state): State<AppState>,
    Path(path): Path<PostUserPath>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let post_id = path.post_id()?;
    let user_id = path.user_id()?;

    let service = ReactionQueryService::new(state.service_context());
    let reaction = service.current_reaction(user_id, post_id).await?;

    Ok(Json(ReactionStateResponse {
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        state: reaction,
    }))
}

/// List users who reacted to a post with a kind
///
/// GET /posts/{post_id}/reactions/{kind}
pub async fn get_reactors(
    State(state): State<AppState>,
    Path(path): Path<PostKindPath>,
    Pagination(page): Pagination,
) -> ApiResult<Json<ReactorsResponse>> {
    let post_id = path.post_id()?;
    let kind = path.kind()?;

    let service = ReactionQueryService::new(state.service_context());
    let reactors = service.reactors_of(post_id, kind, page).await?;

    Ok(Json(ReactorsResponse::new(post_id, kind, &reactors)))
}

/// List posts a user reacted to with a kind
///
/// GET /users/{user_id}/reactions/{kind}
pub async fn get_user_reactions(
    State(state): State<AppState>,
    Path(path): Path<UserKindPath>,
    Pagination(page): Pagination,
) -> ApiResult<Json<UserReactionsResponse>> {
    let user_id = path.user_id()?;
    let kind = path.kind()?;

    let service = ReactionQueryService::new(state.service_context());
    let posts = service.reactions_of(user_id, kind, page).await?;

    Ok(Json(UserReactionsResponse::new(user_id, kind, &posts)))
}

/// Look up a user's reactions across a batch of posts
///
/// POST /users/{user_id}/reactions/lookup
pub async fn lookup_reactions(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<ReactionLookupRequest>,
) -> ApiResult<Json<ReactionLookupResponse>> {
    let user_id = path.user_id()?;

    let service = ReactionQueryService::new(state.service_context());
    let reactions = service.reactions_for(user_id, &request.post_ids).await?;

    Ok(Json(ReactionLookupResponse::new(user_id, &reactions)))
}

/// Recompute a post's counters from its edges
///
/// POST /posts/{post_id}/reactions/reconcile
pub async fn reconcile_counters(
    State(state): State<AppState>,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ReconcileResponse>> {
    let post_id = path.post_id()?;

    let service = ReactionService::new(state.service_context());
    let report = service.reconcile_counters(post_id).await?;

    Ok(Json(ReconcileResponse::from(report)))
}
