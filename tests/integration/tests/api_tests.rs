//! API Integration Tests
//!
//! Each test spawns the full Axum application over a seeded in-memory store
//! and talks to it over HTTP.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer};
use reaction_common::AppConfig;
use reaction_core::{EntityId, PostCounters};
use reqwest::StatusCode;

async fn counters(server: &TestServer, post_id: i64) -> Counters {
    let response = server
        .get(&format!("/api/v1/posts/{post_id}/reactions"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn toggle_ok(server: &TestServer, post_id: i64, body: &ToggleBody) -> ToggleResult {
    let response = server.toggle(post_id, body).await.unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_scenario() {
    let server = TestServer::start().await.unwrap();

    let result = toggle_ok(&server, BUSY_POST, &ToggleBody::dislike(1)).await;
    assert_eq!(result.state, "DISLIKED");
    assert_eq!((result.like_count, result.dislike_count), (5, 3));
    assert!(result.changed);

    let result = toggle_ok(&server, BUSY_POST, &ToggleBody::like(1)).await;
    assert_eq!(result.state, "LIKED");
    assert_eq!((result.like_count, result.dislike_count), (6, 2));

    let result = toggle_ok(&server, BUSY_POST, &ToggleBody::like(1)).await;
    assert_eq!(result.state, "NONE");
    assert_eq!((result.like_count, result.dislike_count), (5, 2));
    assert_eq!(result.post_id, BUSY_POST.to_string());
    assert_eq!(result.user_id, "1");
}

#[tokio::test]
async fn test_double_toggle_restores_state() {
    let server = TestServer::start().await.unwrap();

    let first = toggle_ok(&server, EMPTY_POST, &ToggleBody::like(2)).await;
    assert_eq!(first.state, "LIKED");
    assert_eq!(first.like_count, 1);
    assert_eq!(first.attempts, 1);

    let second = toggle_ok(&server, EMPTY_POST, &ToggleBody::like(2)).await;
    assert_eq!(second.state, "NONE");
    assert_eq!((second.like_count, second.dislike_count), (0, 0));

    let response = server
        .get(&format!("/api/v1/posts/{EMPTY_POST}/reactions/users/2"))
        .await
        .unwrap();
    let state: UserState = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.state, "NONE");
}

#[tokio::test]
async fn test_toggle_accepts_numeric_user_id() {
    let server = TestServer::start().await.unwrap();
    let body = serde_json::json!({ "user_id": 3, "kind": "dislike" });

    let response = server.toggle(EMPTY_POST, &body).await.unwrap();
    let result: ToggleResult = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(result.state, "DISLIKED");
    assert_eq!(result.dislike_count, 1);
}

#[tokio::test]
async fn test_toggle_unknown_post() {
    let server = TestServer::start().await.unwrap();

    let response = server.toggle(UNKNOWN_POST, &ToggleBody::like(1)).await.unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();

    assert_eq!(body.error.code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_toggle_unknown_user_leaves_counters() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .toggle(BUSY_POST, &ToggleBody::like(UNKNOWN_USER))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_USER");

    let after = counters(&server, BUSY_POST).await;
    assert_eq!((after.like_count, after.dislike_count), (5, 2));
}

#[tokio::test]
async fn test_toggle_invalid_kind() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .toggle(EMPTY_POST, &ToggleBody::new(1, "love"))
        .await
        .unwrap();
    let body: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body.error.code, "INVALID_REACTION_KIND");
    assert!(!body.error.message.is_empty());
}

#[tokio::test]
async fn test_toggle_malformed_ids() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/posts/not-a-number/reactions/toggle", &ToggleBody::like(1))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let body = serde_json::json!({ "user_id": "-4", "kind": "like" });
    let response = server.toggle(EMPTY_POST, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let body = serde_json::json!({ "kind": "like" });
    let response = server.toggle(EMPTY_POST, &body).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Query Tests
// ============================================================================

#[tokio::test]
async fn test_counters_unknown_post() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get(&format!("/api/v1/posts/{UNKNOWN_POST}/reactions"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reactors_paging() {
    let server = TestServer::start().await.unwrap();
    for user in 1..=5 {
        toggle_ok(&server, EMPTY_POST, &ToggleBody::like(user)).await;
    }
    toggle_ok(&server, EMPTY_POST, &ToggleBody::dislike(6)).await;

    let response = server
        .get(&format!("/api/v1/posts/{EMPTY_POST}/reactions/likes?limit=2"))
        .await
        .unwrap();
    let first: Reactors = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.kind, "like");
    assert_eq!(first.post_id, EMPTY_POST.to_string());
    assert_eq!(first.user_ids, vec!["1", "2"]);
    let cursor = first.next_cursor.expect("full page carries a cursor");

    let mut seen = first.user_ids;
    let mut after = Some(cursor);
    while let Some(cursor) = after {
        let response = server
            .get(&format!(
                "/api/v1/posts/{EMPTY_POST}/reactions/like?limit=2&after={cursor}"
            ))
            .await
            .unwrap();
        let page: Reactors = assert_json(response, StatusCode::OK).await.unwrap();
        seen.extend(page.user_ids);
        after = page.next_cursor;
    }
    assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);

    let response = server
        .get(&format!("/api/v1/posts/{EMPTY_POST}/reactions/dislike"))
        .await
        .unwrap();
    let dislikes: Reactors = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(dislikes.user_ids, vec!["6"]);
    assert!(dislikes.next_cursor.is_none());
}

#[tokio::test]
async fn test_reactors_bad_cursor() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .get(&format!("/api/v1/posts/{EMPTY_POST}/reactions/like?after=garbage"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_user_reactions() {
    let server = TestServer::start().await.unwrap();
    toggle_ok(&server, EMPTY_POST, &ToggleBody::dislike(7)).await;
    toggle_ok(&server, BUSY_POST, &ToggleBody::dislike(7)).await;

    let response = server.get("/api/v1/users/7/reactions/dislike").await.unwrap();
    let posts: UserPosts = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(posts.user_id, "7");
    assert_eq!(posts.kind, "dislike");
    assert_eq!(
        posts.post_ids,
        vec![EMPTY_POST.to_string(), BUSY_POST.to_string()]
    );

    let response = server
        .get(&format!("/api/v1/users/{UNKNOWN_USER}/reactions/like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_lookup_in_request_order() {
    let server = TestServer::start().await.unwrap();
    toggle_ok(&server, BUSY_POST, &ToggleBody::like(8)).await;

    let response = server
        .post(
            "/api/v1/users/8/reactions/lookup",
            &LookupBody::of(&[EMPTY_POST, BUSY_POST, UNKNOWN_POST]),
        )
        .await
        .unwrap();
    let lookup: Lookup = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(lookup.user_id, "8");
    let states: Vec<(&str, &str)> = lookup
        .reactions
        .iter()
        .map(|r| (r.post_id.as_str(), r.state.as_str()))
        .collect();
    assert_eq!(
        states,
        vec![("100", "NONE"), ("200", "LIKED"), ("9999", "NONE")]
    );
}

#[tokio::test]
async fn test_lookup_rejects_empty_batch() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/api/v1/users/8/reactions/lookup", &LookupBody::of(&[]))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Reconcile Tests
// ============================================================================

#[tokio::test]
async fn test_reconcile_repairs_drifted_projection() {
    let server = TestServer::start().await.unwrap();
    toggle_ok(&server, BUSY_POST, &ToggleBody::like(9)).await;

    // Seeded counters (5, 2) carry no backing edges
    let response = server
        .post_empty(&format!("/api/v1/posts/{BUSY_POST}/reactions/reconcile"))
        .await
        .unwrap();
    let report: Reconcile = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(report.repaired);
    assert_eq!(report.post_id, BUSY_POST.to_string());
    assert_eq!(
        report.before,
        CounterPair {
            like_count: 6,
            dislike_count: 2
        }
    );
    assert_eq!(
        report.after,
        CounterPair {
            like_count: 1,
            dislike_count: 0
        }
    );

    let after = counters(&server, BUSY_POST).await;
    assert_eq!((after.like_count, after.dislike_count), (1, 0));
}

#[tokio::test]
async fn test_reconcile_consistent_post_is_noop() {
    let server = TestServer::start().await.unwrap();
    toggle_ok(&server, EMPTY_POST, &ToggleBody::like(10)).await;

    let response = server
        .post_empty(&format!("/api/v1/posts/{EMPTY_POST}/reactions/reconcile"))
        .await
        .unwrap();
    let report: Reconcile = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(!report.repaired);
    assert_eq!(report.before, report.after);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_likes_keep_projection_consistent() {
    let server = TestServer::start().await.unwrap();
    let body = ToggleBody::like(11);

    let responses = join_all((0..8).map(|_| server.toggle(EMPTY_POST, &body))).await;
    for response in responses {
        let response = response.unwrap();
        assert!(
            response.status() == StatusCode::OK || response.status() == StatusCode::CONFLICT,
            "unexpected status {}",
            response.status()
        );
    }

    let stored = counters(&server, EMPTY_POST).await;
    assert!((0..=1).contains(&stored.like_count));
    assert_eq!(stored.dislike_count, 0);
    assert_eq!(
        server.store.edge_tally(EntityId::new(EMPTY_POST)),
        PostCounters::new(stored.like_count, stored.dislike_count)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_users_counters_match_edges() {
    let server = TestServer::start().await.unwrap();

    let bodies: Vec<ToggleBody> = (1..=SEED_USERS)
        .map(|user| {
            if user % 3 == 0 {
                ToggleBody::dislike(user)
            } else {
                ToggleBody::like(user)
            }
        })
        .collect();

    let responses = join_all(bodies.iter().map(|body| server.toggle(EMPTY_POST, body))).await;
    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let stored = counters(&server, EMPTY_POST).await;
    let dislikes = SEED_USERS / 3;
    assert_eq!(stored.dislike_count, dislikes);
    assert_eq!(stored.like_count, SEED_USERS - dislikes);
    assert_eq!(
        server.store.edge_tally(EntityId::new(EMPTY_POST)),
        PostCounters::new(stored.like_count, stored.dislike_count)
    );
}

#[tokio::test]
async fn test_rate_limit_applies_to_api_but_not_health() {
    let mut config = AppConfig::in_memory(0);
    config.rate_limit.requests_per_second = 1;
    config.rate_limit.burst = 1;
    let server = TestServer::start_with_store(seeded_store(), config)
        .await
        .unwrap();

    let path = format!("/api/v1/posts/{EMPTY_POST}/reactions");
    let first = server.get(&path).await.unwrap();
    assert_status(first, StatusCode::OK).await.unwrap();
    let second = server.get(&path).await.unwrap();
    assert_status(second, StatusCode::TOO_MANY_REQUESTS).await.unwrap();

    for _ in 0..3 {
        let response = server.get("/health").await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}
