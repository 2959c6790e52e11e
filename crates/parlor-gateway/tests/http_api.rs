// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the chat REST API over a real SQLite store and the
//! mock response backend.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use parlor_config::model::{EngineConfig, StorageConfig};
use parlor_core::{ConversationStore, FaqEntry};
use parlor_engine::{FaqMatcher, MockResponder, ResponseGenerator};
use parlor_gateway::{GatewayState, build_router};
use parlor_storage::SqliteStore;
use tower::ServiceExt;

async fn test_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("gateway.db");
    let store = Arc::new(SqliteStore::new(StorageConfig {
        database_path: db_path.to_str().unwrap().to_string(),
    }));
    store.initialize().await.unwrap();

    let faq = FaqMatcher::new(vec![FaqEntry {
        keywords: vec!["refund".into()],
        answer: "Refunds are processed in 5-7 days.".into(),
    }]);
    let engine = Arc::new(ResponseGenerator::mock(
        EngineConfig::default(),
        faq,
        MockResponder::with_seed(7),
    ));

    let state = GatewayState::new(store, engine, Duration::from_secs(5));
    (build_router(state), dir)
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_session(router: &Router) -> String {
    let (status, body) = send_json(
        router,
        "POST",
        "/api/chat/create",
        Some(serde_json::json!({"user_id": "user-42"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "active");
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _dir) = test_router().await;
    let (status, body) = send_json(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn message_round_trip_is_persisted() {
    let (router, _dir) = test_router().await;
    let session_id = create_session(&router).await;

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/chat/message",
        Some(serde_json::json!({
            "session_id": session_id,
            "message": "how do I get a refund"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Refunds are processed in 5-7 days.");
    assert_eq!(body["confidence_score"], 0.9);
    assert_eq!(body["should_escalate"], false);

    let (status, history) = send_json(
        &router,
        "GET",
        &format!("/api/chat/history/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history["status"], "active");
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["confidence"], serde_json::Value::Null);
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["confidence"], 0.9);
}

#[tokio::test]
async fn unmatched_message_flags_escalation() {
    let (router, _dir) = test_router().await;
    let session_id = create_session(&router).await;

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/chat/message",
        Some(serde_json::json!({
            "session_id": session_id,
            "message": "xyz completely unmatched query"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence_score"], 0.5);
    assert_eq!(body["should_escalate"], true);
    // The reply only flags escalation; the session stays active until the
    // client calls the escalate endpoint.
    let (_, history) = send_json(
        &router,
        "GET",
        &format!("/api/chat/history/{session_id}"),
        None,
    )
    .await;
    assert_eq!(history["status"], "active");
}

#[tokio::test]
async fn unknown_session_is_404() {
    let (router, _dir) = test_router().await;
    let (status, _) = send_json(
        &router,
        "POST",
        "/api/chat/message",
        Some(serde_json::json!({"session_id": "ghost", "message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(&router, "GET", "/api/chat/history/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn escalate_summarizes_and_flips_status() {
    let (router, _dir) = test_router().await;
    let session_id = create_session(&router).await;

    send_json(
        &router,
        "POST",
        "/api/chat/message",
        Some(serde_json::json!({
            "session_id": session_id,
            "message": "my order never arrived"
        })),
    )
    .await;

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/chat/escalate",
        Some(serde_json::json!({"session_id": session_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["escalated"], true);
    assert_eq!(body["summary"], "Customer inquiry: my order never arrived...");

    let (_, history) = send_json(
        &router,
        "GET",
        &format!("/api/chat/history/{session_id}"),
        None,
    )
    .await;
    assert_eq!(history["status"], "escalated");

    // Messages to an escalated session are rejected.
    let (status, _) = send_json(
        &router,
        "POST",
        "/api/chat/message",
        Some(serde_json::json!({"session_id": session_id, "message": "hello?"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_session_and_transcript() {
    let (router, _dir) = test_router().await;
    let session_id = create_session(&router).await;

    let (status, _) = send_json(
        &router,
        "DELETE",
        &format!("/api/chat/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(
        &router,
        "DELETE",
        &format!("/api/chat/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &router,
        "GET",
        &format!("/api/chat/history/{session_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
