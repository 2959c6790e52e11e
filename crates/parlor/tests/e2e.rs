// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete support pipeline.
//!
//! Each test creates an isolated TestHarness with a temp SQLite database.
//! Tests are independent and order-insensitive.

use parlor_core::MessageRole;
use parlor_engine::{HANDOFF_OFFER, HUMAN_REQUEST_HANDOFF, LOOP_HANDOFF, TECHNICAL_DIFFICULTY};
use parlor_test_utils::TestHarness;

// ---- Message-to-response pipeline ----

#[tokio::test]
async fn pipeline_persists_user_and_assistant_messages() {
    let harness = TestHarness::builder().build().await.unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "hello there friend")
        .await
        .unwrap();
    assert!(!reply.text.is_empty());

    let transcript = harness.transcript(&session.id).await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, MessageRole::User);
    assert_eq!(transcript[0].content, "hello there friend");
    assert_eq!(transcript[0].confidence, None);
    assert_eq!(transcript[1].role, MessageRole::Assistant);
    assert_eq!(transcript[1].confidence, Some(reply.confidence));
}

#[tokio::test]
async fn faq_match_returns_canned_answer_with_high_confidence() {
    let harness = TestHarness::builder()
        .with_faq(vec!["refund"], "Refunds are processed in 5-7 days.")
        .build()
        .await
        .unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "can I get a refund?")
        .await
        .unwrap();
    assert_eq!(reply.text, "Refunds are processed in 5-7 days.");
    assert_eq!(reply.confidence, 0.9);
    assert!(!reply.escalate);
}

#[tokio::test]
async fn greeting_scores_point_eight_in_mock_mode() {
    let harness = TestHarness::builder().build().await.unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "hello there friend yes")
        .await
        .unwrap();
    assert_eq!(reply.confidence, 0.8);
    assert!(!reply.escalate);
}

#[tokio::test]
async fn unmatched_query_offers_handoff() {
    let harness = TestHarness::builder().build().await.unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "xyz completely unmatched query")
        .await
        .unwrap();
    assert_eq!(reply.confidence, 0.5);
    assert!(reply.escalate);
    assert!(reply.text.ends_with(HANDOFF_OFFER));
}

// ---- Escalation paths ----

#[tokio::test]
async fn human_request_escalates_immediately() {
    let harness = TestHarness::builder().build().await.unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "I want to speak to a human please")
        .await
        .unwrap();
    assert_eq!(reply.text, HUMAN_REQUEST_HANDOFF);
    assert_eq!(reply.confidence, 1.0);
    assert!(reply.escalate);
}

#[tokio::test]
async fn repeated_responses_trigger_loop_handoff_without_provider_call() {
    let harness = TestHarness::builder()
        .with_hosted_responses(vec![
            "Have you tried restarting the device?".to_string(),
            "Have you tried restarting the device?".to_string(),
            "Have you tried restarting the device?".to_string(),
        ])
        .build()
        .await
        .unwrap();
    let session = harness.create_session().await.unwrap();
    let provider = harness.provider.clone().unwrap();

    for _ in 0..3 {
        harness
            .send_message(&session.id, "it is still broken")
            .await
            .unwrap();
    }
    assert_eq!(provider.call_count(), 3);

    // Six prior turns with three identical assistant texts: loop hand-off,
    // and the provider is not consulted again.
    let reply = harness
        .send_message(&session.id, "it is still broken")
        .await
        .unwrap();
    assert_eq!(reply.text, LOOP_HANDOFF);
    assert_eq!(reply.confidence, 0.5);
    assert!(reply.escalate);
    assert_eq!(provider.call_count(), 3);
}

// ---- Hosted backend behavior ----

#[tokio::test]
async fn confident_hosted_response_passes_through() {
    let harness = TestHarness::builder()
        .with_hosted_responses(vec![
            "You can update your billing details from the account settings page.".to_string(),
        ])
        .build()
        .await
        .unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "how do I update billing details")
        .await
        .unwrap();
    assert_eq!(
        reply.text,
        "You can update your billing details from the account settings page."
    );
    assert_eq!(reply.confidence, 0.8);
    assert!(!reply.escalate);
}

#[tokio::test]
async fn hedged_hosted_response_escalates_with_offer() {
    let harness = TestHarness::builder()
        .with_hosted_responses(vec![
            "I'm not sure, but possibly the billing team could help with that question."
                .to_string(),
        ])
        .build()
        .await
        .unwrap();
    let session = harness.create_session().await.unwrap();

    let reply = harness
        .send_message(&session.id, "strange invoice line item")
        .await
        .unwrap();
    assert!(reply.escalate);
    assert!(reply.text.ends_with(HANDOFF_OFFER));
}

#[tokio::test]
async fn provider_failure_degrades_to_fallback() {
    let harness = TestHarness::builder()
        .with_hosted_responses(vec![])
        .build()
        .await
        .unwrap();
    let session = harness.create_session().await.unwrap();
    let provider = harness.provider.clone().unwrap();
    provider.fail_next();

    let reply = harness
        .send_message(&session.id, "anything at all")
        .await
        .unwrap();
    assert_eq!(reply.text, TECHNICAL_DIFFICULTY);
    assert_eq!(reply.confidence, 0.0);
    assert!(reply.escalate);
    assert_eq!(provider.call_count(), 1, "no retry after failure");

    // The fallback is persisted like any other assistant turn.
    let transcript = harness.transcript(&session.id).await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].content, TECHNICAL_DIFFICULTY);
    assert_eq!(transcript[1].confidence, Some(0.0));
}

// ---- Summaries ----

#[tokio::test]
async fn mock_summary_previews_last_customer_message() {
    let harness = TestHarness::builder().build().await.unwrap();
    let session = harness.create_session().await.unwrap();
    harness
        .send_message(&session.id, "my package arrived damaged")
        .await
        .unwrap();

    let transcript = harness.transcript(&session.id).await.unwrap();
    let turns: Vec<parlor_core::Turn> = transcript.iter().map(parlor_core::Turn::from).collect();
    let summary = harness.engine.summarize(&turns).await;
    assert_eq!(summary, "Customer inquiry: my package arrived damaged...");
}
