// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation summaries for human agents taking over a session.

use parlor_core::{MessageRole, Turn};
use tracing::warn;

use crate::generator::Backend;
use crate::prompt;

const EMPTY_SUMMARY: &str = "No conversation history available.";
const UNAVAILABLE_SUMMARY: &str = "Conversation summary unavailable.";
const GENERIC_SUMMARY: &str = "Customer support conversation summary.";

const INQUIRY_PREVIEW_CHARS: usize = 100;

/// Produces a short summary of `history` for the hand-off record.
///
/// Always returns usable text; a provider failure degrades to a stock
/// placeholder rather than blocking the escalation.
pub(crate) async fn summarize(backend: &Backend, history: &[Turn]) -> String {
    if history.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }
    match backend {
        Backend::Mock(_) => mock_summary(history),
        Backend::Hosted(provider) => {
            let prompt = prompt::summary_prompt(history);
            match provider.complete(&prompt).await {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "summary generation failed");
                    UNAVAILABLE_SUMMARY.to_string()
                }
            }
        }
    }
}

/// Deterministic summary built from the most recent customer turn.
fn mock_summary(history: &[Turn]) -> String {
    let last_user = history
        .iter()
        .rev()
        .find(|turn| turn.role == MessageRole::User);
    match last_user {
        Some(turn) => {
            let preview: String = turn.content.chars().take(INQUIRY_PREVIEW_CHARS).collect();
            format!("Customer inquiry: {preview}...")
        }
        None => GENERIC_SUMMARY.to_string(),
    }
}
