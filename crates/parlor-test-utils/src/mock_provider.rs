// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockCompletion` implements `CompletionProvider` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use parlor_core::{CompletionProvider, ParlorError};

/// A mock completion provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock completion" text is returned. Flip `fail_next` to make
/// the following call error, for exercising fallback paths.
pub struct MockCompletion {
    responses: Arc<Mutex<VecDeque<String>>>,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

impl MockCompletion {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fail_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            fail_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Make the next `complete` call fail with a provider error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of `complete` calls observed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock completion".to_string())
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    async fn complete(&self, _prompt: &str) -> Result<String, ParlorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ParlorError::Provider {
                message: "injected failure".into(),
                source: None,
            });
        }
        Ok(self.next_response().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_pop_in_fifo_order_then_default() {
        let provider = MockCompletion::with_responses(vec!["first".into(), "second".into()]);
        assert_eq!(provider.complete("p").await.unwrap(), "first");
        assert_eq!(provider.complete("p").await.unwrap(), "second");
        assert_eq!(provider.complete("p").await.unwrap(), "mock completion");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn fail_next_errors_exactly_once() {
        let provider = MockCompletion::with_responses(vec!["after".into()]);
        provider.fail_next();
        assert!(provider.complete("p").await.is_err());
        assert_eq!(provider.complete("p").await.unwrap(), "after");
    }
}
