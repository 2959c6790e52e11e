// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for hosted LLM integrations (Gemini, OpenAI).

use async_trait::async_trait;

use crate::error::ParlorError;

/// An opaque text-completion capability: given a prompt, return text or fail.
///
/// The engine treats `complete` as a single blocking call: no internal
/// retry, no streaming, no timeout. Callers impose timeouts. Every provider
/// failure surfaces as [`ParlorError::Provider`]; the engine recovers
/// locally by substituting a fixed fallback response and forcing escalation.
#[async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Human-readable provider name, used for logging only.
    fn name(&self) -> &str;

    /// Sends a completion request and returns the raw response text.
    async fn complete(&self, prompt: &str) -> Result<String, ParlorError>;
}
