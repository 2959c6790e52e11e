// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The response generation pipeline.
//!
//! Order of evaluation: explicit human request, loop detection, FAQ lookup,
//! then provider dispatch. The cheap deterministic checks run before any
//! external call; confidence-based escalation can only be known after
//! generation, so it is applied last.

use std::sync::Arc;

use parlor_config::model::EngineConfig;
use parlor_core::{CompletionProvider, Turn};
use tracing::{debug, warn};

use crate::escalation::{
    self, HANDOFF_OFFER, HUMAN_REQUEST_HANDOFF, LOOP_HANDOFF, TECHNICAL_DIFFICULTY,
};
use crate::faq::FaqMatcher;
use crate::mock::MockResponder;
use crate::{prompt, scorer, summarizer};

/// The outcome of one generation call.
///
/// Generation never fails: provider errors are folded into a fallback reply
/// with `escalate = true`, because "need a human" is a normal outcome, not
/// an exceptional one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Response text for the customer.
    pub text: String,
    /// Heuristic reliability estimate in [0.0, 1.0].
    pub confidence: f64,
    /// Whether this conversation should be handed to a human.
    pub escalate: bool,
}

/// Which backend produces response text.
pub enum Backend {
    /// Canned responses, no external calls.
    Mock(MockResponder),
    /// Hosted completion provider.
    Hosted(Arc<dyn CompletionProvider>),
}

/// Stateless-per-call response generator.
///
/// All conversation state is the passed-in history; the generator holds
/// only read-only configuration, the FAQ table, and the backend handle.
/// Concurrent calls for different sessions are fully independent.
pub struct ResponseGenerator {
    config: EngineConfig,
    faq: FaqMatcher,
    backend: Backend,
}

impl ResponseGenerator {
    /// Generator backed by the mock responder.
    pub fn mock(config: EngineConfig, faq: FaqMatcher, responder: MockResponder) -> Self {
        Self {
            config,
            faq,
            backend: Backend::Mock(responder),
        }
    }

    /// Generator backed by a hosted completion provider.
    pub fn hosted(
        config: EngineConfig,
        faq: FaqMatcher,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            config,
            faq,
            backend: Backend::Hosted(provider),
        }
    }

    /// Generates a reply to `message` given the session's prior turns.
    ///
    /// This call never returns an error. The only suspension point is the
    /// hosted provider call, which is issued once with no internal retry
    /// or timeout; callers impose timeouts.
    pub async fn generate(&self, message: &str, history: &[Turn]) -> Reply {
        if escalation::wants_human(message, &self.config.escalation_phrases) {
            debug!("explicit human request, escalating");
            return Reply {
                text: HUMAN_REQUEST_HANDOFF.to_string(),
                confidence: 1.0,
                escalate: true,
            };
        }

        if escalation::detect_loop(history, self.config.loop_repeat_threshold) {
            debug!("conversation loop detected, escalating");
            return Reply {
                text: LOOP_HANDOFF.to_string(),
                confidence: 0.5,
                escalate: true,
            };
        }

        let faq_answer = self.faq.lookup(message);
        if faq_answer.is_some() {
            debug!("FAQ entry matched");
        }

        let threshold = self.config.confidence_threshold;
        match &self.backend {
            Backend::Mock(responder) => responder.respond(message, faq_answer, threshold),
            Backend::Hosted(provider) => {
                let prompt = prompt::chat_prompt(
                    message,
                    history,
                    faq_answer,
                    self.config.max_history_turns,
                );
                match provider.complete(&prompt).await {
                    Ok(text) => {
                        let mut text = text.trim().to_string();
                        let confidence = scorer::score(
                            &text,
                            faq_answer.is_some(),
                            &self.config.hedging_phrases,
                        );
                        let escalate = confidence < threshold;
                        if escalate {
                            text.push_str(HANDOFF_OFFER);
                        }
                        Reply {
                            text,
                            confidence,
                            escalate,
                        }
                    }
                    Err(e) => {
                        // Hard fallback, not retried. The failure stays local.
                        warn!(provider = provider.name(), error = %e, "completion failed, falling back");
                        Reply {
                            text: TECHNICAL_DIFFICULTY.to_string(),
                            confidence: 0.0,
                            escalate: true,
                        }
                    }
                }
            }
        }
    }

    /// Summarizes a conversation for the human agent taking it over.
    pub async fn summarize(&self, history: &[Turn]) -> String {
        summarizer::summarize(&self.backend, history).await
    }

    /// The configured confidence threshold.
    pub fn confidence_threshold(&self) -> f64 {
        self.config.confidence_threshold
    }
}
