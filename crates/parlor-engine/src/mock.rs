// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic mock responder: keyword-bucket canned responses with no
//! external calls.
//!
//! Response selection within a bucket uses an injected seedable RNG so
//! tests can pin the choice.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::escalation::HANDOFF_OFFER;
use crate::generator::Reply;

/// Keyword buckets, matched first-wins against the lowercased message.
const BUCKETS: &[(&str, &[&str])] = &[
    (
        "hello",
        &[
            "Hello! How can I help you today?",
            "Hi there! What can I assist you with?",
            "Greetings! How may I help you?",
        ],
    ),
    (
        "help",
        &[
            "I'm here to help! What specific assistance do you need?",
            "I'd be happy to help. What can I do for you?",
        ],
    ),
    (
        "problem",
        &[
            "I'm sorry to hear you're having an issue. Can you tell me more about what's happening?",
            "Let me help you resolve this problem. What's going on?",
        ],
    ),
    (
        "error",
        &[
            "I understand you're encountering an error. Could you provide more details about the error message?",
            "Errors can be frustrating. Let me help you troubleshoot this.",
        ],
    ),
    (
        "thank",
        &[
            "You're welcome! Is there anything else I can help you with?",
            "Happy to help! Let me know if you need anything else.",
        ],
    ),
    (
        "bye",
        &[
            "Thank you for contacting us. Have a great day!",
            "Goodbye! Feel free to reach out anytime.",
        ],
    ),
];

/// Generic clarification prompts for messages matching no bucket.
const CLARIFICATIONS: &[&str] = &[
    "I understand you're looking for assistance. Could you please provide more details about what you need help with?",
    "I'd like to help you better. Can you tell me more about your question or issue?",
    "Thank you for your message. To provide the best assistance, could you give me more information?",
];

/// Canned-response generator for demo mode and tests.
pub struct MockResponder {
    rng: Mutex<StdRng>,
}

impl MockResponder {
    /// Responder with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Responder with a fixed seed, for deterministic selection in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produces a canned reply for the message.
    ///
    /// FAQ answers are returned verbatim at confidence 0.9. Otherwise the
    /// first matching keyword bucket supplies a response at 0.8 (>3-word
    /// message) or 0.6; no bucket falls through to a generic clarification
    /// at 0.5. On every path `escalate == (confidence < threshold)`, and
    /// escalating replies get the hand-off offer appended.
    pub fn respond(&self, message: &str, faq_answer: Option<&str>, threshold: f64) -> Reply {
        if let Some(answer) = faq_answer {
            return self.finish(answer.to_string(), 0.9, threshold);
        }

        let message_lower = message.to_lowercase();
        for (keyword, responses) in BUCKETS {
            if message_lower.contains(keyword) {
                let text = self.pick(responses);
                let confidence = if message.split_whitespace().count() > 3 {
                    0.8
                } else {
                    0.6
                };
                return self.finish(text, confidence, threshold);
            }
        }

        let text = self.pick(CLARIFICATIONS);
        self.finish(text, 0.5, threshold)
    }

    fn pick(&self, candidates: &[&str]) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let idx = rng.gen_range(0..candidates.len());
        candidates[idx].to_string()
    }

    fn finish(&self, mut text: String, confidence: f64, threshold: f64) -> Reply {
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
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}
