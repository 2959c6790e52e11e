// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine: FAQ matching, escalation heuristics, confidence
//! scoring, and response generation over a pluggable backend.

pub mod escalation;
pub mod faq;
pub mod generator;
pub mod mock;
pub mod prompt;
pub mod scorer;
mod summarizer;

pub use escalation::{
    HANDOFF_OFFER, HUMAN_REQUEST_HANDOFF, LOOP_HANDOFF, LOOP_WINDOW, TECHNICAL_DIFFICULTY,
};
pub use faq::FaqMatcher;
pub use generator::{Backend, Reply, ResponseGenerator};
pub use mock::MockResponder;
pub use scorer::score;
