// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation heuristics: cheap, deterministic checks that run before any
//! external generation call.
//!
//! Two checks live here: the explicit human request and conversation loop
//! detection. The third escalation path (low confidence) can only be known
//! after generation and is applied in the generator.

use parlor_core::{MessageRole, Turn};

/// Number of trailing turns inspected for loop detection.
pub const LOOP_WINDOW: usize = 6;

/// Fixed response when the customer explicitly asks for a human.
pub const HUMAN_REQUEST_HANDOFF: &str =
    "I understand you'd like to speak with a human agent. Let me connect you to our support team.";

/// Fixed response when the conversation is looping.
pub const LOOP_HANDOFF: &str = "I notice we're having difficulty resolving your issue. \
     Let me connect you with a human agent who can better assist you.";

/// Offer appended to low-confidence responses.
pub const HANDOFF_OFFER: &str =
    "\n\nWould you like me to connect you with a human agent for more detailed assistance?";

/// Fixed response substituted when the completion provider fails.
pub const TECHNICAL_DIFFICULTY: &str =
    "I'm experiencing technical difficulties. Let me connect you with a human agent.";

/// True when the message contains any configured escalation phrase
/// (case-insensitive substring match).
pub fn wants_human(message: &str, escalation_phrases: &[String]) -> bool {
    let message_lower = message.to_lowercase();
    escalation_phrases
        .iter()
        .any(|phrase| message_lower.contains(&phrase.to_lowercase()))
}

/// True when the assistant repeated an identical response at least
/// `repeat_threshold` times within the trailing [`LOOP_WINDOW`] turns.
///
/// Cannot trigger before the history reaches the window size. Only exact
/// text equality counts; near-duplicates do not.
pub fn detect_loop(history: &[Turn], repeat_threshold: usize) -> bool {
    if history.len() < LOOP_WINDOW {
        return false;
    }

    let recent_assistant: Vec<&str> = history[history.len() - LOOP_WINDOW..]
        .iter()
        .filter(|turn| turn.role == MessageRole::Assistant)
        .map(|turn| turn.content.as_str())
        .collect();

    if recent_assistant.len() < repeat_threshold {
        return false;
    }

    recent_assistant.iter().any(|text| {
        recent_assistant
            .iter()
            .filter(|other| *other == text)
            .count()
            >= repeat_threshold
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases() -> Vec<String> {
        parlor_config::model::EngineConfig::default().escalation_phrases
    }

    #[test]
    fn detects_escalation_phrases_case_insensitively() {
        let phrases = phrases();
        assert!(wants_human("I want to SPEAK TO HUMAN please", &phrases));
        assert!(wants_human("please escalate this", &phrases));
        assert!(wants_human("get me your Supervisor now", &phrases));
        assert!(!wants_human("my printer is broken", &phrases));
    }

    #[test]
    fn phrase_must_appear_as_substring() {
        let phrases = phrases();
        assert!(!wants_human("the humane society called", &phrases));
        // "real person" embedded in a longer sentence still counts.
        assert!(wants_human("can I talk to a real person about this", &phrases));
    }

    fn looping_history(repeats: usize) -> Vec<Turn> {
        let mut history = Vec::new();
        for _ in 0..repeats {
            history.push(Turn::user("it still does not work"));
            history.push(Turn::assistant("Have you tried restarting?"));
        }
        history
    }

    #[test]
    fn loop_requires_full_window() {
        // 4 turns: 2 identical assistant responses, below the window size.
        let history = looping_history(2);
        assert!(!detect_loop(&history, 3));
    }

    #[test]
    fn three_identical_responses_in_window_trigger() {
        let history = looping_history(3);
        assert_eq!(history.len(), LOOP_WINDOW);
        assert!(detect_loop(&history, 3));
    }

    #[test]
    fn distinct_responses_do_not_trigger() {
        let history = vec![
            Turn::user("a"),
            Turn::assistant("first answer"),
            Turn::user("b"),
            Turn::assistant("second answer"),
            Turn::user("c"),
            Turn::assistant("third answer"),
        ];
        assert!(!detect_loop(&history, 3));
    }

    #[test]
    fn only_trailing_window_is_inspected() {
        // Repeats happen early; the trailing window holds distinct answers.
        let mut history = looping_history(3);
        for i in 0..3 {
            history.push(Turn::user(format!("question {i}")));
            history.push(Turn::assistant(format!("answer {i}")));
        }
        assert!(!detect_loop(&history, 3));
    }

    #[test]
    fn near_duplicates_do_not_count() {
        let history = vec![
            Turn::user("a"),
            Turn::assistant("Have you tried restarting?"),
            Turn::user("b"),
            Turn::assistant("Have you tried restarting? "),
            Turn::user("c"),
            Turn::assistant("have you tried restarting?"),
        ];
        assert!(!detect_loop(&history, 3));
    }

    #[test]
    fn lower_repeat_threshold_triggers_sooner() {
        let history = vec![
            Turn::user("a"),
            Turn::assistant("same"),
            Turn::user("b"),
            Turn::assistant("same"),
            Turn::user("c"),
            Turn::assistant("different"),
        ];
        assert!(detect_loop(&history, 2));
        assert!(!detect_loop(&history, 3));
    }

    #[test]
    fn empty_history_never_loops() {
        assert!(!detect_loop(&[], 3));
    }
}
