// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly for the hosted completion provider.

use parlor_core::{MessageRole, Turn};

/// Fixed support persona embedded in every chat prompt.
const SYSTEM_PERSONA: &str = "You are a helpful AI Customer Support Assistant for a technology company. Your role is to:
1. Answer customer questions accurately and professionally about products and services
2. Help with account issues, technical problems, billing inquiries, and general support
3. Use the FAQ information provided when relevant to give accurate responses
4. Maintain a friendly yet professional tone
5. Guide customers through troubleshooting steps when needed
6. If you're uncertain about specific policies or technical details, acknowledge it and suggest contacting human support

Company Context: We are a technology company providing software solutions and services to customers worldwide.";

/// Placeholder hint when no FAQ entry matched the message.
const NO_FAQ_HINT: &str = "No specific FAQ match found.";

/// Builds the chat prompt: persona, FAQ hint, the most recent
/// `max_history_turns` turns rendered as Customer:/Support: lines, then the
/// current message.
pub fn chat_prompt(
    message: &str,
    history: &[Turn],
    faq_answer: Option<&str>,
    max_history_turns: usize,
) -> String {
    let faq_context = faq_answer.unwrap_or(NO_FAQ_HINT);

    let start = history.len().saturating_sub(max_history_turns);
    let mut conversation = String::new();
    for turn in &history[start..] {
        let speaker = match turn.role {
            MessageRole::User => "Customer",
            _ => "Support",
        };
        conversation.push_str(speaker);
        conversation.push_str(": ");
        conversation.push_str(&turn.content);
        conversation.push('\n');
    }

    format!(
        "{SYSTEM_PERSONA}\n\nFAQ Context: {faq_context}\n\nPrevious conversation:\n{conversation}\nCustomer: {message}\nSupport:"
    )
}

/// Builds the summarization prompt over the full transcript.
pub fn summary_prompt(history: &[Turn]) -> String {
    let transcript = history
        .iter()
        .map(|turn| format!("{}: {}", turn.role.to_string().to_uppercase(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Summarize the following customer support conversation in 2-3 sentences, \
         highlighting the main issue and any unresolved concerns:\n\n{transcript}\n\nSummary:"
    )
}
