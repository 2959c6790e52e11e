// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic confidence scoring of generated responses.

/// Scores a response's reliability in [0.0, 1.0].
///
/// Base 0.8, raised to 0.95 when the response was sourced from an FAQ
/// match. Hedging language (case-insensitive substring) subtracts 0.3;
/// fewer than 10 whitespace-delimited words subtracts 0.1. Deterministic,
/// no side effects, no external calls.
pub fn score(response: &str, had_faq_match: bool, hedging_phrases: &[String]) -> f64 {
    let mut confidence: f64 = if had_faq_match { 0.95 } else { 0.8 };

    let response_lower = response.to_lowercase();
    if hedging_phrases
        .iter()
        .any(|phrase| response_lower.contains(&phrase.to_lowercase()))
    {
        confidence -= 0.3;
    }

    if response.split_whitespace().count() < 10 {
        confidence -= 0.1;
    }

    confidence.clamp(0.0, 1.0)
}
