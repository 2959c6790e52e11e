// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static keyword-to-answer FAQ lookup, consulted before any model call.

use parlor_core::FaqEntry;
use tracing::warn;

/// First-match-wins FAQ table. Read-only after construction.
///
/// Matching is a case-insensitive substring test of each configured keyword
/// against the query; ties between entries are resolved by configured
/// order, not relevance.
#[derive(Debug, Clone, Default)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
}

impl FaqMatcher {
    /// Builds a matcher over the given entries, preserving their order.
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Builds a matcher from inline config entries plus an optional JSON
    /// file of additional entries.
    ///
    /// A missing or malformed file is tolerated: the file contributes
    /// nothing and a warning is logged. FAQ data problems are never fatal.
    pub fn load(inline: &[FaqEntry], faq_file: Option<&str>) -> Self {
        let mut entries = inline.to_vec();
        if let Some(path) = faq_file {
            entries.extend(load_faq_file(path));
        }
        Self { entries }
    }

    /// Looks up the first entry whose keyword appears in the query.
    ///
    /// Returns `None` when nothing matches: a normal outcome, not an error.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        let query_lower = query.to_lowercase();
        self.entries
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|kw| !kw.is_empty() && query_lower.contains(&kw.to_lowercase()))
            })
            .map(|entry| entry.answer.as_str())
    }

    /// Number of loaded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File format: `{"faqs": [{"keywords": [...], "answer": "..."}]}`.
#[derive(Debug, serde::Deserialize)]
struct FaqFile {
    #[serde(default)]
    faqs: Vec<FaqEntry>,
}

fn load_faq_file(path: &str) -> Vec<FaqEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path, error = %e, "FAQ file not readable, continuing without it");
            return Vec::new();
        }
    };
    match serde_json::from_str::<FaqFile>(&content) {
        Ok(file) => file.faqs,
        Err(e) => {
            warn!(path, error = %e, "FAQ file is not valid JSON, continuing without it");
            Vec::new()
        }
    }
}
