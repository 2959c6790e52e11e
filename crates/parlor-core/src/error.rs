// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Parlor support backend.

use thiserror::Error;

/// The primary error type used across Parlor crates.
///
/// Business outcomes are never errors: an escalation decision or a provider
/// fallback is an `Ok` value carrying an escalate flag. These variants cover
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum ParlorError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (auth, quota, network, malformed response).
    ///
    /// The engine does not distinguish subtypes: every provider failure
    /// gets the same local fallback.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_render_their_context() {
        let config = ParlorError::Config("bad threshold".into());
        assert_eq!(config.to_string(), "configuration error: bad threshold");

        let storage = ParlorError::Storage {
            source: Box::new(std::io::Error::other("disk full")),
        };
        assert!(storage.to_string().contains("disk full"));

        let provider = ParlorError::Provider {
            message: "API returned 401".into(),
            source: None,
        };
        assert!(provider.to_string().contains("401"));
    }
}
