// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Parlor support backend.
//!
//! All sections use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use parlor_core::FaqEntry;
use serde::{Deserialize, Serialize};

/// Top-level Parlor configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParlorConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Response provider selection.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Google Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// OpenAI API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Response engine thresholds and phrase lists.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Inline FAQ entries, matched in configured order.
    #[serde(default)]
    pub faq: Vec<FaqEntry>,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "parlor".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Which backend produces responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Deterministic/pseudo-random canned responses, no external calls.
    #[default]
    Mock,
    /// Google Gemini generateContent.
    Gemini,
    /// OpenAI chat completions.
    Openai,
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Mock => write!(f, "mock"),
            ProviderMode::Gemini => write!(f, "gemini"),
            ProviderMode::Openai => write!(f, "openai"),
        }
    }
}

/// Response provider configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Provider mode: "mock", "gemini", or "openai".
    #[serde(default)]
    pub mode: ProviderMode,
}

/// Google Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` allows mock mode only.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// OpenAI API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` allows mock mode only.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-4".to_string()
}

/// Response engine thresholds and phrase lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Responses scoring below this escalate to a human (0.0-1.0).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Maximum number of most-recent history turns embedded in prompts.
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    /// Identical assistant responses within the trailing window that
    /// count as a conversation loop.
    #[serde(default = "default_loop_repeat_threshold")]
    pub loop_repeat_threshold: usize,

    /// Phrases (case-insensitive substrings) that request a human directly.
    #[serde(default = "default_escalation_phrases")]
    pub escalation_phrases: Vec<String>,

    /// Phrases (case-insensitive substrings) that lower response confidence.
    #[serde(default = "default_hedging_phrases")]
    pub hedging_phrases: Vec<String>,

    /// Optional JSON file with additional FAQ entries, appended after the
    /// inline `[[faq]]` table. Malformed or missing files are tolerated.
    #[serde(default)]
    pub faq_file: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_history_turns: default_max_history_turns(),
            loop_repeat_threshold: default_loop_repeat_threshold(),
            escalation_phrases: default_escalation_phrases(),
            hedging_phrases: default_hedging_phrases(),
            faq_file: None,
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.7
}

fn default_max_history_turns() -> usize {
    10
}

fn default_loop_repeat_threshold() -> usize {
    3
}

fn default_escalation_phrases() -> Vec<String> {
    [
        "speak to human",
        "talk to agent",
        "human support",
        "real person",
        "escalate",
        "supervisor",
        "manager",
    ]
    .map(String::from)
    .to_vec()
}

fn default_hedging_phrases() -> Vec<String> {
    [
        "i'm not sure",
        "i don't know",
        "uncertain",
        "might be",
        "possibly",
        "perhaps",
        "maybe",
    ]
    .map(String::from)
    .to_vec()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "parlor.db".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Caller-imposed timeout around response generation, in seconds.
    /// The engine itself never times out the provider call.
    #[serde(default = "default_generate_timeout_secs")]
    pub generate_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            generate_timeout_secs: default_generate_timeout_secs(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

fn default_generate_timeout_secs() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ParlorConfig::default();
        assert_eq!(config.agent.name, "parlor");
        assert_eq!(config.provider.mode, ProviderMode::Mock);
        assert_eq!(config.engine.confidence_threshold, 0.7);
        assert_eq!(config.engine.max_history_turns, 10);
        assert_eq!(config.engine.loop_repeat_threshold, 3);
        assert!(config.engine.escalation_phrases.contains(&"escalate".to_string()));
        assert!(config.engine.hedging_phrases.contains(&"maybe".to_string()));
        assert!(config.faq.is_empty());
        assert_eq!(config.gateway.port, 8080);
    }

    #[test]
    fn faq_array_deserializes_in_order() {
        let toml_str = r#"
[[faq]]
keywords = ["refund", "money back"]
answer = "Refunds are processed in 5-7 days."

[[faq]]
keywords = ["shipping"]
answer = "Standard shipping takes 3-5 business days."
"#;
        let config: ParlorConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.faq.len(), 2);
        assert_eq!(config.faq[0].keywords, vec!["refund", "money back"]);
        assert_eq!(config.faq[1].answer, "Standard shipping takes 3-5 business days.");
    }

    #[test]
    fn provider_mode_parses_lowercase() {
        let config: ParlorConfig = toml::from_str("[provider]\nmode = \"gemini\"\n").unwrap();
        assert_eq!(config.provider.mode, ProviderMode::Gemini);
        assert_eq!(config.provider.mode.to_string(), "gemini");
    }

    #[test]
    fn unknown_section_key_is_rejected() {
        let result = toml::from_str::<ParlorConfig>("[engine]\nconfidence_treshold = 0.5\n");
        assert!(result.is_err());
    }
}
