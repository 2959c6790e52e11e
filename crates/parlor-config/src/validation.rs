// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. All failures are collected, not fail-fast.

use crate::diagnostic::ConfigError;
use crate::model::ParlorConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors.
pub fn validate_config(config: &ParlorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let threshold = config.engine.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.confidence_threshold must be within [0.0, 1.0], got {threshold}"
            ),
        });
    }

    if config.engine.loop_repeat_threshold < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.loop_repeat_threshold must be at least 1, got {}",
                config.engine.loop_repeat_threshold
            ),
        });
    }

    if config.engine.max_history_turns < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "engine.max_history_turns must be at least 1, got {}",
                config.engine.max_history_turns
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.gateway.generate_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.generate_timeout_secs must be at least 1".to_string(),
        });
    }

    // FAQ entries without keywords can never match; flag them rather than
    // silently carrying dead table rows.
    for (i, entry) in config.faq.iter().enumerate() {
        if entry.keywords.iter().all(|k| k.trim().is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("faq[{i}] has no usable keywords"),
            });
        }
        if entry.answer.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("faq[{i}].answer must not be empty"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ParlorConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = ParlorConfig::default();
        config.engine.confidence_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("confidence_threshold")
        )));
    }

    #[test]
    fn zero_loop_threshold_fails_validation() {
        let mut config = ParlorConfig::default();
        config.engine.loop_repeat_threshold = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("loop_repeat_threshold")
        )));
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = ParlorConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("database_path")
        )));
    }

    #[test]
    fn keywordless_faq_entry_fails_validation() {
        let mut config = ParlorConfig::default();
        config.faq.push(parlor_core::FaqEntry {
            keywords: vec!["".to_string()],
            answer: "orphaned answer".to_string(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("faq[0]")
        )));
    }

    #[test]
    fn multiple_problems_are_all_reported() {
        let mut config = ParlorConfig::default();
        config.engine.confidence_threshold = -0.1;
        config.storage.database_path = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
