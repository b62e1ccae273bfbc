// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive page sizes and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::LettermineConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LettermineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gmail.api_base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gmail.api_base_url must not be empty".to_string(),
        });
    }

    if config.gmail.sender_domain.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gmail.sender_domain must not be empty".to_string(),
        });
    }

    if config.gmail.page_size == 0 || config.gmail.page_size > 500 {
        errors.push(ConfigError::Validation {
            message: format!(
                "gmail.page_size must be between 1 and 500, got {}",
                config.gmail.page_size
            ),
        });
    }

    if config.gmail.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gmail.timeout_secs must be positive".to_string(),
        });
    }

    if config.ingest.max_concurrency == 0 {
        errors.push(ConfigError::Validation {
            message: "ingest.max_concurrency must be at least 1".to_string(),
        });
    }

    if config.ingest.fetch_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "ingest.fetch_limit must be at least 1".to_string(),
        });
    }

    if config.extract.max_input_length < config.ingest.min_content_length {
        errors.push(ConfigError::Validation {
            message: format!(
                "extract.max_input_length ({}) must not be below ingest.min_content_length ({})",
                config.extract.max_input_length, config.ingest.min_content_length
            ),
        });
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be positive".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = LettermineConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = LettermineConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("database_path"))
        ));
    }

    #[test]
    fn zero_page_size_fails_validation() {
        let mut config = LettermineConfig::default();
        config.gmail.page_size = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("page_size"))
        ));
    }

    #[test]
    fn zero_concurrency_fails_validation() {
        let mut config = LettermineConfig::default();
        config.ingest.max_concurrency = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_concurrency"))
        ));
    }

    #[test]
    fn truncation_below_content_floor_fails_validation() {
        let mut config = LettermineConfig::default();
        config.extract.max_input_length = 50;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("max_input_length"))
        ));
    }

    #[test]
    fn partial_toml_fills_defaults_and_validates() {
        let toml_str = r#"
[gmail]
sender_domain = "ghost.io"
page_size = 50

[storage]
database_path = "/tmp/lettermine-test.db"
"#;
        let config: LettermineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gmail.sender_domain, "ghost.io");
        assert_eq!(config.gmail.page_size, 50);
        // Unset sections keep their defaults.
        assert_eq!(config.ingest.max_concurrency, 5);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        let toml_str = r#"
[gmail]
sender_doman = "substack.com"
"#;
        let result = toml::from_str::<LettermineConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = LettermineConfig::default();
        config.gmail.page_size = 0;
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 2, "should not fail fast");
    }
}
