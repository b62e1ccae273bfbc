// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lettermine.toml` > `~/.config/lettermine/lettermine.toml`
//! > `/etc/lettermine/lettermine.toml` with environment variable overrides via
//! `LETTERMINE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LettermineConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lettermine/lettermine.toml` (system-wide)
/// 3. `~/.config/lettermine/lettermine.toml` (user XDG config)
/// 4. `./lettermine.toml` (local directory)
/// 5. `LETTERMINE_*` environment variables
pub fn load_config() -> Result<LettermineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LettermineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LettermineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LettermineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LettermineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LettermineConfig::default()))
        .merge(Toml::file("/etc/lettermine/lettermine.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("lettermine/lettermine.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("lettermine.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `LETTERMINE_GMAIL_ACCESS_TOKEN` must map
/// to `gmail.access_token`, not `gmail.access.token`.
fn env_provider() -> Env {
    Env::prefixed("LETTERMINE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("gmail_", "gmail.", 1)
            .replacen("ingest_", "ingest.", 1)
            .replacen("extract_", "extract.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.gmail.sender_domain, "substack.com");
        assert_eq!(config.gmail.page_size, 100);
        assert_eq!(config.ingest.max_concurrency, 5);
        assert_eq!(config.ingest.min_content_length, 100);
        assert_eq!(config.ingest.fetch_limit, 5);
        assert_eq!(config.ingest.fetch_window, "1h");
        assert_eq!(config.extract.max_input_length, 50_000);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[gmail]
sender_domain = "mail.beehiiv.com"
page_size = 50

[ingest]
max_concurrency = 2
"#,
        )
        .unwrap();
        assert_eq!(config.gmail.sender_domain, "mail.beehiiv.com");
        assert_eq!(config.gmail.page_size, 50);
        assert_eq!(config.ingest.max_concurrency, 2);
        // Untouched sections keep their defaults.
        assert_eq!(config.ingest.fetch_limit, 5);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
[gmail]
acces_token = "oops"
"#,
        );
        assert!(result.is_err());
    }
}
