// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lettermine pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Lettermine configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LettermineConfig {
    /// Application-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Gmail API settings.
    #[serde(default)]
    pub gmail: GmailConfig,

    /// Ingestion pipeline settings.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// HTML extraction settings.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Anthropic API settings for the company-extraction stage.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Application-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gmail API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GmailConfig {
    /// OAuth access token. `None` requires the `LETTERMINE_GMAIL_ACCESS_TOKEN`
    /// environment variable.
    #[serde(default)]
    pub access_token: Option<String>,

    /// Base URL for the Gmail REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Sender domain the search query filters on.
    #[serde(default = "default_sender_domain")]
    pub sender_domain: String,

    /// Page size for message list requests.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            api_base_url: default_api_base_url(),
            sender_domain: default_sender_domain(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://gmail.googleapis.com/gmail/v1".to_string()
}

fn default_sender_domain() -> String {
    "substack.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

/// Ingestion pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Maximum concurrent in-flight message fetches. Backpressure control,
    /// not a correctness requirement.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Content floor: cleaned text shorter than this is dropped as noise.
    #[serde(default = "default_min_content_length")]
    pub min_content_length: usize,

    /// Burst protection: allowed fetch cycles per window.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,

    /// Burst protection window (numeric prefix + `m`/`h` suffix).
    #[serde(default = "default_fetch_window")]
    pub fetch_window: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            min_content_length: default_min_content_length(),
            fetch_limit: default_fetch_limit(),
            fetch_window: default_fetch_window(),
        }
    }
}

fn default_max_concurrency() -> usize {
    5
}

fn default_min_content_length() -> usize {
    100
}

fn default_fetch_limit() -> u32 {
    5
}

fn default_fetch_window() -> String {
    "1h".to_string()
}

/// HTML extraction configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    /// Oversized HTML is truncated to this length before parsing, bounding
    /// parse latency and memory on pathological inputs.
    #[serde(default = "default_max_input_length")]
    pub max_input_length: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_input_length: default_max_input_length(),
        }
    }
}

fn default_max_input_length() -> usize {
    50_000
}

/// Anthropic API configuration for the company-extraction stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for extraction requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per extraction response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("lettermine").join("lettermine.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("lettermine.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
