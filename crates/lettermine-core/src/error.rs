// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lettermine ingestion pipeline.

use thiserror::Error;

/// The primary error type used across all Lettermine adapter traits and
/// pipeline operations.
///
/// The variants mirror the pipeline's failure taxonomy: configuration and
/// capability problems are user-actionable and propagate immediately,
/// rate-limit denials and storage failures abort the current fetch cycle,
/// and provider errors cover transient remote faults.
#[derive(Debug, Error)]
pub enum LettermineError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The mail account lacks a required capability (API not enabled, access
    /// forbidden). Signals a setup problem, not a transient fault.
    #[error("mailbox capability error: {message}")]
    Capability { message: String },

    /// Burst protection denied the operation. Callers should retry later;
    /// this component never queues or retries denied calls itself.
    #[error("rate limit exceeded for {operation}:{identifier}")]
    RateLimited {
        operation: String,
        identifier: String,
    },

    /// Remote provider errors (mail API failure, LLM API failure, bad response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Storage backend errors (database connection, query failure).
    /// Fatal to the fetch cycle that hits them.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A remote call timed out. Message-local during per-message processing;
    /// fatal when it hits the initial page listing.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },
}

impl LettermineError {
    /// True for errors that indicate a mailbox setup problem rather than a
    /// transient fault.
    pub fn is_capability(&self) -> bool {
        matches!(self, LettermineError::Capability { .. })
    }
}
