// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction result types.

use strum::Display;

/// Which cascade tier produced the final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseMethod {
    /// Structured DOM parse with selector removal.
    Dom,
    /// Regex-based tag stripping with best-effort selector removal.
    Regex,
    /// Single-pass greedy tag strip. Never fails.
    BruteForce,
}

/// Output of one extraction call.
///
/// The extractor never raises; it always returns a result, escalating
/// through fallback tiers. `success == true` implies `text` is non-empty.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub text: String,
    pub success: bool,
    pub method: ParseMethod,
    /// Present when earlier tiers failed; describes the last tier error.
    pub error: Option<String>,
}
