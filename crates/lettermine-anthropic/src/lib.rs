// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API client and the LLM-backed company extraction
//! stage.

pub mod client;
pub mod extractor;
pub mod types;

pub use client::AnthropicClient;
pub use extractor::AnthropicExtractor;
