// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Downstream extraction-stage trait (LLM-backed company extraction).

use async_trait::async_trait;

use crate::error::LettermineError;
use crate::types::Extraction;

/// The extraction stage immediately downstream of ingestion.
///
/// Consumed as an opaque function: clean text plus a source name in,
/// structured company mentions out. The pipeline deduplicates the output
/// before any further persistence.
#[async_trait]
pub trait CompanyExtractor: Send + Sync {
    /// Extracts company mentions from cleaned newsletter text.
    async fn extract_companies(
        &self,
        text: &str,
        source_name: &str,
    ) -> Result<Extraction, LettermineError>;
}
