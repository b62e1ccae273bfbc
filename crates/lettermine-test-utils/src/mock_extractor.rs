// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company extractor returning pre-configured results.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lettermine_core::{
    CompanyExtractor, CompanyMention, Extraction, ExtractionMetadata, LettermineError,
};

/// An extractor that pops scripted company lists from a FIFO queue.
///
/// An empty queue yields an extraction with no companies.
pub struct MockExtractor {
    results: Mutex<VecDeque<Vec<CompanyMention>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
        }
    }

    pub fn with_results(results: Vec<Vec<CompanyMention>>) -> Self {
        Self {
            results: Mutex::new(VecDeque::from(results)),
        }
    }

    pub fn push_result(&self, companies: Vec<CompanyMention>) {
        self.results.lock().unwrap().push_back(companies);
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyExtractor for MockExtractor {
    async fn extract_companies(
        &self,
        text: &str,
        source_name: &str,
    ) -> Result<Extraction, LettermineError> {
        let companies = self
            .results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        Ok(Extraction {
            companies,
            metadata: ExtractionMetadata {
                model: "mock-extractor".to_string(),
                source_name: source_name.to_string(),
                input_chars: text.len(),
            },
        })
    }
}
