// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier 1: structured DOM parse with selector removal.

use dom_query::Document;

use crate::options::ExtractOptions;
use crate::text::normalize_whitespace;

/// Parse the HTML into a DOM tree, remove all elements matching the
/// configured selectors, and extract the body text (whole document if the
/// input has no body content).
pub(crate) fn extract(html: &str, options: &ExtractOptions) -> Result<String, String> {
    let doc = Document::from(html);

    for selector in &options.remove_selectors {
        doc.select(selector).remove();
    }

    let body = doc.select("body");
    let raw = if body.exists() {
        body.text()
    } else {
        doc.select("html").text()
    };

    Ok(normalize_whitespace(&raw, options.preserve_whitespace))
}
