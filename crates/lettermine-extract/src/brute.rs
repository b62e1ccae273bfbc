// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier 3: single-pass greedy tag strip. The tier of last resort; it
//! produces something for any input and never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::ExtractOptions;
use crate::text::normalize_whitespace;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap_or_else(|e| panic!("tag pattern: {e}")));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&[a-zA-Z#0-9]+;").unwrap_or_else(|e| panic!("entity pattern: {e}"))
});

pub(crate) fn extract(html: &str, options: &ExtractOptions) -> Result<String, String> {
    let text = TAG.replace_all(html, " ");
    let text = ENTITY.replace_all(&text, " ");
    Ok(normalize_whitespace(&text, options.preserve_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        let text = extract("<p>a &amp; b</p>", &ExtractOptions::default()).unwrap();
        assert_eq!(text, "a b");
    }

    #[test]
    fn tolerates_severely_malformed_markup() {
        let text = extract("<<p>>broken<<<em html", &ExtractOptions::default()).unwrap();
        assert!(text.contains("broken"));
    }

    #[test]
    fn never_fails_on_empty_input() {
        assert_eq!(extract("", &ExtractOptions::default()).unwrap(), "");
    }
}
