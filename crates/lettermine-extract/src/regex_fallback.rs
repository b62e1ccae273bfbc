// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tier 2: regex-based tag stripping with best-effort selector removal.
//!
//! Used when the DOM tier fails or yields too little text. Class selectors
//! are matched via a regex over `class="..."` attributes; attribute
//! selectors are skipped here as too unreliable for regex matching.

use std::sync::LazyLock;

use regex::Regex;

use crate::options::ExtractOptions;
use crate::text::normalize_whitespace;

/// `<script>`/`<style>` blocks, stripped wholesale including content.
static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>")
        .unwrap_or_else(|e| panic!("script/style pattern: {e}"))
});

/// Any remaining tag.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap_or_else(|e| panic!("tag pattern: {e}")));

/// Common HTML entities worth decoding in newsletter text.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&hellip;", "\u{2026}"),
];

pub(crate) fn extract(html: &str, options: &ExtractOptions) -> Result<String, String> {
    let mut text = SCRIPT_STYLE.replace_all(html, " ").into_owned();

    for selector in &options.remove_selectors {
        if let Some(pattern) = selector_pattern(selector) {
            let re = Regex::new(&pattern)
                .map_err(|e| format!("selector `{selector}`: {e}"))?;
            text = re.replace_all(&text, " ").into_owned();
        }
    }

    let mut text = TAG.replace_all(&text, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }

    Ok(normalize_whitespace(&text, options.preserve_whitespace))
}

/// Build a best-effort removal regex for a selector, or `None` to skip it.
///
/// Tag selectors remove matched paired elements including content. Class
/// selectors match the class attribute of the opening tag and remove up to
/// the next closing tag (the regex crate has no backreferences, so the
/// closing tag name cannot be matched to the opening one — acceptable for
/// the shallow boilerplate wrappers this targets).
fn selector_pattern(selector: &str) -> Option<String> {
    if selector.contains('[') {
        // Attribute selectors: DOM tier only.
        return None;
    }
    if let Some(class) = selector.strip_prefix('.') {
        let class = regex::escape(class);
        return Some(format!(
            r#"(?is)<[a-z][a-z0-9]*\b[^>]*class="[^"]*{class}[^"]*"[^>]*>.*?</[a-z][a-z0-9]*>"#
        ));
    }
    let tag = regex::escape(selector);
    Some(format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_blocks_wholesale() {
        let html = "<script>evil()</script><p>Safe text</p>";
        let text = extract(html, &ExtractOptions::default()).unwrap();
        assert!(text.contains("Safe text"));
        assert!(!text.contains("evil()"));
    }

    #[test]
    fn strips_multiline_style_blocks() {
        let html = "<style>\n.a { color: red; }\n</style><p>Body</p>";
        let text = extract(html, &ExtractOptions::default()).unwrap();
        assert_eq!(text, "Body");
    }

    #[test]
    fn removes_elements_by_class_attribute() {
        let html = r#"<div class="unsubscribe">Click to unsubscribe</div><p>Content</p>"#;
        let text = extract(html, &ExtractOptions::default()).unwrap();
        assert!(text.contains("Content"));
        assert!(!text.contains("unsubscribe"));
    }

    #[test]
    fn attribute_selectors_are_skipped_not_errors() {
        let html = r#"<a href="https://x.test/unsubscribe">bye</a><p>Keep</p>"#;
        // Newsletter preset includes an attribute selector; it must be
        // ignored here rather than failing the tier.
        let text = extract(html, &ExtractOptions::newsletter()).unwrap();
        assert!(text.contains("Keep"));
    }

    #[test]
    fn decodes_common_entities() {
        let html = "<p>Fish &amp; Chips &#39;n&#39; more&hellip;</p>";
        let text = extract(html, &ExtractOptions::default()).unwrap();
        assert_eq!(text, "Fish & Chips 'n' more\u{2026}");
    }

    #[test]
    fn unknown_entities_pass_through() {
        let html = "<p>&copy; 2026</p>";
        let text = extract(html, &ExtractOptions::default()).unwrap();
        assert_eq!(text, "&copy; 2026");
    }
}
