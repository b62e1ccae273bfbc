// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction options and boilerplate selector presets.

/// Default cap on input length. Oversized HTML is truncated before parsing
/// to bound parse latency and memory on pathological inputs.
pub const DEFAULT_MAX_LENGTH: usize = 50_000;

/// Elements stripped before text extraction in every parse.
pub const DEFAULT_REMOVE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "iframe",
    "nav",
    "footer",
    "header",
    ".unsubscribe",
    ".social-links",
    ".share-buttons",
];

/// Additional boilerplate stripped by the newsletter preset: subscription
/// prompts, social blocks, sponsor slots, and unsubscribe links.
pub const NEWSLETTER_REMOVE_SELECTORS: &[&str] = &[
    ".newsletter-header",
    ".newsletter-footer",
    ".subscribe-prompt",
    ".subscription-widget",
    ".social-media",
    ".advertisement",
    ".sponsor",
    "a[href*=\"unsubscribe\"]",
];

/// Options controlling one extraction call.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Element selectors to remove before extracting text. Tag and class
    /// selectors work in every tier; attribute selectors only apply in the
    /// DOM tier (the regex tier skips them as too unreliable).
    pub remove_selectors: Vec<String>,
    /// Keep line structure instead of collapsing all whitespace runs.
    pub preserve_whitespace: bool,
    /// Truncate input beyond this many characters before parsing.
    pub max_length: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            remove_selectors: DEFAULT_REMOVE_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            preserve_whitespace: false,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ExtractOptions {
    /// The default set extended with newsletter-specific boilerplate.
    pub fn newsletter() -> Self {
        let mut options = Self::default();
        options.remove_selectors.extend(
            NEWSLETTER_REMOVE_SELECTORS
                .iter()
                .map(|s| s.to_string()),
        );
        options
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newsletter_preset_extends_defaults() {
        let defaults = ExtractOptions::default();
        let newsletter = ExtractOptions::newsletter();
        assert!(newsletter.remove_selectors.len() > defaults.remove_selectors.len());
        assert!(newsletter.remove_selectors.iter().any(|s| s == "script"));
        assert!(
            newsletter
                .remove_selectors
                .iter()
                .any(|s| s == ".subscribe-prompt")
        );
    }
}
