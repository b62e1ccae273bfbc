// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Total HTML-to-text extraction for newsletter bodies.
//!
//! Extraction runs a three-tier cascade: a structured DOM parse with
//! boilerplate selector removal, then regex-based tag stripping, then a
//! greedy single-pass strip. A tier's output is accepted when it yields
//! enough text to be worth keeping; the final tier accepts anything, so
//! [`HtmlExtractor::parse`] always returns a result.

mod brute;
mod dom;
mod options;
mod regex_fallback;
mod result;
mod text;

use std::time::Instant;

use tracing::{debug, warn};

pub use crate::options::{
    DEFAULT_MAX_LENGTH, DEFAULT_REMOVE_SELECTORS, ExtractOptions, NEWSLETTER_REMOVE_SELECTORS,
};
pub use crate::result::{ParseMethod, ParseResult};
pub use crate::text::normalize_whitespace;

/// A tier must yield at least this much text to win; shorter output means
/// the parse likely ate the content along with the boilerplate.
const MIN_VIABLE_LENGTH: usize = 50;

/// Parses beyond this duration are logged as slow.
const SLOW_PARSE_MILLIS: u128 = 1_000;

/// HTML-to-text extractor running the tier cascade.
#[derive(Debug, Clone, Default)]
pub struct HtmlExtractor {
    options: ExtractOptions,
}

impl HtmlExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extractor tuned for Substack-style newsletter HTML.
    pub fn newsletter() -> Self {
        Self::new(ExtractOptions::newsletter())
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract readable text from `html`.
    ///
    /// Never fails: each tier is tried in order and the first to produce a
    /// viable amount of text wins; the brute-force tier accepts whatever is
    /// left. `success` reports whether any text at all came out.
    pub fn parse(&self, html: &str) -> ParseResult {
        let started = Instant::now();
        let input = truncated(html, self.options.max_length);
        if input.len() < html.len() {
            debug!(
                original_len = html.len(),
                truncated_len = input.len(),
                "input truncated before parse"
            );
        }

        let tiers: [(ParseMethod, TierFn); 3] = [
            (ParseMethod::Dom, dom::extract),
            (ParseMethod::Regex, regex_fallback::extract),
            (ParseMethod::BruteForce, brute::extract),
        ];

        let mut last_error = None;
        let mut outcome = None;
        for (method, tier) in tiers {
            match tier(input, &self.options) {
                Ok(text) if text.len() >= MIN_VIABLE_LENGTH => {
                    outcome = Some((method, text));
                    break;
                }
                Ok(text) if method == ParseMethod::BruteForce => {
                    // Last tier: accept whatever came out.
                    outcome = Some((method, text));
                }
                Ok(text) => {
                    debug!(
                        %method,
                        output_len = text.len(),
                        "tier output below viability floor, escalating"
                    );
                }
                Err(e) => {
                    debug!(%method, error = %e, "tier failed, escalating");
                    last_error = Some(e);
                }
            }
        }
        // The brute tier is infallible, so outcome is always set by the
        // loop; the empty-string arm covers the type system.
        let (method, text) = outcome.unwrap_or((ParseMethod::BruteForce, String::new()));

        let elapsed = started.elapsed();
        if elapsed.as_millis() > SLOW_PARSE_MILLIS {
            warn!(
                %method,
                elapsed_ms = elapsed.as_millis() as u64,
                input_len = input.len(),
                "slow html parse"
            );
        }
        debug!(
            %method,
            elapsed_ms = elapsed.as_millis() as u64,
            input_len = input.len(),
            output_len = text.len(),
            ratio = compression_ratio(input.len(), text.len()),
            selectors = self.options.remove_selectors.len(),
            "html parse complete"
        );

        ParseResult {
            success: !text.is_empty(),
            text,
            method,
            error: last_error,
        }
    }
}

type TierFn = fn(&str, &ExtractOptions) -> Result<String, String>;

/// Output bytes per input byte; 0.0 for empty input.
fn compression_ratio(input_len: usize, output_len: usize) -> f64 {
    if input_len == 0 {
        return 0.0;
    }
    output_len as f64 / input_len as f64
}

/// Truncate at a char boundary at or below `max_length` bytes.
fn truncated(html: &str, max_length: usize) -> &str {
    if html.len() <= max_length {
        return html;
    }
    let mut end = max_length;
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    &html[..end]
}

/// Extract the readable body of a newsletter email with the newsletter
/// selector preset applied.
pub fn parse_newsletter(html: &str) -> ParseResult {
    HtmlExtractor::newsletter().parse(html)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const ARTICLE: &str = r#"
        <html><body>
          <div class="newsletter-header">My Newsletter</div>
          <p>Glossier announced a new funding round this week, raising
             eighty million dollars to expand its retail footprint.</p>
          <div class="subscribe-prompt">Subscribe now!</div>
          <a href="https://example.test/unsubscribe?u=1">Unsubscribe</a>
        </body></html>"#;

    #[test]
    fn dom_tier_wins_on_well_formed_html() {
        let result = parse_newsletter(ARTICLE);
        assert!(result.success);
        assert_eq!(result.method, ParseMethod::Dom);
        assert!(result.text.contains("Glossier announced"));
        assert!(!result.text.contains("Subscribe now"));
        assert!(!result.text.contains("Unsubscribe"));
    }

    #[test]
    fn script_content_never_reaches_output() {
        let html = "<html><body><script>track(document.cookie)</script>\
            <p>The quick brown fox jumps over the lazy dog near the river bank.</p>\
            </body></html>";
        let result = HtmlExtractor::default().parse(html);
        assert!(result.success);
        assert!(!result.text.contains("track("));
        assert!(result.text.contains("quick brown fox"));
    }

    #[test]
    fn short_output_escalates_past_the_dom_tier() {
        // Everything in the body matches a removal selector, so the DOM
        // tier comes back under the viability floor and the cascade keeps
        // going until the brute tier accepts the near-empty remainder.
        let html = r#"<body><nav>a</nav><footer>b</footer></body>"#;
        let result = HtmlExtractor::default().parse(html);
        assert_eq!(result.method, ParseMethod::BruteForce);
    }

    #[test]
    fn compression_ratio_is_output_over_input() {
        assert_eq!(compression_ratio(200, 50), 0.25);
        assert_eq!(compression_ratio(100, 100), 1.0);
        assert_eq!(compression_ratio(0, 0), 0.0);
    }

    #[test]
    fn empty_input_is_unsuccessful_but_returns() {
        let result = HtmlExtractor::default().parse("");
        assert!(!result.success);
        assert_eq!(result.text, "");
    }

    #[test]
    fn oversized_input_is_truncated() {
        let mut html = String::from("<body><p>");
        html.push_str(&"word ".repeat(40_000));
        html.push_str("</p></body>");
        let extractor = HtmlExtractor::new(ExtractOptions::default().with_max_length(10_000));
        let result = extractor.parse(&html);
        assert!(result.success);
        assert!(result.text.len() <= 10_000);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let html = format!("<body><p>{}</p></body>", "é".repeat(200));
        let extractor = HtmlExtractor::new(ExtractOptions::default().with_max_length(101));
        // Must not panic slicing mid-codepoint.
        let _ = extractor.parse(&html);
    }

    proptest! {
        #[test]
        fn parse_is_total(input in ".{0,2000}") {
            let result = HtmlExtractor::default().parse(&input);
            prop_assert_eq!(result.success, !result.text.is_empty());
        }
    }

    #[test]
    fn parse_is_total_on_large_binaryish_blob() {
        let blob: String = (0..100_000u32)
            .map(|i| char::from_u32(33 + (i % 90)).unwrap_or('x'))
            .collect();
        let result = HtmlExtractor::default().parse(&blob);
        assert_eq!(result.success, !result.text.is_empty());
    }
}
