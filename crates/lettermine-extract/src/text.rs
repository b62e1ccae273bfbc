// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whitespace normalization shared by all cascade tiers.

/// Collapse whitespace in extracted text.
///
/// With `preserve_lines`, runs of spaces/tabs collapse within each line and
/// blank-line runs collapse to a single blank line; otherwise all whitespace
/// runs collapse to single spaces. The result is trimmed either way.
pub fn normalize_whitespace(text: &str, preserve_lines: bool) -> String {
    if preserve_lines {
        let mut out = String::with_capacity(text.len());
        let mut blank_run = 0usize;
        for line in text.lines() {
            let collapsed = collapse_spaces(line);
            if collapsed.is_empty() {
                blank_run += 1;
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
                if blank_run > 0 {
                    out.push('\n');
                }
            }
            out.push_str(&collapsed);
            blank_run = 0;
        }
        out
    } else {
        collapse_spaces(text)
    }
}

/// Collapse every whitespace run to a single space and trim.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            in_space = true;
        } else {
            if in_space && !out.is_empty() {
                out.push(' ');
            }
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_to_single_spaces() {
        assert_eq!(
            normalize_whitespace("a  b\t\tc\n\nd", false),
            "a b c d"
        );
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize_whitespace("   hello   ", false), "hello");
        assert_eq!(normalize_whitespace("\n\n", false), "");
    }

    #[test]
    fn preserve_lines_collapses_blank_runs() {
        let input = "para one\n\n\n\npara  two\n";
        assert_eq!(
            normalize_whitespace(input, true),
            "para one\n\npara two"
        );
    }
}
