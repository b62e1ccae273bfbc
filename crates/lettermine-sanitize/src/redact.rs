// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pattern-based redaction of sensitive substrings.
//!
//! Four pattern classes, applied in sequence: email addresses, phone
//! numbers, SSN shapes, and credit-card shapes. The classes are mutually
//! exclusive by shape, so application order does not create overlap issues.

use std::sync::LazyLock;

use regex::Regex;

/// Email addresses. The local part is masked; the domain survives so the
/// newsletter source remains recognizable in stored text.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@([A-Za-z0-9.\-]+\.[A-Za-z]{2,})")
        .unwrap_or_else(|e| panic!("email pattern: {e}"))
});

/// US phone numbers: 10 digits with optional parens and `-`/`.`/space separators.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .unwrap_or_else(|e| panic!("phone pattern: {e}"))
});

/// SSN shapes: ###-##-####.
static SSN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap_or_else(|e| panic!("ssn pattern: {e}"))
});

/// Credit-card shapes: four groups of four digits, separators optional.
static CREDIT_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b")
        .unwrap_or_else(|e| panic!("credit card pattern: {e}"))
});

/// Redact sensitive substrings from free text.
///
/// Applies each pattern class independently and unconditionally. Invalid or
/// empty input is returned unchanged; this function has no failure mode.
pub fn redact(text: &str) -> String {
    let result = EMAIL.replace_all(text, "***@$1");
    let result = CREDIT_CARD.replace_all(&result, "****-****-****-****");
    let result = SSN.replace_all(&result, "***-**-****");
    let result = PHONE.replace_all(&result, "***-***-****");
    result.into_owned()
}
