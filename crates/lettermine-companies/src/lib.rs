// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Company name normalization and mention deduplication.
//!
//! [`normalize`] derives a canonical comparison key from a company name:
//! case-insensitive, punctuation-insensitive, a single contiguous token.
//! The key is comparison-only; it is never stored or displayed.
//!
//! [`deduplicate`] collapses a mention list by normalized name, keeping the
//! first occurrence of each key verbatim.

use std::collections::HashSet;

use lettermine_core::CompanyMention;

/// Anything carrying a company name, for deduplication purposes.
pub trait CompanyNamed {
    fn company_name(&self) -> &str;
}

impl CompanyNamed for CompanyMention {
    fn company_name(&self) -> &str {
        &self.name
    }
}

/// Derives the canonical comparison key for a company name.
///
/// Lowercases, then keeps only alphanumeric characters. Unicode letters
/// (CJK, accented Latin) survive; the stripping targets ASCII punctuation
/// and spacing noise, not non-Latin scripts. Legal suffixes like "Inc." are
/// not treated specially, so `"Glossier"` and `"Glossier Inc."` collide
/// while `"23&Me"` (`23me`) and `"23 and Me"` (`23andme`) do not.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Removes later duplicates from a mention list.
///
/// Single left-to-right pass: an item is emitted the first time its
/// normalized name is seen and skipped thereafter, discarding any "more
/// complete" data the duplicates might carry. Relative order of first
/// occurrences is preserved. O(n) time, O(n) auxiliary space, idempotent.
pub fn deduplicate<T: CompanyNamed>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(normalize(item.company_name())))
        .collect()
}
