// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PII redaction for newsletter content before persistence.
//!
//! Newsletter bodies occasionally carry reader-submitted contact details.
//! [`redact`] masks them with fixed placeholders before anything is written
//! to the store. Pure and total: text matching no pattern passes through
//! byte-identical.

pub mod redact;

pub use redact::redact;
