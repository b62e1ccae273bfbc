// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lettermine newsletter-intelligence pipeline.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Lettermine workspace. The ingestion
//! connector consumes its collaborators (mail provider, record store,
//! extraction stage) exclusively through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LettermineError;
pub use types::{
    CompanyMention, Extraction, ExtractionMetadata, IngestStats, MailHeader, MailMessage,
    MailProfile, MessagePage, MessagePart, MessageRef, NewsletterCount, ProcessedEmail,
    Sentiment, StoredEmail,
};

// Re-export all adapter traits at crate root.
pub use traits::{CompanyExtractor, EmailStore, MailProvider};
