// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Lettermine adapter traits and pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One ingested newsletter message, fully processed and ready for persistence.
///
/// Instances are created in-memory per fetched message and never mutated
/// afterwards. Re-fetching the same message produces a new transient instance
/// that overwrites the stored row via upsert on `message_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedEmail {
    /// Internal identifier assigned at processing time.
    pub id: String,
    /// Provider message ID. The natural key for storage upserts.
    pub message_id: String,
    pub subject: String,
    pub sender: String,
    /// Newsletter display name derived from the sender string.
    pub newsletter_name: String,
    /// Raw HTML body as decoded from the provider.
    pub html: String,
    /// Cleaned plain text. Always non-empty and at least the content floor.
    pub text: String,
    pub received_at: DateTime<Utc>,
    pub processed_at: DateTime<Utc>,
}

/// A persistence-ready email row with bookkeeping fields initialized.
///
/// Built by the connector from a sanitized [`ProcessedEmail`] just before
/// upsert; `processing_status` and `extraction_status` start as `"pending"`
/// and `extraction_attempts` starts at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEmail {
    pub message_id: String,
    pub subject: String,
    pub sender: String,
    pub newsletter_name: String,
    pub raw_html: String,
    pub clean_text: String,
    pub received_at: DateTime<Utc>,
    pub processed_at: DateTime<Utc>,
    pub processing_status: String,
    pub extraction_status: String,
    pub extraction_attempts: i64,
}

impl StoredEmail {
    /// Builds a storage row from a processed email with fresh bookkeeping state.
    pub fn pending(email: &ProcessedEmail) -> Self {
        Self {
            message_id: email.message_id.clone(),
            subject: email.subject.clone(),
            sender: email.sender.clone(),
            newsletter_name: email.newsletter_name.clone(),
            raw_html: email.html.clone(),
            clean_text: email.text.clone(),
            received_at: email.received_at,
            processed_at: email.processed_at,
            processing_status: "pending".to_string(),
            extraction_status: "pending".to_string(),
            extraction_attempts: 0,
        }
    }
}

/// A lightweight reference to a message, as returned by a provider search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRef {
    pub id: String,
}

/// One page of search results from a mail provider.
///
/// `next_page_token` is an opaque continuation token; `None` means the
/// result set is exhausted. An empty-string token is never produced.
#[derive(Debug, Clone, Default)]
pub struct MessagePage {
    pub messages: Vec<MessageRef>,
    pub next_page_token: Option<String>,
}

/// A full message as fetched from a mail provider.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub id: String,
    pub payload: MessagePart,
}

/// One node of a message's MIME part tree.
///
/// `body` holds the provider's base64url-encoded content when present.
/// Real-world nesting is shallow; traversal caps recursion depth defensively.
#[derive(Debug, Clone, Default)]
pub struct MessagePart {
    pub mime_type: String,
    pub headers: Vec<MailHeader>,
    pub body: Option<String>,
    pub parts: Vec<MessagePart>,
}

/// A single message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailHeader {
    pub name: String,
    pub value: String,
}

/// Minimal account profile used for connectivity checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailProfile {
    pub email_address: String,
}

/// Aggregate ingestion statistics computed from the persisted store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestStats {
    pub total_emails: u64,
    pub emails_last_week: u64,
    pub top_newsletters: Vec<NewsletterCount>,
}

/// Newsletter name with its message frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterCount {
    pub name: String,
    pub count: u64,
}

/// Sentiment attached to a company mention by the extraction stage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// One company mention produced by the extraction stage.
///
/// Deduplication equality is defined by the normalized form of `name`, never
/// by the raw string or any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMention {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub confidence: f64,
}

/// Output of one extraction call.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub companies: Vec<CompanyMention>,
    pub metadata: ExtractionMetadata,
}

/// Metadata describing how an extraction was produced.
#[derive(Debug, Clone, Default)]
pub struct ExtractionMetadata {
    pub model: String,
    pub source_name: String,
    pub input_chars: usize,
}
