// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable record store trait for email persistence and stats aggregation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::LettermineError;
use crate::types::{NewsletterCount, StoredEmail};

/// Persistence backend for ingested emails.
///
/// Writes go through an upsert keyed on `message_id`, so re-running
/// ingestion for the same window is idempotent at the storage layer.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Inserts or updates the given rows, keyed on `message_id`.
    /// Must never fail on a key conflict.
    async fn upsert_emails(&self, emails: &[StoredEmail]) -> Result<(), LettermineError>;

    /// Total number of stored emails.
    async fn count_emails(&self) -> Result<u64, LettermineError>;

    /// Number of stored emails received at or after `since`.
    async fn count_emails_since(&self, since: DateTime<Utc>)
    -> Result<u64, LettermineError>;

    /// The most frequent newsletters among emails received at or after
    /// `since`, ordered by descending count.
    async fn top_newsletters_since(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<NewsletterCount>, LettermineError>;
}
