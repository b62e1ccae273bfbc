// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mail provider trait for message search, fetch, and profile lookup.

use async_trait::async_trait;

use crate::error::LettermineError;
use crate::types::{MailMessage, MailProfile, MessagePage};

/// A remote mailbox the connector can search and fetch from.
///
/// Implementations must map "account lacks the required capability"
/// responses (API not enabled, forbidden) to
/// [`LettermineError::Capability`] so the connector can surface a
/// user-actionable error instead of a generic failure.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Fetches one page of message references matching `query`.
    ///
    /// `page_token` is the opaque continuation token from the previous page,
    /// or `None` for the first page.
    async fn search(
        &self,
        query: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<MessagePage, LettermineError>;

    /// Fetches the full detail of a single message.
    async fn get_message(&self, id: &str) -> Result<MailMessage, LettermineError>;

    /// Fetches the account profile. Used as a lightweight connectivity probe.
    async fn get_profile(&self) -> Result<MailProfile, LettermineError>;
}
