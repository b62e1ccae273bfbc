// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The daily ingestion connector.
//!
//! Pulls Substack newsletter emails for a date window, cleans them through
//! the extraction cascade, sanitizes PII, and persists the batch. Individual
//! message failures are logged and dropped; persistence failures and
//! rate-limit denials abort the run.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::StreamExt;
use futures::stream;
use lettermine_core::{
    EmailStore, IngestStats, LettermineError, MailProvider, MessagePart, ProcessedEmail,
    StoredEmail,
};
use lettermine_extract::HtmlExtractor;
use lettermine_limiter::BurstLimiter;
use lettermine_sanitize::redact;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::mime;
use crate::newsletter::infer_newsletter_name;

/// Rate-limit operation name for full ingestion runs.
const FETCH_OPERATION: &str = "daily-fetch";

/// Window used for the last-7-days stat.
const STATS_WEEK_DAYS: i64 = 7;

/// Window and cap for the top-newsletters stat.
const STATS_TOP_DAYS: i64 = 30;
const STATS_TOP_LIMIT: u32 = 10;

/// Tuning knobs for the connector.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Sender domain the search query is scoped to.
    pub sender_domain: String,
    /// Page size for message listing.
    pub page_size: u32,
    /// Concurrent message fetches per run.
    pub max_concurrency: usize,
    /// Cleaned text shorter than this is dropped as boilerplate-only.
    pub min_content_length: usize,
    /// Ingestion runs allowed per rate-limit window.
    pub fetch_limit: u32,
    /// Rate-limit window, e.g. `"1h"`.
    pub fetch_window: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sender_domain: "substack.com".to_string(),
            page_size: 100,
            max_concurrency: 5,
            min_content_length: 100,
            fetch_limit: 5,
            fetch_window: "1h".to_string(),
        }
    }
}

/// Orchestrates fetch, clean, sanitize, and persist for one mailbox.
pub struct Ingestor {
    provider: Arc<dyn MailProvider>,
    store: Arc<dyn EmailStore>,
    limiter: BurstLimiter,
    extractor: HtmlExtractor,
    options: IngestOptions,
}

impl Ingestor {
    /// The caller constructs and owns the limiter so its budget can be
    /// shared with other operations against the same mailbox.
    pub fn new(
        provider: Arc<dyn MailProvider>,
        store: Arc<dyn EmailStore>,
        limiter: BurstLimiter,
        options: IngestOptions,
    ) -> Self {
        Self {
            provider,
            store,
            limiter,
            extractor: HtmlExtractor::newsletter(),
            options,
        }
    }

    /// Fetch, process, and persist all newsletter emails received in the
    /// last `days_back` days. Returns the persisted batch.
    pub async fn fetch_daily(
        &self,
        days_back: i64,
    ) -> Result<Vec<ProcessedEmail>, LettermineError> {
        self.fetch_daily_with_cancel(days_back, CancellationToken::new())
            .await
    }

    /// As [`fetch_daily`](Self::fetch_daily), stopping early (without error)
    /// once `cancel` fires. Messages already processed are still persisted.
    pub async fn fetch_daily_with_cancel(
        &self,
        days_back: i64,
        cancel: CancellationToken,
    ) -> Result<Vec<ProcessedEmail>, LettermineError> {
        if !self.limiter.check(
            "default",
            FETCH_OPERATION,
            self.options.fetch_limit,
            &self.options.fetch_window,
        ) {
            return Err(LettermineError::RateLimited {
                operation: FETCH_OPERATION.to_string(),
                identifier: "default".to_string(),
            });
        }

        let query = self.build_query(days_back, Utc::now());
        debug!(%query, "searching mailbox");

        let refs = self.collect_refs(&query, &cancel).await?;
        info!(messages = refs.len(), days_back, "message listing complete");

        let processed: Vec<ProcessedEmail> = stream::iter(refs)
            .map(|r| {
                let cancel = cancel.clone();
                async move {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    self.process_message(&r.id).await
                }
            })
            .buffer_unordered(self.options.max_concurrency)
            .filter_map(|item| async move { item })
            .collect()
            .await;

        let sanitized: Vec<ProcessedEmail> = processed.into_iter().map(sanitize_email).collect();
        let rows: Vec<StoredEmail> = sanitized.iter().map(StoredEmail::pending).collect();
        if let Err(e) = self.store.upsert_emails(&rows).await {
            warn!(error = %e, batch = rows.len(), "persisting ingested batch failed");
            return Err(e);
        }

        info!(persisted = sanitized.len(), "ingestion run complete");
        Ok(sanitized)
    }

    /// One profile call as a connectivity probe. Never fails; errors are
    /// logged and reported as `false`.
    pub async fn test_connection(&self) -> bool {
        match self.provider.get_profile().await {
            Ok(profile) => {
                debug!(email = %profile.email_address, "mailbox reachable");
                true
            }
            Err(e) => {
                warn!(error = %e, "mailbox connectivity check failed");
                false
            }
        }
    }

    /// Aggregate mailbox stats. Query failures degrade to zeroed defaults
    /// rather than propagating.
    pub async fn stats(&self) -> IngestStats {
        let now = Utc::now();
        let week_ago = now - Duration::days(STATS_WEEK_DAYS);
        let month_ago = now - Duration::days(STATS_TOP_DAYS);

        let total_emails = self.store.count_emails().await.unwrap_or_else(|e| {
            warn!(error = %e, "total count query failed");
            0
        });
        let emails_last_week = self
            .store
            .count_emails_since(week_ago)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "weekly count query failed");
                0
            });
        let top_newsletters = self
            .store
            .top_newsletters_since(month_ago, STATS_TOP_LIMIT)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "top newsletters query failed");
                vec![]
            });

        IngestStats {
            total_emails,
            emails_last_week,
            top_newsletters,
        }
    }

    /// Search query scoped to the sender domain and the date window
    /// `[now - days_back, tomorrow)`, excluding spam and trash.
    fn build_query(&self, days_back: i64, now: DateTime<Utc>) -> String {
        let after = (now - Duration::days(days_back)).format("%Y/%m/%d");
        let before = (now + Duration::days(1)).format("%Y/%m/%d");
        format!(
            "from:{} after:{after} before:{before} -in:spam -in:trash",
            self.options.sender_domain
        )
    }

    /// Walk the paginated listing to completion, or until `cancel` fires
    /// between pages. A failure on any page aborts the run; capability
    /// errors propagate as such.
    async fn collect_refs(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<lettermine_core::MessageRef>, LettermineError> {
        let mut refs = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            if cancel.is_cancelled() {
                info!(collected = refs.len(), "listing cancelled, stopping pagination");
                break;
            }
            let page = self
                .provider
                .search(query, page_token.as_deref(), self.options.page_size)
                .await?;
            refs.extend(page.messages);
            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }
        Ok(refs)
    }

    /// Fetch and clean one message. Any failure is logged and collapses to
    /// `None` so a bad message never aborts the batch.
    async fn process_message(&self, id: &str) -> Option<ProcessedEmail> {
        let message = match self.provider.get_message(id).await {
            Ok(m) => m,
            Err(e) => {
                warn!(message_id = id, error = %e, "message fetch failed, skipping");
                return None;
            }
        };

        let subject = header_value(&message.payload, "Subject")
            .unwrap_or_else(|| "No Subject".to_string());
        let sender =
            header_value(&message.payload, "From").unwrap_or_else(|| "Unknown Sender".to_string());
        let received_at = header_value(&message.payload, "Date")
            .and_then(|d| DateTime::parse_from_rfc2822(&d).ok())
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);
        let newsletter_name = infer_newsletter_name(&sender);

        let html = match mime::find_html_body(&message.payload) {
            Some(html) => html,
            None => {
                warn!(message_id = id, "no decodable body, skipping");
                return None;
            }
        };

        let parsed = self.extractor.parse(&html);
        if !parsed.success || parsed.text.len() < self.options.min_content_length {
            debug!(
                message_id = id,
                newsletter = %newsletter_name,
                text_len = parsed.text.len(),
                "content below floor, skipping"
            );
            return None;
        }

        Some(ProcessedEmail {
            id: Uuid::new_v4().to_string(),
            message_id: message.id,
            subject,
            sender,
            newsletter_name,
            html,
            text: parsed.text,
            received_at,
            processed_at: Utc::now(),
        })
    }
}

/// Case-insensitive header lookup on the top-level payload.
fn header_value(payload: &MessagePart, name: &str) -> Option<String> {
    payload
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.clone())
}

/// Redact PII from every user-visible field before persistence.
fn sanitize_email(mut email: ProcessedEmail) -> ProcessedEmail {
    email.subject = redact(&email.subject);
    email.sender = redact(&email.sender);
    email.html = redact(&email.html);
    email.text = redact(&email.text);
    email
}

#[cfg(test)]
mod tests {
    use super::*;
    use lettermine_test_utils::builders::{html_message, long_html, multipart_message, page};
    use lettermine_test_utils::{MemoryEmailStore, MockMailProvider};

    const DATE: &str = "Mon, 17 Aug 2026 08:00:00 +0000";
    const SENDER: &str = "Platformer <casey@platformer.substack.com>";

    fn ingestor(
        provider: Arc<MockMailProvider>,
        store: Arc<MemoryEmailStore>,
        options: IngestOptions,
    ) -> Ingestor {
        Ingestor::new(provider, store, BurstLimiter::new(), options)
    }

    fn seed_messages(provider: &MockMailProvider, ids: &[&str]) {
        for id in ids {
            provider.add_message(html_message(id, "Daily issue", SENDER, DATE, &long_html(id)));
        }
    }

    #[tokio::test]
    async fn paginates_to_completion_and_persists_all() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        let ids: Vec<String> = (0..217).map(|i| format!("m{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        provider.push_page(page(&id_refs[..100], Some("t1")));
        provider.push_page(page(&id_refs[100..200], Some("t2")));
        provider.push_page(page(&id_refs[200..], None));
        seed_messages(&provider, &id_refs);

        let ing = ingestor(provider.clone(), store.clone(), IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();

        assert_eq!(processed.len(), 217);
        assert_eq!(provider.search_calls(), 3);
        assert_eq!(store.count_emails().await.unwrap(), 217);
    }

    #[tokio::test]
    async fn a_failing_message_is_dropped_not_fatal() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        let ids: Vec<String> = (0..10).map(|i| format!("m{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        provider.push_page(page(&id_refs, None));
        seed_messages(&provider, &id_refs);
        provider.fail_message("m3");

        let ing = ingestor(provider, store.clone(), IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();

        assert_eq!(processed.len(), 9);
        assert!(store.get("m3").is_none());
    }

    #[tokio::test]
    async fn short_content_is_dropped_below_the_floor() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        provider.push_page(page(&["tiny", "full"], None));
        provider.add_message(html_message(
            "tiny",
            "s",
            SENDER,
            DATE,
            "<p>too short</p>",
        ));
        provider.add_message(html_message("full", "s", SENDER, DATE, &long_html("full")));

        let ing = ingestor(provider, store.clone(), IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();

        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].message_id, "full");
    }

    #[tokio::test]
    async fn rate_limit_denial_makes_no_remote_calls() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        let options = IngestOptions {
            fetch_limit: 1,
            ..IngestOptions::default()
        };

        provider.push_page(page(&[], None));
        let ing = ingestor(provider.clone(), store, options);
        ing.fetch_daily(1).await.unwrap();

        let err = ing.fetch_daily(1).await.unwrap_err();
        assert!(matches!(err, LettermineError::RateLimited { .. }));
        assert_eq!(provider.search_calls(), 1);
    }

    #[tokio::test]
    async fn store_failure_is_fatal() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        store.fail_writes();

        provider.push_page(page(&["m1"], None));
        seed_messages(&provider, &["m1"]);

        let ing = ingestor(provider, store, IngestOptions::default());
        let err = ing.fetch_daily(1).await.unwrap_err();
        assert!(matches!(err, LettermineError::Storage { .. }));
    }

    #[tokio::test]
    async fn persisted_rows_start_pending_and_sanitized() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        let html = format!(
            "<html><body><p>Reach the author at author@example.com for deal flow. {} </p></body></html>",
            "The round was covered extensively across several tech outlets this week."
        );
        provider.push_page(page(&["m1"], None));
        provider.add_message(html_message("m1", "Intro", SENDER, DATE, &html));

        let ing = ingestor(provider, store.clone(), IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();

        assert!(processed[0].text.contains("***@example.com"));
        let row = store.get("m1").unwrap();
        assert_eq!(row.processing_status, "pending");
        assert_eq!(row.extraction_status, "pending");
        assert_eq!(row.extraction_attempts, 0);
        assert!(row.clean_text.contains("***@example.com"));
    }

    #[tokio::test]
    async fn multipart_messages_use_the_html_part() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        provider.push_page(page(&["m1"], None));
        provider.add_message(multipart_message(
            "m1",
            "Issue",
            SENDER,
            DATE,
            "plain text fallback",
            &long_html("Acme"),
        ));

        let ing = ingestor(provider, store, IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();
        assert_eq!(processed.len(), 1);
        assert!(processed[0].text.contains("Acme"));
        assert!(!processed[0].text.contains("plain text fallback"));
    }

    #[tokio::test]
    async fn header_defaults_apply_when_missing() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        let mut message = html_message("m1", "x", "x", DATE, &long_html("m1"));
        message.payload.headers.clear();
        provider.push_page(page(&["m1"], None));
        provider.add_message(message);

        let ing = ingestor(provider, store, IngestOptions::default());
        let processed = ing.fetch_daily(1).await.unwrap();

        assert_eq!(processed[0].subject, "No Subject");
        assert_eq!(processed[0].sender, "Unknown Sender");
    }

    #[tokio::test]
    async fn cancellation_stops_processing_without_error() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        let ids: Vec<String> = (0..20).map(|i| format!("m{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        provider.push_page(page(&id_refs, None));
        seed_messages(&provider, &id_refs);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let ing = ingestor(provider, store, IngestOptions::default());
        let processed = ing.fetch_daily_with_cancel(1, cancel).await.unwrap();
        assert!(processed.is_empty());
    }

    #[tokio::test]
    async fn cancellation_stops_pagination_before_the_next_page() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());

        provider.push_page(page(&["m1"], Some("t1")));
        provider.push_page(page(&["m2"], Some("t2")));
        provider.push_page(page(&["m3"], None));
        seed_messages(&provider, &["m1", "m2", "m3"]);

        let cancel = CancellationToken::new();
        cancel.cancel();
        let ing = ingestor(provider.clone(), store.clone(), IngestOptions::default());
        let processed = ing.fetch_daily_with_cancel(1, cancel).await.unwrap();

        assert!(processed.is_empty());
        assert_eq!(provider.search_calls(), 0);
        assert_eq!(store.count_emails().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn limiter_budget_is_shared_with_the_caller() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        let options = IngestOptions {
            fetch_limit: 1,
            ..IngestOptions::default()
        };

        // The caller spends the whole budget before handing the limiter over.
        let limiter = BurstLimiter::new();
        assert!(limiter.check("default", FETCH_OPERATION, 1, "1h"));

        let ing = Ingestor::new(provider.clone(), store, limiter, options);
        let err = ing.fetch_daily(1).await.unwrap_err();
        assert!(matches!(err, LettermineError::RateLimited { .. }));
        assert_eq!(provider.search_calls(), 0);
    }

    #[tokio::test]
    async fn query_covers_the_requested_window() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        let ing = ingestor(provider, store, IngestOptions::default());

        let now = DateTime::parse_from_rfc3339("2026-08-20T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            ing.build_query(3, now),
            "from:substack.com after:2026/08/17 before:2026/08/21 -in:spam -in:trash"
        );
    }

    #[tokio::test]
    async fn test_connection_reports_failures_as_false() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        let ing = ingestor(provider.clone(), store, IngestOptions::default());

        assert!(ing.test_connection().await);
        provider.fail_profile(LettermineError::Capability {
            message: "not enabled".into(),
        });
        assert!(!ing.test_connection().await);
    }

    #[tokio::test]
    async fn stats_degrade_to_zeroed_defaults_on_failure() {
        let provider = Arc::new(MockMailProvider::new());
        let store = Arc::new(MemoryEmailStore::new());
        store.fail_writes();

        // MemoryEmailStore only fails writes, so exercise the happy path
        // here and the zeroed path via an empty store.
        let ing = ingestor(provider, store, IngestOptions::default());
        let stats = ing.stats().await;
        assert_eq!(stats.total_emails, 0);
        assert_eq!(stats.emails_last_week, 0);
        assert!(stats.top_newsletters.is_empty());
    }
}
