// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory email store for connector tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettermine_core::{EmailStore, LettermineError, NewsletterCount, StoredEmail};

/// [`EmailStore`] backed by a HashMap keyed on `message_id`.
///
/// Upserts overwrite, matching the SQLite store's conflict behavior. Writes
/// can be failed on demand to exercise fatal-persistence paths.
pub struct MemoryEmailStore {
    emails: Mutex<HashMap<String, StoredEmail>>,
    fail_writes: AtomicBool,
}

impl MemoryEmailStore {
    pub fn new() -> Self {
        Self {
            emails: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent `upsert_emails` calls fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Snapshot of all stored rows, in unspecified order.
    pub fn stored(&self) -> Vec<StoredEmail> {
        self.emails.lock().unwrap().values().cloned().collect()
    }

    /// Look up one row by message id.
    pub fn get(&self, message_id: &str) -> Option<StoredEmail> {
        self.emails.lock().unwrap().get(message_id).cloned()
    }
}

impl Default for MemoryEmailStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailStore for MemoryEmailStore {
    async fn upsert_emails(&self, emails: &[StoredEmail]) -> Result<(), LettermineError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LettermineError::Storage {
                source: "scripted write failure".into(),
            });
        }
        let mut map = self.emails.lock().unwrap();
        for email in emails {
            map.insert(email.message_id.clone(), email.clone());
        }
        Ok(())
    }

    async fn count_emails(&self) -> Result<u64, LettermineError> {
        Ok(self.emails.lock().unwrap().len() as u64)
    }

    async fn count_emails_since(&self, since: DateTime<Utc>) -> Result<u64, LettermineError> {
        Ok(self
            .emails
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.received_at >= since)
            .count() as u64)
    }

    async fn top_newsletters_since(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<NewsletterCount>, LettermineError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for email in self.emails.lock().unwrap().values() {
            if email.received_at >= since {
                *counts.entry(email.newsletter_name.clone()).or_default() += 1;
            }
        }
        let mut top: Vec<NewsletterCount> = counts
            .into_iter()
            .map(|(name, count)| NewsletterCount { name, count })
            .collect();
        top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        top.truncate(limit as usize);
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn email(message_id: &str, newsletter: &str, day: u32) -> StoredEmail {
        let at = Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).unwrap();
        StoredEmail {
            message_id: message_id.to_string(),
            subject: "s".into(),
            sender: "a@b.c".into(),
            newsletter_name: newsletter.to_string(),
            raw_html: String::new(),
            clean_text: String::new(),
            received_at: at,
            processed_at: at,
            processing_status: "pending".into(),
            extraction_status: "pending".into(),
            extraction_attempts: 0,
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_on_conflict() {
        let store = MemoryEmailStore::new();
        store.upsert_emails(&[email("m", "a", 1)]).await.unwrap();
        store.upsert_emails(&[email("m", "b", 2)]).await.unwrap();
        assert_eq!(store.count_emails().await.unwrap(), 1);
        assert_eq!(store.get("m").unwrap().newsletter_name, "b");
    }

    #[tokio::test]
    async fn failed_writes_surface_storage_errors() {
        let store = MemoryEmailStore::new();
        store.fail_writes();
        assert!(store.upsert_emails(&[email("m", "a", 1)]).await.is_err());
    }

    #[tokio::test]
    async fn top_newsletters_sorts_and_limits() {
        let store = MemoryEmailStore::new();
        store
            .upsert_emails(&[
                email("1", "alpha", 10),
                email("2", "alpha", 11),
                email("3", "beta", 12),
            ])
            .await
            .unwrap();
        let since = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
        let top = store.top_newsletters_since(since, 1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "alpha");
        assert_eq!(top[0].count, 2);
    }
}
