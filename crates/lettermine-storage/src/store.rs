// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`EmailStore`] implementation backed by the SQLite database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettermine_core::{EmailStore, LettermineError, NewsletterCount, StoredEmail};

use crate::database::Database;
use crate::queries::emails;

/// SQLite-backed email store. Cheap to clone; all clones share the single
/// writer thread.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl EmailStore for SqliteStore {
    async fn upsert_emails(&self, emails: &[StoredEmail]) -> Result<(), LettermineError> {
        emails::upsert_emails(&self.db, emails).await
    }

    async fn count_emails(&self) -> Result<u64, LettermineError> {
        emails::count_emails(&self.db).await
    }

    async fn count_emails_since(&self, since: DateTime<Utc>) -> Result<u64, LettermineError> {
        emails::count_emails_since(&self.db, since).await
    }

    async fn top_newsletters_since(
        &self,
        since: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<NewsletterCount>, LettermineError> {
        emails::top_newsletters_since(&self.db, since, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_implements_the_trait_over_a_real_database() {
        let db = Database::open_in_memory().await.unwrap();
        let store: Box<dyn EmailStore> = Box::new(SqliteStore::new(db));
        assert_eq!(store.count_emails().await.unwrap(), 0);
    }
}
