// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Email CRUD and stats aggregation.

use chrono::{DateTime, Utc};
use lettermine_core::{LettermineError, NewsletterCount, StoredEmail};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

/// Insert or update a batch of emails in one transaction, keyed on
/// `message_id`. Re-ingesting the same messages overwrites content fields
/// but preserves extraction bookkeeping.
pub async fn upsert_emails(db: &Database, emails: &[StoredEmail]) -> Result<(), LettermineError> {
    let emails = emails.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO emails (message_id, subject, sender, newsletter_name,
                         raw_html, clean_text, received_at, processed_at,
                         processing_status, extraction_status, extraction_attempts)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                     ON CONFLICT(message_id) DO UPDATE SET
                         subject = excluded.subject,
                         sender = excluded.sender,
                         newsletter_name = excluded.newsletter_name,
                         raw_html = excluded.raw_html,
                         clean_text = excluded.clean_text,
                         received_at = excluded.received_at,
                         processed_at = excluded.processed_at",
                )?;
                for email in &emails {
                    stmt.execute(params![
                        email.message_id,
                        email.subject,
                        email.sender,
                        email.newsletter_name,
                        email.raw_html,
                        email.clean_text,
                        email.received_at.to_rfc3339(),
                        email.processed_at.to_rfc3339(),
                        email.processing_status,
                        email.extraction_status,
                        email.extraction_attempts,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Total number of stored emails.
pub async fn count_emails(db: &Database) -> Result<u64, LettermineError> {
    db.connection()
        .call(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM emails", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Number of stored emails received at or after `since`.
pub async fn count_emails_since(
    db: &Database,
    since: DateTime<Utc>,
) -> Result<u64, LettermineError> {
    let since = since.to_rfc3339();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM emails WHERE received_at >= ?1",
                params![since],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
        .map_err(map_tr_err)
}

/// Most frequent newsletters among emails received at or after `since`,
/// descending by count.
pub async fn top_newsletters_since(
    db: &Database,
    since: DateTime<Utc>,
    limit: u32,
) -> Result<Vec<NewsletterCount>, LettermineError> {
    let since = since.to_rfc3339();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT newsletter_name, COUNT(*) as n FROM emails
                 WHERE received_at >= ?1
                 GROUP BY newsletter_name
                 ORDER BY n DESC, newsletter_name ASC
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![since, limit as i64], |row| {
                Ok(NewsletterCount {
                    name: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?;
            let mut counts = Vec::new();
            for row in rows {
                counts.push(row?);
            }
            Ok(counts)
        })
        .await
        .map_err(map_tr_err)
}
