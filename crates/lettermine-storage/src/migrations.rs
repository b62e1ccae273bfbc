// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded schema migrations tracked through `PRAGMA user_version`.
//!
//! Each entry runs inside the opening transaction exactly once; the
//! user_version after open equals the migration count.

const MIGRATIONS: &[&str] = &[
    // v1: ingested emails, upsert-keyed on the provider message id.
    "CREATE TABLE emails (
        message_id          TEXT PRIMARY KEY,
        subject             TEXT NOT NULL,
        sender              TEXT NOT NULL,
        newsletter_name     TEXT NOT NULL,
        raw_html            TEXT NOT NULL,
        clean_text          TEXT NOT NULL,
        received_at         TEXT NOT NULL,
        processed_at        TEXT NOT NULL,
        processing_status   TEXT NOT NULL DEFAULT 'pending',
        extraction_status   TEXT NOT NULL DEFAULT 'pending',
        extraction_attempts INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX idx_emails_received_at ON emails(received_at);
    CREATE INDEX idx_emails_newsletter ON emails(newsletter_name);",
];

/// Apply all pending migrations on the given connection.
pub fn run(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    for (i, sql) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", (i + 1) as i64)?;
        tx.commit()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_apply_once_and_set_user_version() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        run(&mut conn).unwrap();
        run(&mut conn).unwrap();
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, MIGRATIONS.len() as i64);
    }

    #[test]
    fn emails_table_exists_after_migration() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        run(&mut conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM emails", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
