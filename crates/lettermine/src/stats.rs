// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lettermine stats` command implementation.

use std::path::Path;

use chrono::{Duration, Utc};
use lettermine_config::model::LettermineConfig;
use lettermine_core::{EmailStore, LettermineError};
use lettermine_storage::{Database, SqliteStore};

/// Run the `lettermine stats` command.
pub async fn run(config: &LettermineConfig) -> Result<(), LettermineError> {
    let db = Database::open(
        Path::new(&config.storage.database_path),
        config.storage.wal_mode,
    )
    .await?;
    let store = SqliteStore::new(db);

    let total = store.count_emails().await?;
    let last_week = store
        .count_emails_since(Utc::now() - Duration::days(7))
        .await?;
    let top = store
        .top_newsletters_since(Utc::now() - Duration::days(30), 10)
        .await?;

    println!("total emails:     {total}");
    println!("last 7 days:      {last_week}");
    if top.is_empty() {
        println!("top newsletters:  none in the last 30 days");
    } else {
        println!("top newsletters (30 days):");
        for entry in top {
            println!("  {:<30} {}", entry.name, entry.count);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_creates_the_database_and_reports_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LettermineConfig::default();
        config.storage.database_path = dir
            .path()
            .join("stats.db")
            .to_string_lossy()
            .into_owned();

        run(&config).await.unwrap();
        assert!(dir.path().join("stats.db").exists());
    }
}
