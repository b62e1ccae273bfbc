// SPDX-FileCopyrightText: 2026 Lettermine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes.

use std::path::Path;

use lettermine_core::LettermineError;
use tokio_rusqlite::Connection;
use tracing::info;

use crate::migrations;

/// Convert tokio-rusqlite errors into LettermineError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> LettermineError {
    LettermineError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Cloneable; all clones share the single writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (creating if absent) the database at `path`, apply PRAGMAs, and
    /// run any pending migrations.
    pub async fn open(path: &Path, wal_mode: bool) -> Result<Self, LettermineError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LettermineError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| LettermineError::Storage {
                source: Box::new(e),
            })?;
        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5_000)?;
            migrations::run(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        info!(path = %path.display(), wal = wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// In-memory database for tests and dry runs.
    pub async fn open_in_memory() -> Result<Self, LettermineError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| LettermineError::Storage {
                source: Box::new(e),
            })?;
        conn.call(|conn| {
            migrations::run(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;
        Ok(Self { conn })
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the background connection thread.
    pub async fn close(self) -> Result<(), LettermineError> {
        self.conn
            .close()
            .await
            .map_err(|e| LettermineError::Storage {
                source: Box::new(e),
            })
    }
}
