// SPDX-FileCopyrightText: 2026 Roofline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Query modules accept `&Database` and call through
//! `db.connection().call()`. Do NOT create additional Connection instances
//! for writes.

use roofline_core::RooflineError;
use tokio_rusqlite::Connection;

/// Handle to the single SQLite connection.
///
/// Cloning is cheap and shares the same background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, RooflineError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| RooflineError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path).await.map_err(map_sqlite_err)?;
        conn.call(|conn| -> Result<(), RooflineError> {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(map_sqlite_err)?;
            conn.pragma_update(None, "foreign_keys", "ON")
                .map_err(map_sqlite_err)?;
            conn.pragma_update(None, "busy_timeout", 5000)
                .map_err(map_sqlite_err)?;
            crate::migrations::run_migrations(conn)
        })
        .await
        .map_err(unwrap_call_err)?;

        tracing::debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// Open a fresh in-memory database with migrations applied. Test use.
    pub async fn open_in_memory() -> Result<Self, RooflineError> {
        let conn = Connection::open_in_memory().await.map_err(map_sqlite_err)?;
        conn.call(|conn| -> Result<(), RooflineError> {
            conn.pragma_update(None, "foreign_keys", "ON")
                .map_err(map_sqlite_err)?;
            crate::migrations::run_migrations(conn)
        })
        .await
        .map_err(unwrap_call_err)?;
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), RooflineError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        tracing::debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a failed `call` whose closure returned a `rusqlite::Error` into the
/// crate-wide storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RooflineError {
    match e {
        tokio_rusqlite::Error::Error(e) => map_sqlite_err(e),
        other => RooflineError::Internal(format!("database worker failed: {other}")),
    }
}

/// Map a raw rusqlite error into the crate-wide storage error.
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> RooflineError {
    RooflineError::Storage {
        source: Box::new(e),
    }
}

/// Unwrap a `call` whose closure already produced a [`RooflineError`].
fn unwrap_call_err(e: tokio_rusqlite::Error<RooflineError>) -> RooflineError {
    match e {
        tokio_rusqlite::Error::Error(e) => e,
        other => RooflineError::Internal(format!("database worker failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dir/test.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        assert!(path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn migrations_create_both_tables() {
        let db = Database::open_in_memory().await.unwrap();
        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row?);
                }
                Ok(out)
            })
            .await
            .unwrap();
        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"properties".to_string()));
    }

    #[tokio::test]
    async fn reopening_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
        // Second open runs the migration runner against an up-to-date schema.
        let db2 = Database::open(path.to_str().unwrap()).await.unwrap();
        db2.close().await.unwrap();
    }
}
