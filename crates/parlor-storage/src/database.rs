// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;
use std::time::Duration;

use parlor_core::ParlorError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Handle to the SQLite database. Cheap to clone; all clones share the
/// single writer thread.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`, applies the
    /// standing PRAGMAs, and runs pending migrations.
    pub async fn open(path: &str) -> Result<Self, ParlorError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| ParlorError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;
        conn.call(
            |conn| -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "foreign_keys", "ON")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
                conn.busy_timeout(BUSY_TIMEOUT)?;
                migrations::run_migrations(conn)?;
                Ok(())
            },
        )
        .await
        .map_err(|e| match e {
            tokio_rusqlite::Error::Error(source) => ParlorError::Storage { source },
            other => ParlorError::Storage {
                source: other.to_string().into(),
            },
        })?;

        debug!(path, "database opened, schema is current");
        Ok(Self { conn })
    }

    /// The shared tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoints the WAL so all committed data lands in the main file.
    pub async fn close(&self) -> Result<(), ParlorError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> ParlorError {
    ParlorError::Storage {
        source: Box::new(e),
    }
}
