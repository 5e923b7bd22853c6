//! Connection management for SqliteIndex.

use super::SqliteIndex;
use super::transaction::Transaction;
use crate::backlinks::{IndexError, IndexResult, create_schema};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::debug;

impl SqliteIndex {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory database with the backlink schema.
    pub fn open_in_memory() -> IndexResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a database at `path`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: &Path) -> IndexResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| IndexError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!(path = %path.display(), "opening backlink index");
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Transaction Support
    // ===========================================

    /// Begins a write on the backlink table.
    ///
    /// The transaction rolls back on drop unless `commit()` is called.
    pub fn transaction(&mut self) -> IndexResult<Transaction<'_>> {
        Transaction::begin(&self.conn)
    }
}
