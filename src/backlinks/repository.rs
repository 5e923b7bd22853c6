//! BacklinkRepository trait and error type.

use crate::domain::{Backlink, BacklinkEntry};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// IndexError
// ===========================================

/// Errors from backlink persistence.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored link could not be encoded or decoded.
    #[error("invalid link data: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for backlink index operations.
pub type IndexResult<T> = Result<T, IndexError>;

// ===========================================
// BacklinkRepository
// ===========================================

/// Storage for the reverse link index.
///
/// After `update_for_note(source, entries)` returns `Ok`, `get_by_source`
/// yields exactly `entries` for that source. A failed update leaves the
/// previous rows in place.
pub trait BacklinkRepository {
    /// Stores a single backlink alongside any existing rows.
    fn create(&mut self, backlink: &Backlink) -> IndexResult<()>;

    /// Replaces every row for `source_note_id` with `entries`.
    ///
    /// The delete and the inserts commit together. An empty `entries`
    /// just clears the source.
    fn update_for_note(&mut self, source_note_id: &str, entries: &[BacklinkEntry])
    -> IndexResult<()>;

    /// Backlinks pointing at `target_note_id`.
    fn get_by_target(&self, target_note_id: &str) -> IndexResult<Vec<Backlink>>;

    /// Backlinks written for `source_note_id`, in insertion order.
    fn get_by_source(&self, source_note_id: &str) -> IndexResult<Vec<Backlink>>;

    /// Removes every row for `source_note_id` (idempotent).
    fn delete_by_source(&mut self, source_note_id: &str) -> IndexResult<()>;

    /// Distinct source ids that currently have rows, sorted.
    fn sources(&self) -> IndexResult<Vec<String>>;
}
