//! SQLite-backed backlink index.

mod connection;
mod repo_impl;
mod transaction;

#[cfg(test)]
mod tests;

use rusqlite::Connection;

pub use transaction::Transaction;

/// SQLite-backed backlink index.
///
/// Owns the database connection; open one with
/// [`open`](SqliteIndex::open) or [`open_in_memory`](SqliteIndex::open_in_memory).
pub struct SqliteIndex {
    pub(crate) conn: Connection,
}
