//! SQLite schema for the backlink index.

use rusqlite::Connection;

/// Version written to `schema_version` by [`create_schema`].
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the backlink tables and indexes. Safe to call repeatedly.
///
/// # Tables Created
/// - `backlinks` - one row per resolved wikilink occurrence, with the
///   originating link stored as JSON
/// - `schema_version` - schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS backlinks (
            id INTEGER PRIMARY KEY,
            source_note_id TEXT NOT NULL,
            target_note_id TEXT NOT NULL,
            link TEXT NOT NULL,
            context TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_backlinks_source ON backlinks(source_note_id);
        CREATE INDEX IF NOT EXISTS idx_backlinks_target ON backlinks(target_note_id);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
