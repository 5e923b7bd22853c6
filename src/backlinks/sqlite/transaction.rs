//! Write transaction used to swap out one note's backlinks.

use crate::backlinks::IndexResult;
use crate::domain::BacklinkEntry;
use rusqlite::{Connection, params};

pub(super) const INSERT_BACKLINK: &str =
    "INSERT INTO backlinks (source_note_id, target_note_id, link, context)
     VALUES (?1, ?2, ?3, ?4)";

/// An open write on the backlink table.
///
/// Nothing becomes visible until [`commit`](Transaction::commit). Dropping
/// the guard without committing restores the rows it touched.
pub struct Transaction<'a> {
    conn: &'a Connection,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(super) fn begin(conn: &'a Connection) -> IndexResult<Self> {
        conn.execute_batch("BEGIN")?;
        Ok(Self {
            conn,
            committed: false,
        })
    }

    /// Removes every row recorded for `source_note_id`, returning how many.
    pub fn clear_source(&self, source_note_id: &str) -> IndexResult<usize> {
        Ok(self.conn.execute(
            "DELETE FROM backlinks WHERE source_note_id = ?1",
            [source_note_id],
        )?)
    }

    /// Appends one row. `link_json` is the entry's link already encoded.
    pub fn insert(
        &self,
        source_note_id: &str,
        entry: &BacklinkEntry,
        link_json: &str,
    ) -> IndexResult<()> {
        let mut stmt = self.conn.prepare_cached(INSERT_BACKLINK)?;
        stmt.execute(params![
            source_note_id,
            entry.target_note_id,
            link_json,
            entry.context
        ])?;
        Ok(())
    }

    pub fn commit(mut self) -> IndexResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            // nowhere to report a failure from drop
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
