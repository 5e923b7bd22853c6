//! BacklinkRepository implementation for SqliteIndex.

use super::SqliteIndex;
use super::transaction::INSERT_BACKLINK;
use crate::backlinks::{BacklinkRepository, IndexResult};
use crate::domain::{Backlink, BacklinkEntry, Link};
use rusqlite::{Connection, params};
use tracing::debug;

impl BacklinkRepository for SqliteIndex {
    fn create(&mut self, backlink: &Backlink) -> IndexResult<()> {
        let link = serde_json::to_string(&backlink.link)?;
        self.conn.execute(
            INSERT_BACKLINK,
            params![
                backlink.source_note_id,
                backlink.target_note_id,
                link,
                backlink.context
            ],
        )?;
        Ok(())
    }

    fn update_for_note(
        &mut self,
        source_note_id: &str,
        entries: &[BacklinkEntry],
    ) -> IndexResult<()> {
        // Encode first so a bad link fails before anything is touched.
        let encoded = entries
            .iter()
            .map(|entry| serde_json::to_string(&entry.link))
            .collect::<Result<Vec<_>, _>>()?;

        let tx = self.transaction()?;
        tx.clear_source(source_note_id)?;
        for (entry, link) in entries.iter().zip(&encoded) {
            tx.insert(source_note_id, entry, link)?;
        }
        tx.commit()?;
        debug!(
            source = source_note_id,
            entries = entries.len(),
            "replaced backlinks"
        );
        Ok(())
    }

    fn get_by_target(&self, target_note_id: &str) -> IndexResult<Vec<Backlink>> {
        query_backlinks(
            &self.conn,
            "SELECT source_note_id, target_note_id, link, context
             FROM backlinks WHERE target_note_id = ?1 ORDER BY id",
            target_note_id,
        )
    }

    fn get_by_source(&self, source_note_id: &str) -> IndexResult<Vec<Backlink>> {
        query_backlinks(
            &self.conn,
            "SELECT source_note_id, target_note_id, link, context
             FROM backlinks WHERE source_note_id = ?1 ORDER BY id",
            source_note_id,
        )
    }

    fn delete_by_source(&mut self, source_note_id: &str) -> IndexResult<()> {
        self.conn.execute(
            "DELETE FROM backlinks WHERE source_note_id = ?1",
            [source_note_id],
        )?;
        Ok(())
    }

    fn sources(&self) -> IndexResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT source_note_id FROM backlinks ORDER BY source_note_id")?;
        let sources = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sources)
    }
}

fn query_backlinks(conn: &Connection, sql: &str, id: &str) -> IndexResult<Vec<Backlink>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut backlinks = Vec::new();
    for row in rows {
        let (source_note_id, target_note_id, link, context) = row?;
        let link: Link = serde_json::from_str(&link)?;
        backlinks.push(Backlink {
            source_note_id,
            target_note_id,
            link,
            context,
        });
    }
    Ok(backlinks)
}
