use super::*;
use crate::backlinks::{BacklinkRepository, SCHEMA_VERSION, get_schema_version};
use crate::domain::{Backlink, BacklinkEntry, Link, LinkKind, LinkPosition};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn wikilink(target: &str) -> Link {
    Link::new(target, LinkKind::Wikilink, LinkPosition::new(0, target.len() + 4, 0))
}

fn entry(target_id: &str, target_title: &str) -> BacklinkEntry {
    BacklinkEntry::new(
        target_id,
        wikilink(target_title),
        format!("see [[{target_title}]]"),
    )
}

fn row_count(index: &SqliteIndex) -> i64 {
    index
        .conn()
        .query_row("SELECT COUNT(*) FROM backlinks", [], |row| row.get(0))
        .unwrap()
}

fn targets(backlinks: &[Backlink]) -> Vec<&str> {
    backlinks.iter().map(|b| b.target_note_id.as_str()).collect()
}

// ===========================================
// Cycle 1: Connections
// ===========================================

#[test]
fn open_in_memory_initializes_schema() {
    let index = SqliteIndex::open_in_memory().unwrap();
    assert_eq!(get_schema_version(index.conn()).unwrap(), SCHEMA_VERSION);
    assert_eq!(row_count(&index), 0);
}

#[test]
fn open_creates_file_and_parent_dirs() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join(".notegraph").join("backlinks.db");

    let _index = SqliteIndex::open(&db_path).unwrap();

    assert!(db_path.exists(), "database file should be created");
}

#[test]
fn reopening_keeps_data() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("backlinks.db");

    {
        let mut index = SqliteIndex::open(&db_path).unwrap();
        index.update_for_note("a", &[entry("b", "B")]).unwrap();
    }

    let index = SqliteIndex::open(&db_path).unwrap();
    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["b"]);
}

// ===========================================
// Cycle 2: Transactions
// ===========================================

#[test]
fn transaction_commits() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    let batch = entry("b", "B");
    let link = serde_json::to_string(&batch.link).unwrap();
    {
        let tx = index.transaction().unwrap();
        tx.insert("a", &batch, &link).unwrap();
        tx.commit().unwrap();
    }
    assert_eq!(row_count(&index), 1);
    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["b"]);
}

#[test]
fn transaction_rolls_back_on_drop() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    {
        let tx = index.transaction().unwrap();
        tx.insert("a", &entry("b", "B"), "{}").unwrap();
    }
    assert_eq!(row_count(&index), 0);
}

#[test]
fn uncommitted_clear_keeps_existing_rows() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("b", "B")]).unwrap();
    {
        let tx = index.transaction().unwrap();
        assert_eq!(tx.clear_source("a").unwrap(), 1);
    }
    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["b"]);
}

// ===========================================
// Cycle 3: update_for_note
// ===========================================

#[test]
fn update_then_read_both_directions() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("A", &[entry("B", "Bee")]).unwrap();

    let by_source = index.get_by_source("A").unwrap();
    assert_eq!(by_source.len(), 1);
    assert_eq!(by_source[0].target_note_id, "B");
    assert_eq!(by_source[0].link, wikilink("Bee"));
    assert_eq!(by_source[0].context, "see [[Bee]]");

    let by_target = index.get_by_target("B").unwrap();
    assert!(by_target.iter().any(|b| b.source_note_id == "A"));
}

#[test]
fn update_replaces_previous_batch() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index
        .update_for_note("a", &[entry("b", "B"), entry("c", "C")])
        .unwrap();
    index.update_for_note("a", &[entry("d", "D")]).unwrap();

    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["d"]);
    assert!(index.get_by_target("b").unwrap().is_empty());
}

#[test]
fn update_keeps_duplicates_and_order() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    let batch = vec![entry("c", "C"), entry("b", "B"), entry("c", "C")];
    index.update_for_note("a", &batch).unwrap();

    let stored: Vec<BacklinkEntry> = index
        .get_by_source("a")
        .unwrap()
        .into_iter()
        .map(|b| BacklinkEntry::new(b.target_note_id, b.link, b.context))
        .collect();
    assert_eq!(stored, batch);
}

#[test]
fn empty_update_clears_the_source() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("b", "B")]).unwrap();
    index.update_for_note("a", &[]).unwrap();

    assert!(index.get_by_source("a").unwrap().is_empty());
    assert_eq!(row_count(&index), 0);
}

#[test]
fn updates_for_different_sources_are_independent() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("t", "T")]).unwrap();
    index.update_for_note("b", &[entry("t", "T")]).unwrap();
    index.update_for_note("a", &[]).unwrap();

    let to_t = index.get_by_target("t").unwrap();
    assert_eq!(to_t.len(), 1);
    assert_eq!(to_t[0].source_note_id, "b");
}

#[test]
fn failed_update_leaves_old_rows() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("b", "B")]).unwrap();

    // Make every insert fail while deletes still work.
    index
        .conn()
        .execute_batch(
            "CREATE TRIGGER reject_inserts BEFORE INSERT ON backlinks
             BEGIN SELECT RAISE(ABORT, 'read only'); END;",
        )
        .unwrap();

    let result = index.update_for_note("a", &[entry("c", "C")]);
    assert!(result.is_err());
    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["b"]);
}

// ===========================================
// Cycle 4: create, delete_by_source, sources
// ===========================================

#[test]
fn create_appends_a_single_row() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("b", "B")]).unwrap();
    index
        .create(&Backlink::from_entry("a", entry("c", "C")))
        .unwrap();

    assert_eq!(targets(&index.get_by_source("a").unwrap()), vec!["b", "c"]);
}

#[test]
fn delete_by_source_is_idempotent() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index.update_for_note("a", &[entry("b", "B")]).unwrap();

    index.delete_by_source("a").unwrap();
    index.delete_by_source("a").unwrap();
    index.delete_by_source("never-seen").unwrap();

    assert!(index.get_by_source("a").unwrap().is_empty());
}

#[test]
fn sources_are_distinct_and_sorted() {
    let mut index = SqliteIndex::open_in_memory().unwrap();
    index
        .update_for_note("zeta", &[entry("x", "X"), entry("y", "Y")])
        .unwrap();
    index.update_for_note("alpha", &[entry("x", "X")]).unwrap();
    index.update_for_note("empty", &[]).unwrap();

    assert_eq!(index.sources().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn corrupt_link_json_is_an_error() {
    let index = SqliteIndex::open_in_memory().unwrap();
    index
        .conn()
        .execute(
            "INSERT INTO backlinks (source_note_id, target_note_id, link, context) VALUES ('a', 'b', 'not json', '')",
            [],
        )
        .unwrap();

    let err = index.get_by_source("a").unwrap_err();
    assert!(matches!(err, crate::backlinks::IndexError::Json(_)));
}
