//! Keeping stored backlinks in step with note content.

use crate::backlinks::{BacklinkRepository, IndexResult, NoteCatalog, TitleResolver, compute_entries};
use crate::domain::Note;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

/// Outcome of [`sync_vault`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Notes whose backlinks were rewritten.
    pub notes: usize,
    /// Backlink rows written.
    pub backlinks: usize,
    /// Sources removed because their note no longer exists.
    pub purged: usize,
}

/// Recomputes and stores the backlinks produced by one note.
///
/// Returns the number of rows written.
pub fn refresh_note<R, T>(
    repo: &mut R,
    note: &Note,
    resolver: &T,
    context_length: usize,
) -> IndexResult<usize>
where
    R: BacklinkRepository + ?Sized,
    T: TitleResolver,
{
    let entries = compute_entries(note.content(), resolver, context_length);
    repo.update_for_note(note.id(), &entries)?;
    Ok(entries.len())
}

/// Deletes rows whose source is not among `notes`.
///
/// Returns the number of sources removed.
pub fn purge_missing<R>(repo: &mut R, notes: &[Note]) -> IndexResult<usize>
where
    R: BacklinkRepository + ?Sized,
{
    let live: HashSet<&str> = notes.iter().map(Note::id).collect();
    let mut purged = 0;
    for source in repo.sources()? {
        if !live.contains(source.as_str()) {
            debug!(source = %source, "purging backlinks of missing note");
            repo.delete_by_source(&source)?;
            purged += 1;
        }
    }
    Ok(purged)
}

/// Rewrites the backlinks of every note and drops rows of deleted notes.
pub fn sync_vault<R>(repo: &mut R, notes: &[Note], context_length: usize) -> IndexResult<SyncSummary>
where
    R: BacklinkRepository + ?Sized,
{
    let catalog = NoteCatalog::new(notes);
    let mut summary = SyncSummary::default();

    for note in notes {
        summary.backlinks += refresh_note(repo, note, &catalog, context_length)?;
        summary.notes += 1;
    }
    summary.purged = purge_missing(repo, notes)?;

    info!(
        notes = summary.notes,
        backlinks = summary.backlinks,
        purged = summary.purged,
        "backlink index synced"
    );
    Ok(summary)
}
