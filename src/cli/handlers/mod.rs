//! Command handlers for the CLI.

mod backlinks;
mod graph;
mod index;
mod links;
mod meta;
mod resolve;
mod search;

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::domain::Note;
use crate::infra::load_vault;

// Re-export public items
pub use backlinks::handle_backlinks;
pub use graph::handle_graph;
pub use index::handle_index;
pub use links::handle_links;
pub use meta::handle_meta;
pub use resolve::{ResolveResult, resolve_note};
pub use search::handle_search;

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the backlink database path for a vault directory.
pub(crate) fn backlink_db_path(notes_dir: &Path) -> PathBuf {
    notes_dir.join(".notegraph").join("backlinks.db")
}

/// Loads every note of the vault.
pub(crate) fn load_notes(notes_dir: &Path) -> Result<Vec<Note>> {
    load_vault(notes_dir)
        .with_context(|| format!("failed to load vault at {}", notes_dir.display()))
}

/// Resolves `identifier` to exactly one note or fails with a message.
pub(crate) fn select_note<'a>(notes: &'a [Note], identifier: &str) -> Result<&'a Note> {
    match resolve_note(notes, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(candidates) => {
            resolve::print_ambiguous_notes(identifier, &candidates);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => bail!("note not found: {}", identifier),
    }
}

/// Finds a note by its exact id.
pub(crate) fn note_by_id<'a>(notes: &'a [Note], id: &str) -> Option<&'a Note> {
    notes.iter().find(|note| note.id() == id)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
