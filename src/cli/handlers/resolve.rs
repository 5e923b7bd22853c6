//! Note resolution utilities.

use crate::domain::{Note, title_key};

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'a> {
    /// Exactly one note matched.
    Unique(&'a Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'a Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier to stderr.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), note.title());
    }
    eprintln!();
    eprintln!("Use the note ID (its path relative to the vault) to pick one.");
}

/// Resolves a note identifier against the loaded vault.
///
/// Resolution order, stopping at the first step with any match:
/// 1. Exact ID (`folder/note.md`)
/// 2. Title, ignoring case
/// 3. Path without extension (`folder/note`)
pub fn resolve_note<'a>(notes: &'a [Note], identifier: &str) -> ResolveResult<'a> {
    let identifier = identifier.trim();

    if let Some(note) = notes.iter().find(|note| note.id() == identifier) {
        return ResolveResult::Unique(note);
    }

    let key = title_key(identifier);
    let title_matches: Vec<&Note> = notes
        .iter()
        .filter(|note| title_key(note.title()) == key)
        .collect();
    if !title_matches.is_empty() {
        return from_candidates(title_matches);
    }

    from_candidates(notes.iter().filter(|note| note.path() == identifier).collect())
}

fn from_candidates(mut candidates: Vec<&Note>) -> ResolveResult<'_> {
    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates.remove(0)),
        _ => ResolveResult::Ambiguous(candidates),
    }
}
