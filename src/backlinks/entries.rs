//! Turning note content into backlink rows.

use crate::domain::{BacklinkEntry, LinkKind, Note, title_key};
use crate::parser::{context_for_link, extract_links};
use std::collections::HashMap;

/// Looks up a note id by title, ignoring case.
pub trait TitleResolver {
    fn resolve(&self, title: &str) -> Option<&str>;
}

/// Title lookup over a snapshot of notes.
///
/// When several notes share a title (ignoring case), the first one wins.
#[derive(Debug, Clone, Default)]
pub struct NoteCatalog {
    by_title: HashMap<String, String>,
}

impl NoteCatalog {
    pub fn new(notes: &[Note]) -> Self {
        let mut by_title = HashMap::with_capacity(notes.len());
        for note in notes {
            by_title
                .entry(title_key(note.title()))
                .or_insert_with(|| note.id().to_string());
        }
        Self { by_title }
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

impl TitleResolver for NoteCatalog {
    fn resolve(&self, title: &str) -> Option<&str> {
        self.by_title.get(&title_key(title)).map(String::as_str)
    }
}

/// Computes the backlink rows a note's content should produce.
///
/// Only wikilinks count (embeds still do, through the wikilink reported
/// inside every embed). Targets are resolved with `resolver` and dropped
/// when they match no note. Each entry's context is the link's line cut to
/// `context_length` characters.
///
/// # Examples
///
/// ```
/// use notegraph::backlinks::{NoteCatalog, compute_entries};
/// use notegraph::domain::Note;
///
/// let notes = vec![Note::new("b", "Beta", "beta", "")];
/// let catalog = NoteCatalog::new(&notes);
///
/// let entries = compute_entries("See [[beta]] and [[Gamma]]", &catalog, 100);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].target_note_id, "b");
/// ```
pub fn compute_entries(
    content: &str,
    resolver: &impl TitleResolver,
    context_length: usize,
) -> Vec<BacklinkEntry> {
    extract_links(content)
        .into_iter()
        .filter(|link| link.kind() == LinkKind::Wikilink)
        .filter_map(|link| {
            let target = resolver.resolve(link.target())?.to_string();
            let context = context_for_link(content, &link, context_length);
            Some(BacklinkEntry::new(target, link, context))
        })
        .collect()
}
