//! Backlink types: recorded references from a source note to a target note.

use crate::domain::Link;
use serde::{Deserialize, Serialize};

/// One backlink row to be written for a source note.
///
/// A batch of these replaces everything previously stored for the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkEntry {
    pub target_note_id: String,
    pub link: Link,
    pub context: String,
}

impl BacklinkEntry {
    /// Creates a new entry.
    pub fn new(target_note_id: impl Into<String>, link: Link, context: impl Into<String>) -> Self {
        Self {
            target_note_id: target_note_id.into(),
            link,
            context: context.into(),
        }
    }
}

/// A stored reference from `source_note_id` to `target_note_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    pub source_note_id: String,
    pub target_note_id: String,
    pub link: Link,
    pub context: String,
}

impl Backlink {
    /// Attaches a source id to an entry.
    pub fn from_entry(source_note_id: impl Into<String>, entry: BacklinkEntry) -> Self {
        Self {
            source_note_id: source_note_id.into(),
            target_note_id: entry.target_note_id,
            link: entry.link,
            context: entry.context,
        }
    }
}

/// All backlinks from a single source note, collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkGroup {
    pub source_note_id: String,
    /// Number of link occurrences from this source.
    pub count: usize,
    /// Context of the first occurrence.
    pub context: String,
}

/// Collapses backlinks into one group per source note.
///
/// Groups keep the order in which each source first appears.
pub fn group_by_source(backlinks: &[Backlink]) -> Vec<BacklinkGroup> {
    let mut groups: Vec<BacklinkGroup> = Vec::new();
    for backlink in backlinks {
        match groups
            .iter_mut()
            .find(|g| g.source_note_id == backlink.source_note_id)
        {
            Some(group) => group.count += 1,
            None => groups.push(BacklinkGroup {
                source_note_id: backlink.source_note_id.clone(),
                count: 1,
                context: backlink.context.clone(),
            }),
        }
    }
    groups
}
