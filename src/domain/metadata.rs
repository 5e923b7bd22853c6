//! Derived note metadata.

use crate::domain::Link;
use serde::{Deserialize, Serialize};

/// A markdown heading found in note content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingInfo {
    /// Number of leading `#` characters (1 to 6).
    pub level: u8,
    /// Heading text, trimmed.
    pub text: String,
    /// Character offset of the first `#` in the content.
    pub position: usize,
}

/// Structural facts derived from markdown, excluding links.
///
/// This is what [`parse_markdown`](crate::parser::parse_markdown) returns;
/// [`NoteMetadata`] adds the outgoing links on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMarkdown {
    pub word_count: usize,
    pub headings: Vec<HeadingInfo>,
    pub block_ids: Vec<String>,
    pub inline_tags: Vec<String>,
}

/// Metadata derived from a note's content.
///
/// `outgoing_links` always equals `extract_links(content)` for the content
/// the metadata was derived from. Build it with
/// [`update_note_metadata`](crate::parser::update_note_metadata) rather than
/// by hand so it never goes stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub word_count: usize,
    pub headings: Vec<HeadingInfo>,
    pub outgoing_links: Vec<Link>,
    pub block_ids: Vec<String>,
    /// Deduplicated, in order of first occurrence.
    pub inline_tags: Vec<String>,
}

impl NoteMetadata {
    /// Combines parsed markdown facts with the extracted links.
    pub fn from_parts(parsed: ParsedMarkdown, outgoing_links: Vec<Link>) -> Self {
        Self {
            word_count: parsed.word_count,
            headings: parsed.headings,
            outgoing_links,
            block_ids: parsed.block_ids,
            inline_tags: parsed.inline_tags,
        }
    }
}
