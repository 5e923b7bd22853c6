//! Markdown parsing: links, derived metadata, frontmatter.
//!
//! Every function here is total. Malformed syntax is treated as plain text.

mod frontmatter;
mod links;
mod markdown;

pub use frontmatter::parse_frontmatter;
pub use links::{
    DEFAULT_CONTEXT_LENGTH, ParsedWikilink, context_for_link, extract_links, parse_wikilink,
};
pub use markdown::{parse_markdown, update_note_metadata};
