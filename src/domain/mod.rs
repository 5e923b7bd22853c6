//! Core types: Note, NoteMetadata, Link, Backlink

mod backlink;
mod link;
mod metadata;
mod note;
mod title;

pub use backlink::{Backlink, BacklinkEntry, BacklinkGroup, group_by_source};
pub use link::{Link, LinkKind, LinkPosition};
pub use metadata::{HeadingInfo, NoteMetadata, ParsedMarkdown};
pub use note::{Frontmatter, Note, NoteBuilder};
pub use title::title_key;
