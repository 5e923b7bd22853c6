//! Link type representing a reference found in note content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic form a link was written in.
///
/// # Examples
///
/// ```
/// use notegraph::domain::LinkKind;
///
/// assert_eq!(LinkKind::Wikilink.as_str(), "wikilink");
/// assert_eq!(LinkKind::BlockRef.to_string(), "blockRef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    /// `[[target]]`, optionally with `#heading` and `|alias`.
    Wikilink,
    /// `![[target]]`, a wikilink marked for transclusion.
    Embed,
    /// `[text](target)` pointing at a local resource.
    Markdown,
    /// A reference to a `^block-id` in another note.
    BlockRef,
}

impl LinkKind {
    /// Returns the wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Wikilink => "wikilink",
            LinkKind::Embed => "embed",
            LinkKind::Markdown => "markdown",
            LinkKind::BlockRef => "blockRef",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a link occurs in its note.
///
/// `start` and `end` are character offsets into the full content string
/// (`end` is exclusive); `line` is the zero-based line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkPosition {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl LinkPosition {
    /// Creates a new position.
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }
}

/// A single link occurrence extracted from note content.
///
/// Links are recomputed on every parse and are never persisted on their
/// own; they only live inside [`NoteMetadata`](crate::domain::NoteMetadata)
/// and [`Backlink`](crate::domain::Backlink).
///
/// # Examples
///
/// ```
/// use notegraph::domain::{Link, LinkKind, LinkPosition};
///
/// let link = Link::new("Roadmap", LinkKind::Wikilink, LinkPosition::new(0, 11, 0))
///     .with_heading("Q4");
/// assert_eq!(link.target(), "Roadmap");
/// assert_eq!(link.heading(), Some("Q4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_text: Option<String>,
    #[serde(rename = "type")]
    kind: LinkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    block_id: Option<String>,
    position: LinkPosition,
}

impl Link {
    /// Creates a link with no heading, block id or display text.
    pub fn new(target: impl Into<String>, kind: LinkKind, position: LinkPosition) -> Self {
        Self {
            target: target.into(),
            display_text: None,
            kind,
            heading: None,
            block_id: None,
            position,
        }
    }

    /// Sets the display text (alias).
    pub fn with_display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = Some(text.into());
        self
    }

    /// Sets the heading anchor.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    /// Sets the block id anchor.
    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    /// Returns the raw reference text, exactly as written.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the alias or visible link text, if any.
    pub fn display_text(&self) -> Option<&str> {
        self.display_text.as_deref()
    }

    /// Returns the syntactic kind of the link.
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Returns the heading anchor, if any.
    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    /// Returns the block id anchor, if any.
    pub fn block_id(&self) -> Option<&str> {
        self.block_id.as_deref()
    }

    /// Returns where the link occurs.
    pub fn position(&self) -> LinkPosition {
        self.position
    }
}
