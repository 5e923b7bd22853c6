//! Note struct representing a markdown note snapshot.

use crate::domain::NoteMetadata;
use crate::parser::{parse_frontmatter, update_note_metadata};
use serde::Serialize;

/// Key-value pairs parsed from a leading `---` block.
pub type Frontmatter = serde_json::Map<String, serde_json::Value>;

/// A note as handed to the engine by the storage layer.
///
/// The engine treats a `Note` as an immutable snapshot: it derives new
/// metadata from `content` but never changes the note itself.
///
/// # Examples
///
/// ```
/// use notegraph::domain::Note;
///
/// let note = Note::new("1", "Roadmap", "plans/roadmap", "See [[Q4 Goals]].");
/// assert_eq!(note.title(), "Roadmap");
/// assert_eq!(note.metadata().outgoing_links.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    id: String,
    title: String,
    path: String,
    content: String,
    metadata: NoteMetadata,
    frontmatter: Frontmatter,
}

impl Note {
    /// Creates a note, deriving metadata and frontmatter from `content`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::builder(id, title).path(path).content(content).build()
    }

    /// Creates a builder for a note with the given identity.
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> NoteBuilder {
        NoteBuilder {
            id: id.into(),
            title: title.into(),
            path: String::new(),
            content: String::new(),
            metadata: None,
        }
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title used for link resolution.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the hierarchical display path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw markdown content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the derived metadata.
    pub fn metadata(&self) -> &NoteMetadata {
        &self.metadata
    }

    /// Returns the parsed frontmatter.
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }
}

/// Builder for constructing a [`Note`].
pub struct NoteBuilder {
    id: String,
    title: String,
    path: String,
    content: String,
    metadata: Option<NoteMetadata>,
}

impl NoteBuilder {
    /// Sets the display path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the raw content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Uses previously stored metadata instead of deriving it.
    ///
    /// The caller is responsible for the metadata matching the content.
    pub fn metadata(mut self, metadata: NoteMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Builds the note.
    pub fn build(self) -> Note {
        let metadata = self
            .metadata
            .unwrap_or_else(|| update_note_metadata(&self.content));
        let frontmatter = parse_frontmatter(&self.content);
        Note {
            id: self.id,
            title: self.title,
            path: self.path,
            content: self.content,
            metadata,
            frontmatter,
        }
    }
}
