//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Frontmatter, Link, Note, NoteMetadata};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Prints `data` as pretty JSON wrapped in [`Output`].
pub(crate) fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub path: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            path: note.path().to_string(),
        }
    }
}

/// An outgoing link with the note it resolves to, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListing {
    #[serde(flatten)]
    pub link: Link,
    pub resolved_note_id: Option<String>,
}

/// Derived metadata of one note.
#[derive(Debug, Serialize)]
pub struct MetaListing {
    #[serde(flatten)]
    pub note: NoteListing,
    pub frontmatter: Frontmatter,
    pub metadata: NoteMetadata,
}

/// A backlink occurrence in `--all` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkListing {
    pub source_note_id: String,
    pub line: usize,
    pub context: String,
}
