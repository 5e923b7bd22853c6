//! Builder for test notes written as markdown files.

#![allow(dead_code)]

/// Builder for a markdown note file.
///
/// The file is named after the title unless a folder or file stem is set,
/// so a note's title resolves to it without frontmatter.
#[derive(Debug, Clone)]
pub struct TestNote {
    title: String,
    folder: Option<String>,
    stem: Option<String>,
    frontmatter: Vec<(String, String)>,
    body: String,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            folder: None,
            stem: None,
            frontmatter: Vec::new(),
            body: String::new(),
        }
    }

    /// Places the note in a subfolder of the vault.
    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    /// Uses a file stem different from the title.
    ///
    /// The title is then written to the frontmatter.
    pub fn stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = Some(stem.into());
        self
    }

    /// Adds a raw frontmatter line `key: value`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.frontmatter.push((key.into(), value.into()));
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the vault-relative file path, which is also the note id.
    pub fn relative_path(&self) -> String {
        let stem = self.stem.as_deref().unwrap_or(&self.title);
        match &self.folder {
            Some(folder) => format!("{}/{}.md", folder, stem),
            None => format!("{}.md", stem),
        }
    }

    /// Renders the file content.
    pub fn to_markdown(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        if self.stem.is_some() {
            lines.push(format!("title: {}", self.title));
        }
        lines.extend(self.frontmatter.iter().map(|(k, v)| format!("{}: {}", k, v)));

        if lines.is_empty() {
            self.body.clone()
        } else {
            format!("---\n{}\n---\n{}", lines.join("\n"), self.body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_path_follows_title() {
        let note = TestNote::new("Alpha");
        assert_eq!(note.relative_path(), "Alpha.md");
        assert_eq!(note.to_markdown(), "");
    }

    #[test]
    fn test_note_in_folder_with_stem() {
        let note = TestNote::new("Project Alpha")
            .folder("projects")
            .stem("alpha")
            .body("Body");
        assert_eq!(note.relative_path(), "projects/alpha.md");
        assert_eq!(note.to_markdown(), "---\ntitle: Project Alpha\n---\nBody");
    }

    #[test]
    fn test_note_extra_fields() {
        let note = TestNote::new("Tagged").field("tags", "[\"a\", \"b\"]");
        assert_eq!(note.to_markdown(), "---\ntags: [\"a\", \"b\"]\n---\n");
    }
}
