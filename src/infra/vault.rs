//! Loading notes from a directory of markdown files.

use crate::domain::Note;
use crate::parser::parse_frontmatter;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Errors while reading a vault from disk.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("invalid encoding in {path}: {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: String },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Scans a directory recursively for markdown (`.md`) files.
///
/// Skips hidden files and directories (starting with `.`), including the
/// `.notegraph/` directory holding the backlink database. Paths are
/// relative to `dir` and come out sorted by file name at each level.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the directory doesn't exist.
/// Returns `FsError::NotADirectory` if the path is not a directory.
pub fn scan_notes_directory(dir: &Path) -> Result<impl Iterator<Item = PathBuf>, FsError> {
    if !dir.exists() {
        return Err(FsError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(FsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let root = dir.to_path_buf();
    let iter = WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(has_md_extension)
        .filter_map(move |e| e.path().strip_prefix(&root).ok().map(Path::to_path_buf));

    Ok(iter)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn has_md_extension(entry: &DirEntry) -> bool {
    entry.path().extension().is_some_and(|e| e == "md")
}

/// Reads one note, identified by its path relative to the vault root.
///
/// # Errors
///
/// Returns `FsError::InvalidEncoding` if the file is not UTF-8, and the
/// usual I/O variants if it cannot be read.
pub fn read_note(root: &Path, relative: &Path) -> Result<Note, FsError> {
    let path = root.join(relative);
    let bytes = std::fs::read(&path).map_err(|e| FsError::from_io(&path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| FsError::InvalidEncoding {
        path: path.clone(),
        encoding: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;
    let content = match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => stripped.to_string(),
        None => content,
    };

    Ok(note_from_file(relative, content))
}

/// Builds a note from a file's relative path and content.
///
/// The id is the relative path with `/` separators, the display path drops
/// the `.md` extension, and the title is the frontmatter `title` when it
/// is a non-empty string, otherwise the file stem.
pub fn note_from_file(relative: &Path, content: String) -> Note {
    let id = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let path = id.strip_suffix(".md").unwrap_or(&id).to_string();

    let title = parse_frontmatter(&content)
        .get("title")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            relative
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.clone())
        });

    Note::new(id, title, path, content)
}

/// Loads every markdown note under `dir`.
///
/// Files that cannot be read or decoded are skipped with a warning.
///
/// # Errors
///
/// Fails only when `dir` itself is missing or not a directory.
pub fn load_vault(dir: &Path) -> Result<Vec<Note>, FsError> {
    let mut notes = Vec::new();
    for relative in scan_notes_directory(dir)? {
        match read_note(dir, &relative) {
            Ok(note) => notes.push(note),
            Err(err) => warn!(path = %relative.display(), error = %err, "skipping unreadable note"),
        }
    }
    debug!(dir = %dir.display(), notes = notes.len(), "loaded vault");
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &[u8]) {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn scanned(dir: &TempDir) -> Vec<PathBuf> {
        scan_notes_directory(dir.path()).unwrap().collect()
    }

    // ===========================================
    // scan_notes_directory
    // ===========================================

    #[test]
    fn scan_empty_directory_returns_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(scanned(&dir).is_empty());
    }

    #[test]
    fn scan_finds_md_files_recursively_in_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.md", b"");
        write(&dir, "a.md", b"");
        write(&dir, "sub/c.md", b"");
        write(&dir, "notes.txt", b"");

        assert_eq!(
            scanned(&dir),
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("b.md"),
                PathBuf::from("sub/c.md")
            ]
        );
    }

    #[test]
    fn scan_skips_hidden_entries() {
        let dir = TempDir::new().unwrap();
        write(&dir, ".hidden.md", b"");
        write(&dir, ".notegraph/cache.md", b"");
        write(&dir, "visible.md", b"");

        assert_eq!(scanned(&dir), vec![PathBuf::from("visible.md")]);
    }

    #[test]
    fn scan_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            scan_notes_directory(&missing),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn scan_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "file.md", b"");
        assert!(matches!(
            scan_notes_directory(&dir.path().join("file.md")),
            Err(FsError::NotADirectory { .. })
        ));
    }

    // ===========================================
    // note_from_file / read_note
    // ===========================================

    #[test]
    fn title_defaults_to_file_stem() {
        let note = note_from_file(Path::new("projects/Road Map.md"), "body".to_string());
        assert_eq!(note.id(), "projects/Road Map.md");
        assert_eq!(note.path(), "projects/Road Map");
        assert_eq!(note.title(), "Road Map");
    }

    #[test]
    fn frontmatter_title_wins() {
        let note = note_from_file(
            Path::new("x.md"),
            "---\ntitle: Real Title\n---\nbody".to_string(),
        );
        assert_eq!(note.title(), "Real Title");
    }

    #[test]
    fn read_note_strips_bom() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bom.md", "\u{FEFF}[[Target]]".as_bytes());

        let note = read_note(dir.path(), Path::new("bom.md")).unwrap();
        assert_eq!(note.content(), "[[Target]]");
        assert_eq!(note.metadata().outgoing_links[0].position().start, 0);
    }

    #[test]
    fn read_note_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.md", &[0x66, 0xFF, 0xFE]);
        assert!(matches!(
            read_note(dir.path(), Path::new("bad.md")),
            Err(FsError::InvalidEncoding { .. })
        ));
    }

    // ===========================================
    // load_vault
    // ===========================================

    #[test]
    fn load_vault_reads_notes_and_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "alpha.md", b"Links to [[beta]]");
        write(&dir, "beta.md", b"---\ntitle: Beta\n---\nHello");
        write(&dir, "broken.md", &[0xFF]);

        let notes = load_vault(dir.path()).unwrap();
        let titles: Vec<_> = notes.iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["alpha", "Beta"]);
        assert_eq!(notes[0].metadata().outgoing_links.len(), 1);
    }
}
