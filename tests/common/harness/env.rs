//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{NotegraphCommand, TestNote};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary vault.
///
/// The temp directory holds the vault and a separate home directory for
/// config lookup; both are removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the vault directory
    notes_dir: PathBuf,
    /// Path used as HOME by spawned commands
    home_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment with an empty vault.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("vault");
        let home_dir = temp_dir.path().join("home");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create vault directory");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            home_dir,
        }
    }

    /// Returns the path to the vault directory.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the path where the backlink database is stored.
    pub fn db_path(&self) -> PathBuf {
        self.notes_dir.join(".notegraph").join("backlinks.db")
    }

    /// Writes a test note into the vault and returns its path.
    pub fn add_note(&self, note: &TestNote) -> PathBuf {
        self.write_file(&note.relative_path(), &note.to_markdown())
    }

    /// Writes a file relative to the vault, creating folders as needed.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.notes_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create folder");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Removes a file relative to the vault.
    pub fn remove_file(&self, name: &str) {
        std::fs::remove_file(self.notes_dir.join(name)).expect("Failed to remove file");
    }

    /// Writes `notegraph/config.toml` under the isolated config directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.home_dir.join(".config").join("notegraph");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Creates a NotegraphCommand configured for this test environment.
    pub fn cmd(&self) -> NotegraphCommand {
        NotegraphCommand::new()
            .config_home(&self.home_dir)
            .dir(&self.notes_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_vault() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir());
        assert!(!env.db_path().exists());
    }

    #[test]
    fn test_env_add_note_writes_file() {
        let env = TestEnv::new();
        let path = env.add_note(&TestNote::new("Alpha").folder("sub").body("hello"));
        assert_eq!(path, env.notes_dir().join("sub/Alpha.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello");
    }
}
