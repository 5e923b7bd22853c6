//! File system access.

mod vault;

pub use vault::{FsError, load_vault, note_from_file, read_note, scan_notes_directory};
