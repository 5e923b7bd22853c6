//! Index command handler.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::{backlink_db_path, load_notes};
use crate::backlinks::{SqliteIndex, sync_vault};
use crate::cli::IndexArgs;
use crate::cli::config::Config;
use crate::cli::output::{OutputFormat, print_json};

pub fn handle_index(args: &IndexArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let notes = load_notes(notes_dir)?;

    let db_path = backlink_db_path(notes_dir);
    let mut index = SqliteIndex::open(&db_path)
        .with_context(|| format!("failed to open backlink index at {}", db_path.display()))?;

    let context_length = config.context_length(args.context_length);
    info!(notes = notes.len(), context_length, "indexing vault");

    let summary = sync_vault(&mut index, &notes, context_length)
        .with_context(|| "failed to update backlink index")?;

    match args.format {
        OutputFormat::Human => {
            println!(
                "Indexed {} notes, {} backlink(s)",
                summary.notes, summary.backlinks
            );
            if summary.purged > 0 {
                println!("  removed backlinks of {} deleted note(s)", summary.purged);
            }
        }
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Paths => {
            for note in &notes {
                println!("{}", notes_dir.join(note.id()).display());
            }
        }
    }

    Ok(())
}
