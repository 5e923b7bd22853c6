//! Backlinks command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{backlink_db_path, load_notes, note_by_id, select_note, truncate_str};
use crate::backlinks::{BacklinkRepository, SqliteIndex};
use crate::cli::BacklinksArgs;
use crate::cli::output::{BacklinkListing, OutputFormat, print_json};
use crate::domain::group_by_source;

pub fn handle_backlinks(args: &BacklinksArgs, notes_dir: &Path) -> Result<()> {
    let notes = load_notes(notes_dir)?;
    let note = select_note(&notes, &args.note)?;

    let db_path = backlink_db_path(notes_dir);
    let index = SqliteIndex::open(&db_path)
        .with_context(|| format!("failed to open backlink index at {}", db_path.display()))?;

    let backlinks = index
        .get_by_target(note.id())
        .with_context(|| "failed to query backlinks")?;
    let groups = group_by_source(&backlinks);

    let title_of = |id: &str| {
        note_by_id(&notes, id)
            .map(|n| n.title().to_string())
            .unwrap_or_else(|| id.to_string())
    };

    match args.format {
        OutputFormat::Human => {
            if backlinks.is_empty() {
                println!("No backlinks found.");
            } else if args.all {
                for backlink in &backlinks {
                    println!(
                        "{}:{}  {}",
                        backlink.source_note_id,
                        backlink.link.position().line + 1,
                        backlink.context
                    );
                }
                println!();
                println!("{} backlink(s)", backlinks.len());
            } else {
                println!("{:<40}  {:>5}  {}", "Source", "Links", "Context");
                println!(
                    "{:<40}  {:>5}  {}",
                    "----------------------------------------", "-----", "-------"
                );

                for group in &groups {
                    println!(
                        "{:<40}  {:>5}  {}",
                        truncate_str(&title_of(&group.source_note_id), 40),
                        group.count,
                        truncate_str(&group.context, 60)
                    );
                }

                println!();
                println!(
                    "{} backlink(s) from {} note(s)",
                    backlinks.len(),
                    groups.len()
                );
            }
        }
        OutputFormat::Json => {
            if args.all {
                let listings: Vec<BacklinkListing> = backlinks
                    .iter()
                    .map(|b| BacklinkListing {
                        source_note_id: b.source_note_id.clone(),
                        line: b.link.position().line,
                        context: b.context.clone(),
                    })
                    .collect();
                print_json(&listings)?;
            } else {
                print_json(&groups)?;
            }
        }
        OutputFormat::Paths => {
            for group in &groups {
                println!("{}", notes_dir.join(&group.source_note_id).display());
            }
        }
    }

    Ok(())
}
