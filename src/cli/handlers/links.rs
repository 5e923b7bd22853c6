//! Outgoing links command handler.

use anyhow::Result;
use std::path::Path;

use super::{load_notes, note_by_id, select_note, truncate_str};
use crate::backlinks::{NoteCatalog, TitleResolver};
use crate::cli::LinksArgs;
use crate::cli::output::{LinkListing, OutputFormat, print_json};

pub fn handle_links(args: &LinksArgs, notes_dir: &Path) -> Result<()> {
    let notes = load_notes(notes_dir)?;
    let note = select_note(&notes, &args.note)?;
    let catalog = NoteCatalog::new(&notes);

    let listings: Vec<LinkListing> = note
        .metadata()
        .outgoing_links
        .iter()
        .map(|link| LinkListing {
            resolved_note_id: catalog.resolve(link.target()).map(str::to_string),
            link: link.clone(),
        })
        .filter(|listing| !args.unresolved || listing.resolved_note_id.is_none())
        .collect();

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No links found.");
            } else {
                println!("{:<8}  {:<40}  {:>5}  {}", "Type", "Target", "Line", "Resolves To");
                println!(
                    "{:<8}  {:<40}  {:>5}  {}",
                    "--------",
                    "----------------------------------------",
                    "-----",
                    "-----------"
                );

                for listing in &listings {
                    let link = &listing.link;
                    println!(
                        "{:<8}  {:<40}  {:>5}  {}",
                        link.kind().as_str(),
                        truncate_str(link.target(), 40),
                        link.position().line + 1,
                        listing.resolved_note_id.as_deref().unwrap_or("(unresolved)")
                    );
                }

                println!();
                println!("{} link(s)", listings.len());
            }
        }
        OutputFormat::Json => print_json(&listings)?,
        OutputFormat::Paths => {
            let mut seen: Vec<&str> = Vec::new();
            for id in listings.iter().filter_map(|l| l.resolved_note_id.as_deref()) {
                if seen.contains(&id) {
                    continue;
                }
                seen.push(id);
                if let Some(target) = note_by_id(&notes, id) {
                    println!("{}", notes_dir.join(target.id()).display());
                }
            }
        }
    }

    Ok(())
}
