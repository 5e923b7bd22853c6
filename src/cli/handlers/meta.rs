//! Metadata command handler.

use anyhow::Result;
use std::path::Path;

use super::{load_notes, select_note};
use crate::cli::MetaArgs;
use crate::cli::output::{MetaListing, NoteListing, OutputFormat, print_json};

pub fn handle_meta(args: &MetaArgs, notes_dir: &Path) -> Result<()> {
    let notes = load_notes(notes_dir)?;
    let note = select_note(&notes, &args.note)?;
    let metadata = note.metadata();

    match args.format {
        OutputFormat::Human => {
            println!("{}", note.title());
            println!("  id:    {}", note.id());
            println!("  path:  {}", note.path());
            println!("  words: {}", metadata.word_count);
            println!("  links: {}", metadata.outgoing_links.len());

            if !note.frontmatter().is_empty() {
                println!();
                println!("Frontmatter:");
                for (key, value) in note.frontmatter() {
                    match value.as_str() {
                        Some(text) => println!("  {}: {}", key, text),
                        None => println!("  {}: {}", key, value),
                    }
                }
            }

            if !metadata.headings.is_empty() {
                println!();
                println!("Headings:");
                for heading in &metadata.headings {
                    let indent = "  ".repeat(heading.level as usize);
                    println!("{}{}", indent, heading.text);
                }
            }

            if !metadata.inline_tags.is_empty() {
                println!();
                println!("Tags: {}", metadata.inline_tags.join(", "));
            }

            if !metadata.block_ids.is_empty() {
                println!();
                println!("Blocks: {}", metadata.block_ids.join(", "));
            }
        }
        OutputFormat::Json => print_json(MetaListing {
            note: NoteListing::from(note),
            frontmatter: note.frontmatter().clone(),
            metadata: metadata.clone(),
        })?,
        OutputFormat::Paths => println!("{}", notes_dir.join(note.id()).display()),
    }

    Ok(())
}
