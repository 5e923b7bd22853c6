//! Search command handler.

use anyhow::Result;
use std::path::Path;

use super::load_notes;
use crate::cli::SearchArgs;
use crate::cli::config::Config;
use crate::cli::output::{OutputFormat, print_json};
use crate::search::{SearchOptions, SearchResult, SearchService};

pub fn handle_search(args: &SearchArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let notes = load_notes(notes_dir)?;

    let options = SearchOptions::default().with_limit(config.search_limit(args.limit));
    let mut service = SearchService::with_options(options);
    service.index_notes(&notes);

    let results = service.search(&args.query, &notes);
    format_search_output(&results, args.format, notes_dir)
}

/// Format and print search results.
fn format_search_output(
    results: &[SearchResult],
    format: OutputFormat,
    notes_dir: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No matching notes found.");
            } else {
                for result in results {
                    println!(
                        "{} ({}) [{}, score: {:.2}]",
                        result.title, result.path, result.matched.field, result.score
                    );
                    if let Some(context) = &result.context {
                        println!("  {}", context);
                    }
                }
                println!();
                println!("{} result(s)", results.len());
            }
        }
        OutputFormat::Json => print_json(results)?,
        OutputFormat::Paths => {
            for result in results {
                println!("{}", notes_dir.join(&result.id).display());
            }
        }
    }
    Ok(())
}
