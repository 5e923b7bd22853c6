//! Graph command handler.

use anyhow::Result;
use std::path::Path;

use super::{load_notes, note_by_id, select_note, truncate_str};
use crate::cli::GraphArgs;
use crate::cli::config::Config;
use crate::cli::output::{OutputFormat, print_json};
use crate::graph::{GraphData, build_graph, build_local_graph};

pub fn handle_graph(args: &GraphArgs, notes_dir: &Path, config: &Config) -> Result<()> {
    let notes = load_notes(notes_dir)?;

    let graph = match &args.local {
        Some(identifier) => {
            let center = select_note(&notes, identifier)?;
            build_local_graph(&notes, center.id(), config.graph_depth(args.depth))
        }
        None => build_graph(&notes),
    };

    match args.format {
        OutputFormat::Human => print_human(&graph),
        OutputFormat::Json => print_json(&graph)?,
        OutputFormat::Paths => {
            for node in graph.nodes.iter().filter(|n| !n.is_unresolved()) {
                if let Some(note) = note_by_id(&notes, &node.id) {
                    println!("{}", notes_dir.join(note.id()).display());
                }
            }
        }
    }

    Ok(())
}

fn print_human(graph: &GraphData) {
    if graph.is_empty() {
        println!("Graph is empty.");
        return;
    }

    println!("{:<10}  {:<50}  {:>5}", "Type", "Title", "Links");
    println!(
        "{:<10}  {:<50}  {:>5}",
        "----------", "--------------------------------------------------", "-----"
    );
    for node in &graph.nodes {
        println!(
            "{:<10}  {:<50}  {:>5}",
            node.kind.as_str(),
            truncate_str(&node.title, 50),
            node.link_count
        );
    }

    if !graph.links.is_empty() {
        println!();
        for link in &graph.links {
            println!(
                "{} -> {}",
                node_title(graph, &link.source),
                node_title(graph, &link.target)
            );
        }
    }

    println!();
    println!(
        "{} node(s), {} link(s), {} unresolved",
        graph.nodes.len(),
        graph.links.len(),
        graph.unresolved().count()
    );
}

fn node_title<'a>(graph: &'a GraphData, id: &'a str) -> &'a str {
    graph.node(id).map_or(id, |n| n.title.as_str())
}
