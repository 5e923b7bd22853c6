//! Whole-vault graph construction.

use crate::domain::{Note, title_key};
use crate::graph::{GraphData, GraphLink, GraphNode};
use std::collections::HashMap;
use tracing::debug;

/// Builds the graph of every note and every outgoing link.
///
/// Each note becomes a `note` node, in input order. Every entry of a note's
/// `outgoing_links` (of any link kind) becomes one [`GraphLink`]; nothing is
/// deduplicated, so repeated links and self-links all show up.
///
/// Targets are matched against titles with [`title_key`]. When two notes
/// share a title, links resolve to the first one. A target matching no note
/// gets an `unresolved` placeholder, created once per distinct key and
/// appended after the note nodes in discovery order. Targets that differ only
/// by case share a placeholder; targets that differ in whitespace or
/// punctuation do not.
///
/// # Examples
///
/// ```
/// use notegraph::domain::Note;
/// use notegraph::graph::build_graph;
///
/// let notes = vec![
///     Note::new("a", "A", "a", "[[B]] and [[Nowhere]]"),
///     Note::new("b", "B", "b", ""),
/// ];
/// let graph = build_graph(&notes);
/// assert_eq!(graph.nodes.len(), 3);
/// assert_eq!(graph.links.len(), 2);
/// assert_eq!(graph.node("unresolved-Nowhere").unwrap().link_count, 1);
/// ```
pub fn build_graph(notes: &[Note]) -> GraphData {
    let notes: Vec<&Note> = notes.iter().collect();
    assemble(&notes)
}

/// Builds a graph over a borrowed selection of notes.
pub(crate) fn assemble(notes: &[&Note]) -> GraphData {
    let mut nodes: Vec<GraphNode> = notes.iter().map(|n| GraphNode::for_note(n)).collect();

    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(notes.len());
    for (index, note) in notes.iter().enumerate() {
        by_key.entry(title_key(note.title())).or_insert(index);
    }

    let mut links = Vec::new();
    for (source_index, note) in notes.iter().enumerate() {
        for link in &note.metadata().outgoing_links {
            let target_index = *by_key.entry(title_key(link.target())).or_insert_with(|| {
                nodes.push(GraphNode::unresolved(link.target()));
                nodes.len() - 1
            });

            links.push(GraphLink {
                source: note.id().to_string(),
                target: nodes[target_index].id.clone(),
            });
            nodes[source_index].link_count += 1;
            nodes[target_index].link_count += 1;
        }
    }

    debug!(nodes = nodes.len(), links = links.len(), "built graph");
    GraphData { nodes, links }
}
