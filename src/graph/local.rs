//! Bounded-depth neighbourhood graph around one note.

use crate::domain::{Note, title_key};
use crate::graph::builder::assemble;
use crate::graph::{GraphData, NodeKind};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Hops expanded when no depth is given.
pub const DEFAULT_LOCAL_DEPTH: usize = 1;

/// Builds the graph of notes within `depth` hops of `active_id`.
///
/// Each hop follows links in both directions: targets the current note links
/// to, and notes whose links name the current note's title. Missing targets
/// seen while expanding are kept as `unresolved` placeholders. The result is
/// the full graph of the selected notes, with every link that leaves the
/// selection dropped and `link_count` recomputed over the links that remain.
///
/// Returns an empty graph when `active_id` matches no note. A depth of zero
/// yields the active note alone.
///
/// # Examples
///
/// ```
/// use notegraph::domain::Note;
/// use notegraph::graph::build_local_graph;
///
/// let notes = vec![
///     Note::new("a", "A", "a", "[[B]]"),
///     Note::new("b", "B", "b", "[[C]]"),
///     Note::new("c", "C", "c", ""),
/// ];
/// assert_eq!(build_local_graph(&notes, "a", 1).nodes.len(), 2);
/// assert_eq!(build_local_graph(&notes, "a", 2).nodes.len(), 3);
/// ```
pub fn build_local_graph(notes: &[Note], active_id: &str, depth: usize) -> GraphData {
    let Some(active) = notes.iter().position(|n| n.id() == active_id) else {
        debug!(active_id, "local graph requested for unknown note");
        return GraphData::default();
    };

    let mut by_key: HashMap<String, usize> = HashMap::with_capacity(notes.len());
    for (index, note) in notes.iter().enumerate() {
        by_key.entry(title_key(note.title())).or_insert(index);
    }

    let mut included = vec![false; notes.len()];
    included[active] = true;
    let mut missing: HashSet<String> = HashSet::new();
    let mut queue = VecDeque::from([(active, 0usize)]);

    while let Some((index, hop)) = queue.pop_front() {
        if hop >= depth {
            continue;
        }
        let note = &notes[index];

        for link in &note.metadata().outgoing_links {
            let key = title_key(link.target());
            match by_key.get(&key) {
                Some(&target) => {
                    if !included[target] {
                        included[target] = true;
                        queue.push_back((target, hop + 1));
                    }
                }
                None => {
                    missing.insert(key);
                }
            }
        }

        let own_key = title_key(note.title());
        for (other, candidate) in notes.iter().enumerate() {
            if included[other] {
                continue;
            }
            let links_here = candidate
                .metadata()
                .outgoing_links
                .iter()
                .any(|l| title_key(l.target()) == own_key);
            if links_here {
                included[other] = true;
                queue.push_back((other, hop + 1));
            }
        }
    }

    let selected: Vec<&Note> = notes
        .iter()
        .zip(&included)
        .filter_map(|(note, &keep)| keep.then_some(note))
        .collect();
    let graph = restrict(assemble(&selected), &missing);

    debug!(
        active_id,
        depth,
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        "built local graph"
    );
    graph
}

/// Keeps note nodes and the tracked placeholders, drops links with a pruned
/// endpoint, then recounts degrees.
fn restrict(graph: GraphData, missing: &HashSet<String>) -> GraphData {
    let GraphData { nodes, links } = graph;

    let mut nodes: Vec<_> = nodes
        .into_iter()
        .filter(|n| n.kind == NodeKind::Note || missing.contains(&title_key(&n.title)))
        .collect();

    let position: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    let links: Vec<_> = links
        .into_iter()
        .filter(|l| position.contains_key(&l.source) && position.contains_key(&l.target))
        .collect();

    for node in &mut nodes {
        node.link_count = 0;
    }
    for link in &links {
        nodes[position[&link.source]].link_count += 1;
        nodes[position[&link.target]].link_count += 1;
    }

    GraphData { nodes, links }
}
