//! Graph output types.

use crate::domain::Note;
use serde::Serialize;
use std::fmt;

/// Prefix of the id given to placeholder nodes.
pub(crate) const UNRESOLVED_PREFIX: &str = "unresolved-";

/// Whether a node stands for a real note or a missing link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Note,
    Unresolved,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Note => "note",
            NodeKind::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graph vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Times this node appears as an endpoint; a self-link counts twice.
    pub link_count: usize,
}

impl GraphNode {
    pub(crate) fn for_note(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            kind: NodeKind::Note,
            link_count: 0,
        }
    }

    /// A placeholder for a link target that matches no note.
    ///
    /// The title keeps the target text exactly as first written.
    pub(crate) fn unresolved(target: &str) -> Self {
        Self {
            id: format!("{UNRESOLVED_PREFIX}{target}"),
            title: target.to_string(),
            kind: NodeKind::Unresolved,
            link_count: 0,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.kind == NodeKind::Unresolved
    }
}

/// One edge per link occurrence. Parallel edges are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Nodes and links of a graph projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Finds a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Iterates over placeholder nodes.
    pub fn unresolved(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.is_unresolved())
    }
}
