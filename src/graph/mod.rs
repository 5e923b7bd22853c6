//! Note graph projections: the whole vault, or the neighbourhood of one note.

mod builder;
mod data;
mod local;

pub use builder::build_graph;
pub use data::{GraphData, GraphLink, GraphNode, NodeKind};
pub use local::{DEFAULT_LOCAL_DEPTH, build_local_graph};
