//! Full-text search over notes.
//!
//! [`SearchService`] owns an incremental inverted index over four fields
//! (title, tags, content, path) and answers queries with BM25+ ranking,
//! prefix and fuzzy term expansion, `tag:`/`path:` filters and content
//! snippets. Each service is an independent value; there is no global index.

mod fuzzy;
mod index;
mod query;
mod service;
mod text;

pub use index::{SearchDocument, SearchField, SearchHit, SearchIndex, TermExpansion};
pub use query::ParsedQuery;
pub use service::{SearchMatch, SearchOptions, SearchResult, SearchService};
pub use text::{match_context, strip_markdown, tokenize};
