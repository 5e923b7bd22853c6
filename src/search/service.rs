//! The search service: an owned index plus the query pipeline.

use crate::domain::Note;
use crate::search::index::{SearchDocument, SearchField, SearchIndex, TermExpansion};
use crate::search::query::ParsedQuery;
use crate::search::text::{match_context, strip_markdown, tokenize};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Tunables for [`SearchService`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Maximum number of results returned.
    pub limit: usize,
    /// Edit distance allowed, as a fraction of query term length.
    pub fuzzy: f64,
    /// Whether query terms also match longer index terms they start.
    pub prefix: bool,
    /// Characters kept before a snippet match.
    pub context_before: usize,
    /// Characters kept after a snippet match.
    pub context_after: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            fuzzy: 0.2,
            prefix: true,
            context_before: 40,
            context_after: 60,
        }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn expansion(&self) -> TermExpansion {
        TermExpansion {
            prefix: self.prefix,
            fuzzy: self.fuzzy,
        }
    }
}

/// Why a result matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMatch {
    /// Field with the largest share of the score.
    pub field: SearchField,
    /// Index terms that matched.
    pub terms: Vec<String>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub path: String,
    pub score: f64,
    #[serde(rename = "match")]
    pub matched: SearchMatch,
    /// Snippet of the first content line containing a query term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Full-text search over a set of notes.
///
/// The service holds its own index; notes are copied into it, so callers
/// keep ownership of their collection. Build it once with
/// [`index_notes`](Self::index_notes), then keep it current with
/// [`add_note`](Self::add_note), [`update_note`](Self::update_note) and
/// [`remove_note`](Self::remove_note).
///
/// # Examples
///
/// ```
/// use notegraph::domain::Note;
/// use notegraph::search::SearchService;
///
/// let notes = vec![Note::new("1", "TypeScript Guide", "guides/ts", "typed JavaScript")];
/// let mut search = SearchService::new();
/// search.index_notes(&notes);
///
/// let results = search.search("typescript", &notes);
/// assert_eq!(results[0].id, "1");
/// assert!(search.search("   ", &notes).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SearchService {
    index: SearchIndex,
    options: SearchOptions,
    initialized: bool,
}

impl SearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// True once [`index_notes`](Self::index_notes) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of indexed notes.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Replaces the whole index with `notes`.
    pub fn index_notes(&mut self, notes: &[Note]) {
        self.index.clear();
        for note in notes {
            self.index.add(&document_for(note));
        }
        self.initialized = true;
        debug!(
            notes = self.index.len(),
            terms = self.index.term_count(),
            "search index rebuilt"
        );
    }

    /// Indexes one note, replacing any earlier version with the same id.
    pub fn add_note(&mut self, note: &Note) {
        self.index.add(&document_for(note));
    }

    /// Removes a note. Unknown ids are ignored.
    pub fn remove_note(&mut self, id: &str) {
        if !self.index.remove(id) {
            debug!(id, "note was not indexed");
        }
    }

    pub fn update_note(&mut self, note: &Note) {
        self.add_note(note);
    }

    /// Runs `query` against the index.
    ///
    /// `notes` supplies the current collection for the `tag:`/`path:`
    /// filters and for snippets. Results are sorted by score and capped at
    /// the configured limit. An empty or blank query returns nothing.
    pub fn search(&self, query: &str, notes: &[Note]) -> Vec<SearchResult> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let parsed = ParsedQuery::parse(query);
        let hits = if parsed.is_match_all() {
            self.index.match_all()
        } else {
            self.index
                .query(&tokenize(parsed.text()), self.options.expansion())
        };

        let mut by_id: HashMap<&str, &Note> = HashMap::with_capacity(notes.len());
        for note in notes {
            by_id.entry(note.id()).or_insert(note);
        }

        let results: Vec<SearchResult> = hits
            .into_iter()
            .filter(|hit| parsed.accepts(by_id.get(hit.id).copied()))
            .take(self.options.limit)
            .map(|hit| {
                let context = by_id.get(hit.id).and_then(|note| {
                    match_context(
                        note.content(),
                        parsed.text(),
                        self.options.context_before,
                        self.options.context_after,
                    )
                });
                SearchResult {
                    id: hit.id.to_string(),
                    title: hit.title.to_string(),
                    path: hit.path.to_string(),
                    score: hit.score,
                    matched: SearchMatch {
                        field: hit.field,
                        terms: hit.terms,
                    },
                    context,
                }
            })
            .collect();

        debug!(query, results = results.len(), "search");
        results
    }
}

fn document_for(note: &Note) -> SearchDocument {
    SearchDocument {
        id: note.id().to_string(),
        title: note.title().to_string(),
        path: note.path().to_string(),
        tags: note.metadata().inline_tags.join(" "),
        content: strip_markdown(note.content()),
    }
}
