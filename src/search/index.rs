//! Inverted index with BM25+ scoring.

use crate::search::fuzzy::{bounded_distance, max_distance};
use crate::search::text::tokenize;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Bound;

const FIELD_COUNT: usize = 4;

// BM25+ parameters.
const K1: f64 = 1.2;
const B: f64 = 0.7;
const DELTA: f64 = 0.5;

const PREFIX_WEIGHT: f64 = 0.375;
const FUZZY_WEIGHT: f64 = 0.45;

/// An indexed document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Tags,
    Content,
    Path,
}

impl SearchField {
    pub const ALL: [SearchField; FIELD_COUNT] = [
        SearchField::Title,
        SearchField::Tags,
        SearchField::Content,
        SearchField::Path,
    ];

    /// Multiplier applied to scores from this field.
    pub fn boost(&self) -> f64 {
        match self {
            SearchField::Title => 3.0,
            SearchField::Tags => 2.0,
            SearchField::Content | SearchField::Path => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Tags => "tags",
            SearchField::Content => "content",
            SearchField::Path => "path",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text of one document, split into indexed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub path: String,
    /// Space-separated tags.
    pub tags: String,
    /// Content as it should be indexed, already stripped of markup.
    pub content: String,
}

impl SearchDocument {
    fn field(&self, field: SearchField) -> &str {
        match field {
            SearchField::Title => &self.title,
            SearchField::Tags => &self.tags,
            SearchField::Content => &self.content,
            SearchField::Path => &self.path,
        }
    }
}

/// How query terms are widened to index terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermExpansion {
    /// Match index terms that start with the query term.
    pub prefix: bool,
    /// Edit distance allowed, as a fraction of the query term length.
    pub fuzzy: f64,
}

impl Default for TermExpansion {
    fn default() -> Self {
        Self {
            prefix: true,
            fuzzy: 0.2,
        }
    }
}

/// A document matched by a query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub path: &'a str,
    pub score: f64,
    /// Field that contributed the most to the score.
    pub field: SearchField,
    /// Distinct index terms that matched, in discovery order.
    pub terms: Vec<String>,
}

#[derive(Debug)]
struct StoredDocument {
    id: String,
    title: String,
    path: String,
    field_lengths: [usize; FIELD_COUNT],
    terms: Vec<String>,
}

/// Per field, short document id to term frequency.
type Postings = [HashMap<u32, u32>; FIELD_COUNT];

#[derive(Debug, Default)]
struct Accumulator {
    score: f64,
    field_scores: [f64; FIELD_COUNT],
    terms: Vec<String>,
}

impl Accumulator {
    fn add(&mut self, field: SearchField, score: f64, term: &str) {
        self.score += score;
        self.field_scores[field.index()] += score;
        if !self.terms.iter().any(|t| t == term) {
            self.terms.push(term.to_string());
        }
    }

    fn merge(&mut self, other: Accumulator) {
        self.score += other.score;
        for (mine, theirs) in self.field_scores.iter_mut().zip(other.field_scores) {
            *mine += theirs;
        }
        for term in other.terms {
            if !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
    }

    fn best_field(&self) -> SearchField {
        let mut best = SearchField::Title;
        for field in SearchField::ALL {
            if self.field_scores[field.index()] > self.field_scores[best.index()] {
                best = field;
            }
        }
        best
    }
}

/// An incremental inverted index.
///
/// Documents are added and removed one at a time without rebuilding the
/// rest. Each document gets an internal short id in insertion order, which
/// also breaks score ties.
#[derive(Debug, Default)]
pub struct SearchIndex {
    terms: BTreeMap<String, Postings>,
    documents: BTreeMap<u32, StoredDocument>,
    short_ids: HashMap<String, u32>,
    next_short_id: u32,
    field_length_totals: [usize; FIELD_COUNT],
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.short_ids.contains_key(id)
    }

    /// Number of distinct terms across all fields.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Drops every document.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Adds a document, replacing any previous document with the same id.
    pub fn add(&mut self, document: &SearchDocument) {
        self.remove(&document.id);

        let short_id = self.next_short_id;
        self.next_short_id += 1;

        let mut field_lengths = [0; FIELD_COUNT];
        let mut terms: Vec<String> = Vec::new();

        for field in SearchField::ALL {
            let tokens = tokenize(document.field(field));
            let mut frequencies: HashMap<&str, u32> = HashMap::new();
            for token in &tokens {
                *frequencies.entry(token.as_str()).or_default() += 1;
            }
            field_lengths[field.index()] = frequencies.len();

            for token in &tokens {
                let Some(frequency) = frequencies.remove(token.as_str()) else {
                    continue;
                };
                self.terms.entry(token.clone()).or_default()[field.index()]
                    .insert(short_id, frequency);
                if !terms.contains(token) {
                    terms.push(token.clone());
                }
            }
        }

        for (total, length) in self.field_length_totals.iter_mut().zip(field_lengths) {
            *total += length;
        }
        self.short_ids.insert(document.id.clone(), short_id);
        self.documents.insert(
            short_id,
            StoredDocument {
                id: document.id.clone(),
                title: document.title.clone(),
                path: document.path.clone(),
                field_lengths,
                terms,
            },
        );
    }

    /// Removes a document. Returns `false` when it was not indexed.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(short_id) = self.short_ids.remove(id) else {
            return false;
        };
        let Some(document) = self.documents.remove(&short_id) else {
            return false;
        };

        for term in &document.terms {
            let Some(postings) = self.terms.get_mut(term) else {
                continue;
            };
            for field in postings.iter_mut() {
                field.remove(&short_id);
            }
            if postings.iter().all(HashMap::is_empty) {
                self.terms.remove(term);
            }
        }
        for (total, length) in self.field_length_totals.iter_mut().zip(document.field_lengths) {
            *total -= length;
        }
        true
    }

    /// Every document with score 1, in insertion order.
    pub fn match_all(&self) -> Vec<SearchHit<'_>> {
        self.documents
            .values()
            .map(|doc| SearchHit {
                id: &doc.id,
                title: &doc.title,
                path: &doc.path,
                score: 1.0,
                field: SearchField::Content,
                terms: Vec::new(),
            })
            .collect()
    }

    /// Finds documents matching every query term, best first.
    ///
    /// Each query term matches exactly, by prefix, or within the fuzzy edit
    /// distance; expanded matches are weighted down. Per-term scores are
    /// summed and the total multiplied by the number of query terms.
    pub fn query(&self, query_terms: &[String], expansion: TermExpansion) -> Vec<SearchHit<'_>> {
        let mut combined: Option<BTreeMap<u32, Accumulator>> = None;

        for term in query_terms {
            let matches = self.score_term(term, expansion);
            combined = Some(match combined {
                None => matches,
                Some(mut so_far) => {
                    so_far.retain(|short_id, _| matches.contains_key(short_id));
                    for (short_id, accumulator) in matches {
                        if let Some(existing) = so_far.get_mut(&short_id) {
                            existing.merge(accumulator);
                        }
                    }
                    so_far
                }
            });
        }

        let quality = query_terms.len() as f64;
        let mut hits: Vec<SearchHit<'_>> = combined
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(short_id, accumulator)| {
                let doc = self.documents.get(&short_id)?;
                Some(SearchHit {
                    id: &doc.id,
                    title: &doc.title,
                    path: &doc.path,
                    score: accumulator.score * quality,
                    field: accumulator.best_field(),
                    terms: accumulator.terms,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits
    }

    /// Index terms matching `term`, with their weights.
    fn expand<'a>(&'a self, term: &str, expansion: TermExpansion) -> Vec<(&'a str, f64)> {
        let term_length = term.chars().count() as f64;
        let mut expanded = Vec::new();

        if let Some((key, _)) = self.terms.get_key_value(term) {
            expanded.push((key.as_str(), 1.0));
        }

        if expansion.prefix {
            let range = self
                .terms
                .range::<str, _>((Bound::Included(term), Bound::Unbounded));
            for (key, _) in range {
                if !key.starts_with(term) {
                    break;
                }
                if key == term {
                    continue;
                }
                let distance = key.chars().count() as f64 - term_length;
                let weight = PREFIX_WEIGHT * term_length / (term_length + 0.3 * distance);
                expanded.push((key.as_str(), weight));
            }
        }

        let max = max_distance(term, expansion.fuzzy);
        if max > 0 {
            for key in self.terms.keys() {
                if key == term || (expansion.prefix && key.starts_with(term)) {
                    continue;
                }
                if let Some(distance) = bounded_distance(term, key, max) {
                    let weight = FUZZY_WEIGHT * term_length / (term_length + distance as f64);
                    expanded.push((key.as_str(), weight));
                }
            }
        }

        expanded
    }

    fn score_term(&self, term: &str, expansion: TermExpansion) -> BTreeMap<u32, Accumulator> {
        let mut results: BTreeMap<u32, Accumulator> = BTreeMap::new();
        let document_count = self.documents.len() as f64;

        for (key, weight) in self.expand(term, expansion) {
            let Some(postings) = self.terms.get(key) else {
                continue;
            };
            for field in SearchField::ALL {
                let documents = &postings[field.index()];
                if documents.is_empty() {
                    continue;
                }
                let average_length = self.average_length(field);
                let matching = documents.len() as f64;

                for (&short_id, &frequency) in documents {
                    let Some(doc) = self.documents.get(&short_id) else {
                        continue;
                    };
                    let raw = bm25_plus(
                        f64::from(frequency),
                        matching,
                        document_count,
                        doc.field_lengths[field.index()] as f64,
                        average_length,
                    );
                    results
                        .entry(short_id)
                        .or_default()
                        .add(field, weight * field.boost() * raw, key);
                }
            }
        }

        results
    }

    fn average_length(&self, field: SearchField) -> f64 {
        if self.documents.is_empty() {
            return 0.0;
        }
        self.field_length_totals[field.index()] as f64 / self.documents.len() as f64
    }
}

fn bm25_plus(
    frequency: f64,
    matching_documents: f64,
    total_documents: f64,
    field_length: f64,
    average_field_length: f64,
) -> f64 {
    let idf = (1.0 + (total_documents - matching_documents + 0.5) / (matching_documents + 0.5)).ln();
    let normalized = 1.0 - B + B * field_length / average_field_length;
    idf * (DELTA + frequency * (K1 + 1.0) / (frequency + K1 * normalized))
}
