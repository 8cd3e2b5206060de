// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: one value that owns the index and the document
//! snapshot and answers queries.
//!
//! [`Engine::open`] is the one-shot load: read both files, validate the
//! index, done. After construction the engine is immutable - queries only
//! read, so a shared reference can serve any number of threads without
//! locks. There is no global; whoever builds the engine decides how to
//! share it.
//!
//! Query flow: parse → route to the matching scorer → take the top k →
//! attach titles, urls, and highlighted snippets from the snapshot.

use crate::analyze::raw_words;
use crate::boolean::score_boolean;
use crate::phrase::match_phrase;
use crate::query::{parse_query, Query};
use crate::score::score_simple;
use crate::snippet::{build_snippet, SNIPPET_MAX_LEN};
use crate::store::{self, StoreError};
use crate::types::{DocStore, InvertedIndex, SearchHit};
use std::path::Path;

/// Results returned when the caller doesn't say how many they want.
pub const DEFAULT_TOP_K: usize = 5;

/// Where the index lives unless overridden.
pub const DEFAULT_INDEX_PATH: &str = "index.json";

/// Where the crawled corpus lives unless overridden.
pub const DEFAULT_DOCS_PATH: &str = "crawled_data.json";

/// An immutable, fully loaded search engine.
#[derive(Debug, Clone)]
pub struct Engine {
    index: InvertedIndex,
    docs: DocStore,
}

impl Engine {
    /// Assemble an engine from already materialized parts.
    pub fn new(index: InvertedIndex, docs: DocStore) -> Self {
        Engine { index, docs }
    }

    /// Load index and document snapshot from disk, validating the index.
    ///
    /// This is the only I/O the engine ever does; a failure here is fatal
    /// for whoever needed the engine.
    pub fn open(index_path: &Path, docs_path: &Path) -> Result<Self, StoreError> {
        let index = store::load_index(index_path)?;
        let (documents, _rejected) = store::load_documents(docs_path)?;
        Ok(Engine::new(index, DocStore::from_documents(documents)))
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn docs(&self) -> &DocStore {
        &self.docs
    }

    /// Answer a raw query with up to `top_k` ranked results.
    ///
    /// Empty queries, stopword-only queries, and `top_k == 0` all yield an
    /// empty list; no query is an error. A doc id missing from the snapshot
    /// degrades to `title: "Unknown"` and an empty url rather than failing.
    pub fn search(&self, raw_query: &str, top_k: usize) -> Vec<SearchHit> {
        if top_k == 0 {
            return Vec::new();
        }

        let ranked = match parse_query(raw_query) {
            Query::Simple { terms } => score_simple(&self.index, &terms),
            Query::Phrase { tokens } => match_phrase(&self.index, &tokens),
            Query::Boolean { ast } => score_boolean(&self.index, &ast),
        };

        // Un-stemmed words of the raw query drive snippet highlighting.
        let query_words = raw_words(raw_query);

        ranked
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(i, (doc_id, score))| {
                let doc = self.docs.get(doc_id);
                SearchHit {
                    rank: i + 1,
                    doc_id,
                    title: doc
                        .map(|d| d.title.clone())
                        .unwrap_or_else(|| "Unknown".to_string()),
                    url: doc.map(|d| d.url.clone()).unwrap_or_default(),
                    score: round4(score),
                    snippet: build_snippet(
                        doc.map(|d| d.text.as_str()).unwrap_or(""),
                        &query_words,
                        SNIPPET_MAX_LEN,
                    ),
                }
            })
            .collect()
    }
}

/// Round a score to 4 decimals for presentation.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::types::Document;

    fn doc(id: u32, title: &str, text: &str) -> Document {
        Document {
            id,
            title: title.to_string(),
            url: format!("https://example.org/{}", id),
            text: text.to_string(),
        }
    }

    fn engine() -> Engine {
        let documents = vec![
            doc(0, "Neural Networks", "Neural networks are computational models."),
            doc(
                1,
                "Python Language",
                "Python is a programming language used for machine learning.",
            ),
            doc(2, "Biology Basics", "Cells are the basic units of life."),
        ];
        let index = build_index(&documents).unwrap();
        Engine::new(index, DocStore::from_documents(documents))
    }

    #[test]
    fn results_carry_rank_title_url_and_snippet() {
        let hits = engine().search("neural networks", 5);
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[0].doc_id, 0);
        assert_eq!(hits[0].title, "Neural Networks");
        assert_eq!(hits[0].url, "https://example.org/0");
        assert!(hits[0].snippet.contains("**Neural**"));
    }

    #[test]
    fn zero_top_k_yields_nothing() {
        assert!(engine().search("python", 0).is_empty());
    }

    #[test]
    fn scores_are_rounded_to_four_decimals() {
        let hits = engine().search("python", 5);
        let score = hits[0].score;
        assert!((score * 10_000.0 - (score * 10_000.0).round()).abs() < 1e-9);
    }

    #[test]
    fn missing_snapshot_entry_degrades_gracefully() {
        let documents = vec![
            doc(0, "Neural Networks", "Neural networks are computational models."),
            doc(1, "Python Language", "Python is a programming language."),
        ];
        let index = build_index(&documents).unwrap();
        // snapshot only knows doc 1
        let engine = Engine::new(index, DocStore::from_documents(documents[1..].to_vec()));

        let hits = engine.search("neural", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Unknown");
        assert_eq!(hits[0].url, "");
        assert_eq!(hits[0].snippet, "");
    }

    #[test]
    fn engine_is_cheap_to_share_across_threads() {
        let engine = engine();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let hits = engine.search("python OR cells", 5);
                    assert_eq!(hits.len(), 2);
                });
            }
        });
    }
}
