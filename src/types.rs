// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search index.
//!
//! These types define how documents, postings, and the term table fit
//! together, and their serde shape IS the on-disk format - change a field
//! name here and every saved index stops loading.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Posting**: `term_freq == positions.len()`, positions strictly
//!   increasing, every position `< doc_lengths[doc_id]`.
//! - **TermEntry**: `doc_freq == postings.len()`, never empty.
//! - **InvertedIndex**: `metadata.num_docs == doc_lengths.len()`;
//!   `avg_doc_length` is the mean token count rounded to 2 decimals.
//!
//! [`crate::verify::validate`] checks all of these; the loader refuses any
//! index that fails.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier documents arrive with. Stringified in JSON map keys.
pub type DocId = u32;

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// An input document as the crawler hands it over.
///
/// Only these four fields matter; anything else in the JSON is ignored.
/// Documents are immutable once indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    /// The indexable body. Everything the analyzer sees comes from here.
    pub text: String,
}

/// The document snapshot: original title/url/text by doc id, kept separate
/// from the index so the index never duplicates body text. Snippets are cut
/// from here at query time.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    docs: BTreeMap<DocId, Document>,
}

impl DocStore {
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let docs = documents.into_iter().map(|d| (d.id, d)).collect();
        DocStore { docs }
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

// =============================================================================
// INDEX TYPES
// =============================================================================

/// Term statistics for one (term, document) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Occurrence count of the term in this document.
    pub term_freq: u32,
    /// 0-based indices into the document's token stream, strictly increasing.
    pub positions: Vec<u32>,
}

/// Everything the index knows about one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Number of distinct documents the term occurs in. Always equals
    /// `postings.len()`.
    pub doc_freq: usize,
    pub postings: BTreeMap<DocId, Posting>,
}

/// Corpus-level statistics BM25 needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub num_docs: usize,
    /// Mean token count across indexed documents, rounded to 2 decimals
    /// (0.0 for an empty corpus).
    pub avg_doc_length: f64,
}

/// The positional inverted index. Built once, persisted, then read-only.
///
/// All maps are `BTreeMap` so serialization is canonical: the same input
/// corpus always produces byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub metadata: IndexMetadata,
    /// Token count per document, for length normalization.
    pub doc_lengths: BTreeMap<DocId, u32>,
    /// The term table. Serialized under the key `"index"`.
    #[serde(rename = "index")]
    pub terms: BTreeMap<String, TermEntry>,
}

impl InvertedIndex {
    /// Look up the entry for an (already analyzed) term.
    pub fn term(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(term)
    }

    /// Number of distinct terms in the table.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// The full doc-id universe, as `NOT` sees it.
    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.doc_lengths.keys().copied()
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// One ranked search result. The JSON shape at the API boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// 1-based position in the result list.
    pub rank: usize,
    pub doc_id: DocId,
    /// Title from the document snapshot, `"Unknown"` if the snapshot has no
    /// entry for this id.
    pub title: String,
    pub url: String,
    /// BM25 (or phrase/boolean) score, rounded to 4 decimals.
    pub score: f64,
    /// Highlighted text window around the first query-word hit.
    pub snippet: String,
}
