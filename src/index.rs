// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! One pass over the corpus: analyze each document, record its token count,
//! then fold its per-term position lists into the global term table. The
//! build is deterministic - the same document list always produces the same
//! index, and because every map is a `BTreeMap`, the same serialized bytes.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **DOC_FREQ_CORRECT**: `doc_freq` equals the posting count, maintained
//!    incrementally (one bump per document that contains the term).
//! 2. **POSITIONS_SORTED**: positions are collected in token order, so each
//!    list is strictly increasing by construction.
//! 3. **NON_EMPTY**: a term enters the table only with at least one posting.

use crate::analyze::analyze;
use crate::types::{DocId, Document, IndexMetadata, InvertedIndex, Posting, TermEntry};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Error type for index construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The same document id appeared twice in one build. The caller handed
    /// us a broken corpus; refusing is better than silently overwriting.
    DuplicateDocId { doc_id: DocId },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateDocId { doc_id } => {
                write!(f, "duplicate document id {} in corpus", doc_id)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Token positions per term for a single document.
type LocalPositions = HashMap<String, Vec<u32>>;

fn doc_positions(doc: &Document) -> (usize, LocalPositions) {
    let tokens = analyze(&doc.text);
    let mut local: LocalPositions = HashMap::new();
    for (pos, token) in tokens.iter().enumerate() {
        local.entry(token.clone()).or_default().push(pos as u32);
    }
    (tokens.len(), local)
}

fn merge(
    documents: &[Document],
    analyzed: Vec<(usize, LocalPositions)>,
) -> Result<InvertedIndex, BuildError> {
    let mut doc_lengths: BTreeMap<DocId, u32> = BTreeMap::new();
    let mut terms: BTreeMap<String, TermEntry> = BTreeMap::new();

    for (doc, (token_count, local)) in documents.iter().zip(analyzed) {
        if doc_lengths.insert(doc.id, token_count as u32).is_some() {
            return Err(BuildError::DuplicateDocId { doc_id: doc.id });
        }
        for (term, positions) in local {
            let entry = terms.entry(term).or_insert_with(|| TermEntry {
                doc_freq: 0,
                postings: BTreeMap::new(),
            });
            // INVARIANT: DOC_FREQ_CORRECT - one bump per containing doc
            entry.doc_freq += 1;
            entry.postings.insert(
                doc.id,
                Posting {
                    term_freq: positions.len() as u32,
                    positions,
                },
            );
        }
    }

    let num_docs = doc_lengths.len();
    let avg_doc_length = if num_docs == 0 {
        0.0
    } else {
        let total: u64 = doc_lengths.values().map(|&l| u64::from(l)).sum();
        round2(total as f64 / num_docs as f64)
    };

    Ok(InvertedIndex {
        metadata: IndexMetadata {
            num_docs,
            avg_doc_length,
        },
        doc_lengths,
        terms,
    })
}

/// Round to 2 decimals, matching the serialized form of `avg_doc_length`.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Build a positional inverted index from a document list.
pub fn build_index(documents: &[Document]) -> Result<InvertedIndex, BuildError> {
    let analyzed: Vec<(usize, LocalPositions)> = documents.iter().map(doc_positions).collect();
    merge(documents, analyzed)
}

/// Build using parallel per-document analysis.
///
/// Map phase fans tokenization out across documents; the reduce phase merges
/// sequentially in input order, so the result is identical to [`build_index`]
/// down to the serialized bytes. Worth it from a few hundred documents up.
#[cfg(feature = "parallel")]
pub fn build_index_parallel(documents: &[Document]) -> Result<InvertedIndex, BuildError> {
    let analyzed: Vec<(usize, LocalPositions)> =
        documents.par_iter().map(doc_positions).collect();
    merge(documents, analyzed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u32, text: &str) -> Document {
        Document {
            id,
            title: format!("Doc {}", id),
            url: format!("https://example.org/{}", id),
            text: text.to_string(),
        }
    }

    #[test]
    fn records_positions_against_the_token_stream() {
        // "are" is a stopword, so "networks" sits at position 1 and the
        // second "neural" at position 2
        let index = build_index(&[doc(0, "neural networks are neural")]).unwrap();
        let entry = index.term("neural").unwrap();
        assert_eq!(entry.doc_freq, 1);
        let posting = &entry.postings[&0];
        assert_eq!(posting.term_freq, 2);
        assert_eq!(posting.positions, vec![0, 2]);
        assert_eq!(index.doc_lengths[&0], 3);
    }

    #[test]
    fn doc_freq_counts_documents_not_occurrences() {
        let index = build_index(&[
            doc(0, "python python python"),
            doc(1, "python and rust"),
        ])
        .unwrap();
        let entry = index.term("python").unwrap();
        assert_eq!(entry.doc_freq, 2);
        assert_eq!(entry.postings[&0].term_freq, 3);
        assert_eq!(entry.postings[&1].term_freq, 1);
    }

    #[test]
    fn average_length_is_rounded_mean() {
        let index = build_index(&[
            doc(0, "alpha beta gamma"),
            doc(1, "delta epsilon"),
        ])
        .unwrap();
        assert_eq!(index.metadata.num_docs, 2);
        assert!((index.metadata.avg_doc_length - 2.5).abs() < 1e-9);
    }

    #[test]
    fn empty_corpus_builds_empty_index() {
        let index = build_index(&[]).unwrap();
        assert_eq!(index.metadata.num_docs, 0);
        assert_eq!(index.metadata.avg_doc_length, 0.0);
        assert!(index.terms.is_empty());
    }

    #[test]
    fn all_stopword_document_gets_length_zero() {
        let index = build_index(&[doc(0, "the and of it")]).unwrap();
        assert_eq!(index.doc_lengths[&0], 0);
        assert!(index.terms.is_empty());
    }

    #[test]
    fn duplicate_doc_id_is_fatal() {
        let err = build_index(&[doc(3, "alpha"), doc(3, "beta")]).unwrap_err();
        assert_eq!(err, BuildError::DuplicateDocId { doc_id: 3 });
    }

    #[test]
    fn build_is_deterministic() {
        let docs = vec![
            doc(0, "neural networks process signals"),
            doc(1, "python programs process text"),
        ];
        let a = serde_json::to_string(&build_index(&docs).unwrap()).unwrap();
        let b = serde_json::to_string(&build_index(&docs).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let docs: Vec<Document> = (0..40)
            .map(|i| doc(i, "neural networks process many signals quickly"))
            .collect();
        assert_eq!(
            build_index(&docs).unwrap(),
            build_index_parallel(&docs).unwrap()
        );
    }
}
