// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural validation for loaded indexes.
//!
//! The builder can only produce well-formed indexes, but an index file that
//! has been through disk, git, or a well-meaning editor cannot be trusted.
//! [`validate`] re-checks every structural invariant cheaply (one pass over
//! the term table); the loader treats any violation as fatal.

use crate::types::{DocId, InvertedIndex};
use std::fmt;

/// Error type for invariant violations.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// `metadata.num_docs` doesn't match the doc-lengths table.
    DocCountMismatch { claimed: usize, actual: usize },
    /// `metadata.avg_doc_length` is not the mean of doc lengths (±0.01).
    AvgLengthMismatch { claimed: f64, actual: f64 },
    /// A term entry has no postings at all.
    EmptyTermEntry { term: String },
    /// `doc_freq` doesn't match the posting count.
    DocFreqMismatch {
        term: String,
        claimed: usize,
        actual: usize,
    },
    /// A posting references a document missing from `doc_lengths`.
    UnknownDocId { term: String, doc_id: DocId },
    /// `term_freq` doesn't match the position count.
    TermFreqMismatch {
        term: String,
        doc_id: DocId,
        claimed: u32,
        actual: usize,
    },
    /// Positions are not strictly increasing.
    PositionsUnsorted { term: String, doc_id: DocId },
    /// A position is at or past the end of the document's token stream.
    PositionOutOfRange {
        term: String,
        doc_id: DocId,
        position: u32,
        doc_length: u32,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::DocCountMismatch { claimed, actual } => {
                write!(f, "num_docs {} != doc_lengths size {}", claimed, actual)
            }
            InvariantError::AvgLengthMismatch { claimed, actual } => {
                write!(f, "avg_doc_length {} != recomputed mean {}", claimed, actual)
            }
            InvariantError::EmptyTermEntry { term } => {
                write!(f, "term '{}' has an empty posting map", term)
            }
            InvariantError::DocFreqMismatch {
                term,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "term '{}' has doc_freq {} but {} postings",
                    term, claimed, actual
                )
            }
            InvariantError::UnknownDocId { term, doc_id } => {
                write!(
                    f,
                    "term '{}' posts to doc {} which has no recorded length",
                    term, doc_id
                )
            }
            InvariantError::TermFreqMismatch {
                term,
                doc_id,
                claimed,
                actual,
            } => {
                write!(
                    f,
                    "term '{}' doc {} has term_freq {} but {} positions",
                    term, doc_id, claimed, actual
                )
            }
            InvariantError::PositionsUnsorted { term, doc_id } => {
                write!(
                    f,
                    "term '{}' doc {} positions not strictly increasing",
                    term, doc_id
                )
            }
            InvariantError::PositionOutOfRange {
                term,
                doc_id,
                position,
                doc_length,
            } => {
                write!(
                    f,
                    "term '{}' doc {} position {} >= doc length {}",
                    term, doc_id, position, doc_length
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// Mean-of-lengths comparison tolerance. The stored value is rounded to two
/// decimals, so anything within a cent of the true mean is consistent.
const AVG_TOLERANCE: f64 = 0.01;

/// Check every structural invariant of an index.
///
/// Returns the first violation found. Iteration order is deterministic
/// (`BTreeMap`), so a given corrupt file always reports the same error.
pub fn validate(index: &InvertedIndex) -> Result<(), InvariantError> {
    // INVARIANT: N == |doc_lengths|
    if index.metadata.num_docs != index.doc_lengths.len() {
        return Err(InvariantError::DocCountMismatch {
            claimed: index.metadata.num_docs,
            actual: index.doc_lengths.len(),
        });
    }

    // INVARIANT: avgdl is recomputable from doc_lengths
    let actual_avg = if index.doc_lengths.is_empty() {
        0.0
    } else {
        let total: u64 = index.doc_lengths.values().map(|&l| u64::from(l)).sum();
        total as f64 / index.doc_lengths.len() as f64
    };
    if (index.metadata.avg_doc_length - actual_avg).abs() > AVG_TOLERANCE + f64::EPSILON {
        return Err(InvariantError::AvgLengthMismatch {
            claimed: index.metadata.avg_doc_length,
            actual: actual_avg,
        });
    }

    for (term, entry) in &index.terms {
        // INVARIANT: no empty term entries
        if entry.postings.is_empty() {
            return Err(InvariantError::EmptyTermEntry { term: term.clone() });
        }
        // INVARIANT: doc_freq == |postings|
        if entry.doc_freq != entry.postings.len() {
            return Err(InvariantError::DocFreqMismatch {
                term: term.clone(),
                claimed: entry.doc_freq,
                actual: entry.postings.len(),
            });
        }
        for (&doc_id, posting) in &entry.postings {
            // INVARIANT: every posted doc has a length
            let Some(&doc_length) = index.doc_lengths.get(&doc_id) else {
                return Err(InvariantError::UnknownDocId {
                    term: term.clone(),
                    doc_id,
                });
            };
            // INVARIANT: term_freq == |positions|
            if posting.term_freq as usize != posting.positions.len() {
                return Err(InvariantError::TermFreqMismatch {
                    term: term.clone(),
                    doc_id,
                    claimed: posting.term_freq,
                    actual: posting.positions.len(),
                });
            }
            // INVARIANT: positions strictly increasing and in range
            for pair in posting.positions.windows(2) {
                if pair[0] >= pair[1] {
                    return Err(InvariantError::PositionsUnsorted {
                        term: term.clone(),
                        doc_id,
                    });
                }
            }
            if let Some(&last) = posting.positions.last() {
                if last >= doc_length {
                    return Err(InvariantError::PositionOutOfRange {
                        term: term.clone(),
                        doc_id,
                        position: last,
                        doc_length,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use crate::types::Document;

    fn doc(id: u32, text: &str) -> Document {
        Document {
            id,
            title: format!("Doc {}", id),
            url: format!("https://example.org/{}", id),
            text: text.to_string(),
        }
    }

    fn built() -> InvertedIndex {
        build_index(&[
            doc(0, "neural networks process signals"),
            doc(1, "python programs process text"),
        ])
        .unwrap()
    }

    #[test]
    fn freshly_built_index_validates() {
        assert_eq!(validate(&built()), Ok(()));
    }

    #[test]
    fn rejects_wrong_doc_count() {
        let mut index = built();
        index.metadata.num_docs = 99;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::DocCountMismatch { claimed: 99, .. })
        ));
    }

    #[test]
    fn rejects_wrong_avg_length() {
        let mut index = built();
        index.metadata.avg_doc_length += 1.0;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::AvgLengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_wrong_doc_freq() {
        let mut index = built();
        index.terms.get_mut("process").unwrap().doc_freq = 7;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::DocFreqMismatch { claimed: 7, .. })
        ));
    }

    #[test]
    fn rejects_term_freq_position_mismatch() {
        let mut index = built();
        let entry = index.terms.get_mut("neural").unwrap();
        entry.postings.get_mut(&0).unwrap().term_freq = 5;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::TermFreqMismatch { claimed: 5, .. })
        ));
    }

    #[test]
    fn rejects_unsorted_positions() {
        let mut index = built();
        let entry = index.terms.get_mut("neural").unwrap();
        let posting = entry.postings.get_mut(&0).unwrap();
        posting.positions = vec![1, 1];
        posting.term_freq = 2;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::PositionsUnsorted { .. })
        ));
    }

    #[test]
    fn rejects_position_past_doc_length() {
        let mut index = built();
        let entry = index.terms.get_mut("neural").unwrap();
        let posting = entry.postings.get_mut(&0).unwrap();
        posting.positions = vec![40];
        posting.term_freq = 1;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::PositionOutOfRange { position: 40, .. })
        ));
    }

    #[test]
    fn rejects_posting_for_unknown_doc() {
        let mut index = built();
        let entry = index.terms.get_mut("neural").unwrap();
        let posting = entry.postings.get(&0).cloned().unwrap();
        entry.postings.insert(42, posting);
        entry.doc_freq += 1;
        assert!(matches!(
            validate(&index),
            Err(InvariantError::UnknownDocId { doc_id: 42, .. })
        ));
    }
}
