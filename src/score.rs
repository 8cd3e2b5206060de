// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Okapi BM25 scoring over the inverted index.
//!
//! For each query term `t` and document `d`:
//!
//! ```text
//! idf(t)     = ln( (N − df + 0.5) / (df + 0.5) + 1 )
//! tf_norm    = tf·(k1+1) / ( tf + k1·(1 − b + b·|d|/avgdl) )
//! score(d)   = Σ idf(t) · tf_norm(t, d)
//! ```
//!
//! The `+ 1` inside the log keeps idf non-negative even for terms that occur
//! in almost every document. Unknown terms contribute nothing; documents no
//! query term touches never appear in the output.
//!
//! # Constants
//!
//! | Knob | Value | Effect |
//! |------|-------|--------|
//! | `k1` | 1.5   | term-frequency saturation; higher rewards repetition |
//! | `b`  | 0.75  | length normalization; 0 ignores doc length, 1 is full |

use crate::types::{DocId, InvertedIndex};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Term-frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// Document-length normalization strength.
pub const BM25_B: f64 = 0.75;

/// IDF component. Penalizes terms that appear in almost every document;
/// never negative.
pub fn idf(doc_freq: usize, num_docs: usize) -> f64 {
    let df = doc_freq as f64;
    let n = num_docs as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Saturating TF component with document-length normalization.
pub fn tf_norm(term_freq: u32, doc_length: u32, avg_doc_length: f64) -> f64 {
    let tf = f64::from(term_freq);
    let length_ratio = f64::from(doc_length) / avg_doc_length;
    tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * (1.0 - BM25_B + BM25_B * length_ratio))
}

/// Score every document touched by at least one query term.
///
/// Returns `(doc_id, score)` sorted by score descending, doc id ascending.
/// Terms absent from the index are skipped silently.
pub fn score_simple(index: &InvertedIndex, terms: &[String]) -> Vec<(DocId, f64)> {
    let mut scores: HashMap<DocId, f64> = HashMap::new();

    for term in terms {
        let Some(entry) = index.term(term) else {
            continue;
        };
        let term_idf = idf(entry.doc_freq, index.metadata.num_docs);
        for (&doc_id, posting) in &entry.postings {
            let Some(&doc_length) = index.doc_lengths.get(&doc_id) else {
                continue;
            };
            let contribution =
                term_idf * tf_norm(posting.term_freq, doc_length, index.metadata.avg_doc_length);
            *scores.entry(doc_id).or_insert(0.0) += contribution;
        }
    }

    sort_ranked(scores.into_iter().collect())
}

/// Order `(doc_id, score)` pairs by score descending, doc id ascending.
/// The doc-id tiebreak is what makes result order a total order.
pub(crate) fn sort_ranked(mut ranked: Vec<(DocId, f64)>) -> Vec<(DocId, f64)> {
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked
}
