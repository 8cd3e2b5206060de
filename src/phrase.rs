// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Positional phrase matching.
//!
//! A phrase matches a document when its tokens occur at consecutive token
//! positions, in order. Positions count *surviving* tokens - the analyzer
//! already dropped stopwords - so `"machine learning"` matches text that
//! reads "machine learning" and also "machine the learning" would NOT have
//! been a phrase hit unless "the" vanished before indexing. Both sides go
//! through the same pipeline, which is exactly why this works.
//!
//! The anchor token's postings drive the search; every candidate start
//! position is verified against the remaining tokens with binary search over
//! their sorted position lists. One confirmed start is enough per document.

use crate::score::{idf, sort_ranked, tf_norm};
use crate::types::{DocId, InvertedIndex, TermEntry};

/// Find documents containing `tokens` as a consecutive run.
///
/// Scored by single-token BM25 of the anchor (first) token, which keeps the
/// ranking meaningful without re-walking positions. Empty input or any token
/// missing from the index yields no matches.
pub fn match_phrase(index: &InvertedIndex, tokens: &[String]) -> Vec<(DocId, f64)> {
    let Some(first) = tokens.first() else {
        return Vec::new();
    };
    let Some(anchor) = index.term(first) else {
        return Vec::new();
    };
    let rest: Option<Vec<&TermEntry>> = tokens[1..].iter().map(|t| index.term(t)).collect();
    let Some(rest) = rest else {
        return Vec::new();
    };

    let anchor_idf = idf(anchor.doc_freq, index.metadata.num_docs);
    let mut matches = Vec::new();

    for (&doc_id, posting) in &anchor.postings {
        let confirmed = posting.positions.iter().any(|&start| {
            rest.iter().enumerate().all(|(offset, entry)| {
                let wanted = start + 1 + offset as u32;
                entry
                    .postings
                    .get(&doc_id)
                    .is_some_and(|p| p.positions.binary_search(&wanted).is_ok())
            })
        });
        if confirmed {
            let Some(&doc_length) = index.doc_lengths.get(&doc_id) else {
                continue;
            };
            let score =
                anchor_idf * tf_norm(posting.term_freq, doc_length, index.metadata.avg_doc_length);
            matches.push((doc_id, score));
        }
    }

    sort_ranked(matches)
}
