// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean query evaluation.
//!
//! Two passes over the syntax tree. The first is pure set algebra over
//! posting key sets: `Term` looks up its postings, `NOT` complements against
//! the full doc-id universe, `AND`/`OR` intersect and unite. The second pass
//! ranks: BM25-score every leaf term in the tree (negated branches
//! included), filter to the evaluated set, and give set members no leaf term
//! touched a score of zero so they still appear.
//!
//! Scoring terms under `NOT` looks odd but is deliberate: ranking is
//! order-preserving and the filter guarantees correctness of the candidate
//! set, while the extra terms keep ordering stable even when the
//! positive-only term set is empty.

use crate::query::Node;
use crate::score::{score_simple, sort_ranked};
use crate::types::{DocId, InvertedIndex};
use std::collections::BTreeSet;

/// Evaluate a node to its matching doc-id set.
pub fn evaluate(index: &InvertedIndex, node: &Node) -> BTreeSet<DocId> {
    match node {
        Node::Term(term) => index
            .term(term)
            .map(|entry| entry.postings.keys().copied().collect())
            .unwrap_or_default(),
        Node::Not(child) => {
            let matched = evaluate(index, child);
            index.doc_ids().filter(|id| !matched.contains(id)).collect()
        }
        Node::And(left, right) => {
            let left = evaluate(index, left);
            let right = evaluate(index, right);
            left.intersection(&right).copied().collect()
        }
        Node::Or(left, right) => {
            let left = evaluate(index, left);
            let right = evaluate(index, right);
            left.union(&right).copied().collect()
        }
    }
}

/// Evaluate and rank a boolean query.
///
/// Every doc id in the evaluated set appears exactly once in the output,
/// ordered by (score desc, doc id asc).
pub fn score_boolean(index: &InvertedIndex, ast: &Node) -> Vec<(DocId, f64)> {
    let matched = evaluate(index, ast);
    if matched.is_empty() {
        return Vec::new();
    }

    let leaf_terms = ast.leaf_terms();
    let scored = score_simple(index, &leaf_terms);

    let mut ranked: Vec<(DocId, f64)> = scored
        .into_iter()
        .filter(|(doc_id, _)| matched.contains(doc_id))
        .collect();
    let already: BTreeSet<DocId> = ranked.iter().map(|(doc_id, _)| *doc_id).collect();
    for &doc_id in &matched {
        if !already.contains(&doc_id) {
            ranked.push((doc_id, 0.0));
        }
    }

    sort_ranked(ranked)
}
