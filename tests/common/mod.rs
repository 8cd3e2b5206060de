//! Shared test utilities and fixtures.

#![allow(dead_code)]

use trawl::{build_index, DocStore, Document, Engine, InvertedIndex};

/// Create a test document.
pub fn make_doc(id: u32, title: &str, url: &str, text: &str) -> Document {
    Document {
        id,
        title: title.to_string(),
        url: url.to_string(),
        text: text.to_string(),
    }
}

/// The canonical three-document corpus the end-to-end scenarios run over.
pub fn corpus() -> Vec<Document> {
    vec![
        make_doc(
            0,
            "Neural Networks",
            "https://example.org/neural-networks",
            "Neural networks are computational models.",
        ),
        make_doc(
            1,
            "Python Language",
            "https://example.org/python",
            "Python is a programming language used for machine learning.",
        ),
        make_doc(
            2,
            "Biology Basics",
            "https://example.org/biology",
            "Cells are the basic units of life.",
        ),
    ]
}

/// Build an index over arbitrary texts, ids assigned in order.
pub fn build_test_index(texts: &[&str]) -> InvertedIndex {
    let docs: Vec<Document> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| make_doc(i as u32, &format!("Doc {}", i), "", text))
        .collect();
    build_index(&docs).expect("ids are unique by construction")
}

/// A fully loaded engine over the canonical corpus.
pub fn build_test_engine() -> Engine {
    let documents = corpus();
    let index = build_index(&documents).expect("ids are unique");
    Engine::new(index, DocStore::from_documents(documents))
}

/// Assert that an index satisfies all well-formedness invariants.
pub fn assert_index_well_formed(index: &InvertedIndex) {
    if let Err(violation) = trawl::validate(index) {
        panic!("INVARIANT VIOLATED: {}", violation);
    }
}
