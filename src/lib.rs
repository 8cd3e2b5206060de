//! Positional inverted-index full-text search with BM25 ranking.
//!
//! This crate indexes a static corpus of crawled documents and answers
//! ranked queries in three syntaxes: plain multi-term, quoted phrase, and
//! boolean with `AND`/`OR`/`NOT` and parentheses.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌────────────┐
//! │ analyze.rs │────▶│  index.rs  │────▶│  store.rs  │
//! │ (tokenize, │     │(build_index│     │ (save/load │
//! │ stop, stem)│     │  postings) │     │ + validate)│
//! └────────────┘     └────────────┘     └────────────┘
//!        │                                     │
//!        ▼                                     ▼
//! ┌────────────┐     ┌──────────────────────────────────┐
//! │  query.rs  │────▶│ score.rs │ phrase.rs │ boolean.rs │
//! │ (classify, │     │  (BM25)  │(positions)│(set algebra)│
//! │ AST parse) │     └──────────────────────────────────┘
//! └────────────┘                   │
//!                                  ▼
//!                    ┌────────────────────────┐
//!                    │ engine.rs + snippet.rs │
//!                    │ (ranked, highlighted   │
//!                    │  results)              │
//!                    └────────────────────────┘
//! ```
//!
//! Build once, query forever: the index is immutable after construction and
//! the whole query path is lock-free reads.
//!
//! # Usage
//!
//! ```ignore
//! use trawl::{build_index, DocStore, Engine};
//!
//! let index = build_index(&documents)?;
//! let engine = Engine::new(index, DocStore::from_documents(documents));
//!
//! for hit in engine.search("python AND NOT robotics", 5) {
//!     println!("#{} {} ({})", hit.rank, hit.title, hit.score);
//! }
//! ```

// Module declarations
pub mod analyze;
pub mod boolean;
pub mod engine;
pub mod index;
pub mod phrase;
pub mod query;
pub mod score;
pub mod snippet;
pub mod stem;
pub mod store;
pub mod types;
pub mod verify;

// Re-exports for public API
pub use analyze::{analyze, is_stopword, raw_words};
pub use boolean::{evaluate, score_boolean};
pub use engine::{Engine, DEFAULT_DOCS_PATH, DEFAULT_INDEX_PATH, DEFAULT_TOP_K};
pub use index::{build_index, BuildError};
#[cfg(feature = "parallel")]
pub use index::build_index_parallel;
pub use phrase::match_phrase;
pub use query::{parse_query, Node, Query};
pub use score::{idf, score_simple, tf_norm, BM25_B, BM25_K1};
pub use snippet::{build_snippet, SNIPPET_MAX_LEN};
pub use stem::stem;
pub use store::{load_documents, load_index, save_index, StoreError};
pub use types::{
    DocId, DocStore, Document, IndexMetadata, InvertedIndex, Posting, SearchHit, TermEntry,
};
pub use verify::{validate, InvariantError};
