// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index and corpus persistence.
//!
//! The index is plain JSON: `metadata`, `doc_lengths`, and the term table
//! under `"index"`, with doc ids stringified as object keys. Human-greppable,
//! diff-friendly, and good enough for corpora of tens of thousands of
//! documents. Loading validates every structural invariant before handing
//! the index to anyone - a corrupt file is a fatal [`StoreError::Invariant`],
//! not a subtly wrong ranking three queries later.

use crate::types::{Document, InvertedIndex};
use crate::verify::{self, InvariantError};
use std::fmt;
use std::fs;
use std::path::Path;

/// Error type for persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invariant(InvariantError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "i/o error: {}", e),
            StoreError::Json(e) => write!(f, "malformed json: {}", e),
            StoreError::Invariant(e) => write!(f, "corrupt index: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Invariant(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl From<InvariantError> for StoreError {
    fn from(e: InvariantError) -> Self {
        StoreError::Invariant(e)
    }
}

/// Serialize an index to pretty-printed JSON at `path`.
///
/// Keys come out sorted (`BTreeMap`), so saving the same index twice writes
/// identical bytes.
pub fn save_index(index: &InvertedIndex, path: &Path) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(index)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load and validate an index.
pub fn load_index(path: &Path) -> Result<InvertedIndex, StoreError> {
    let json = fs::read_to_string(path)?;
    let index: InvertedIndex = serde_json::from_str(&json)?;
    verify::validate(&index)?;
    Ok(index)
}

/// Load the crawled document corpus: a JSON array of objects with `id`,
/// `title`, `url`, and `text`.
///
/// A document missing a required field is rejected and counted, not fatal -
/// the rest of the corpus still indexes. Returns the surviving documents and
/// the rejected count.
pub fn load_documents(path: &Path) -> Result<(Vec<Document>, usize), StoreError> {
    let json = fs::read_to_string(path)?;
    let raw: Vec<serde_json::Value> = serde_json::from_str(&json)?;

    let mut documents = Vec::with_capacity(raw.len());
    let mut rejected = 0usize;
    for value in raw {
        match serde_json::from_value::<Document>(value) {
            Ok(doc) => documents.push(doc),
            Err(_) => rejected += 1,
        }
    }
    Ok((documents, rejected))
}
