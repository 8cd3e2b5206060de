// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the trawl command-line interface.
//!
//! Four subcommands: `index` builds the inverted index from a crawled
//! corpus, `search` runs one query, `repl` keeps the engine loaded for an
//! interactive session, and `inspect` prints index statistics.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trawl",
    about = "BM25 full-text search over a crawled document corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the inverted index from crawled documents
    Index {
        /// Crawled documents JSON file (array of {id, title, url, text})
        #[arg(short, long, default_value = trawl::DEFAULT_DOCS_PATH)]
        input: String,

        /// Where to write the index JSON
        #[arg(short, long, default_value = trawl::DEFAULT_INDEX_PATH)]
        output: String,
    },

    /// Run a single query and print ranked results
    Search {
        /// Query: plain terms, a "quoted phrase", or boolean AND/OR/NOT
        query: String,

        /// Index file to search
        #[arg(short, long, default_value = trawl::DEFAULT_INDEX_PATH)]
        index: String,

        /// Crawled documents file (titles, urls, snippet text)
        #[arg(short, long, default_value = trawl::DEFAULT_DOCS_PATH)]
        docs: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value_t = trawl::DEFAULT_TOP_K)]
        limit: usize,
    },

    /// Interactive search prompt over a loaded engine
    Repl {
        /// Index file to search
        #[arg(short, long, default_value = trawl::DEFAULT_INDEX_PATH)]
        index: String,

        /// Crawled documents file (titles, urls, snippet text)
        #[arg(short, long, default_value = trawl::DEFAULT_DOCS_PATH)]
        docs: String,
    },

    /// Print index statistics
    Inspect {
        /// Index file to examine
        #[arg(default_value = trawl::DEFAULT_INDEX_PATH)]
        index: String,
    },
}
