// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Trawl CLI: build, inspect, and query a positional inverted index.
//!
//! ```bash
//! # Build an index from a crawled corpus
//! trawl index --input crawled_data.json --output index.json
//!
//! # One-shot query
//! trawl search "python AND (learning OR neural)" --limit 5
//!
//! # Interactive session
//! trawl repl
//!
//! # Index statistics
//! trawl inspect index.json
//! ```

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

use trawl::Engine;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

mod cli;
use cli::display::{print_banner, print_results, styled, BOLD, DIM};
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { input, output } => run_index(&input, &output),
        Commands::Search {
            query,
            index,
            docs,
            limit,
        } => {
            let engine = open_engine(&index, &docs);
            print_results(&engine.search(&query, limit));
        }
        Commands::Repl { index, docs } => run_repl(&index, &docs),
        Commands::Inspect { index } => run_inspect(&index),
    }
}

fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

/// Build the index from a crawled corpus and write it to disk.
fn run_index(input: &str, output: &str) {
    let started = Instant::now();

    let (documents, rejected) = match trawl::load_documents(Path::new(input)) {
        Ok(loaded) => loaded,
        Err(e) => fatal(format!("failed to read {}: {}", input, e)),
    };
    if rejected > 0 {
        eprintln!("⚠️  skipped {} malformed document(s)", rejected);
    }
    if documents.is_empty() {
        eprintln!("⚠️  no documents in {}; nothing to index", input);
        return;
    }

    #[cfg(feature = "parallel")]
    let spinner = {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("static template"),
        );
        pb.set_message(format!("indexing {} documents...", documents.len()));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        pb
    };

    #[cfg(feature = "parallel")]
    let built = trawl::build_index_parallel(&documents);
    #[cfg(not(feature = "parallel"))]
    let built = trawl::build_index(&documents);

    #[cfg(feature = "parallel")]
    spinner.finish_and_clear();

    let index = match built {
        Ok(index) => index,
        Err(e) => fatal(e),
    };

    if let Err(e) = trawl::save_index(&index, Path::new(output)) {
        fatal(format!("failed to write {}: {}", output, e));
    }

    eprintln!(
        "✅ Indexed {} documents │ {} terms │ avg length {:.2} │ {:.1?} → {}",
        index.metadata.num_docs,
        index.term_count(),
        index.metadata.avg_doc_length,
        started.elapsed(),
        output
    );
}

/// Load the engine or die trying. Load failure is fatal for the process.
fn open_engine(index_path: &str, docs_path: &str) -> Engine {
    match Engine::open(Path::new(index_path), Path::new(docs_path)) {
        Ok(engine) => {
            eprintln!(
                "{}",
                styled(
                    DIM,
                    &format!(
                        "loaded index ({} docs, {} terms) + document snapshot",
                        engine.index().metadata.num_docs,
                        engine.index().term_count()
                    )
                )
            );
            engine
        }
        Err(e) => fatal(e),
    }
}

/// Interactive prompt: load once, query until quit.
fn run_repl(index_path: &str, docs_path: &str) {
    let engine = open_engine(index_path, docs_path);
    print_banner();

    let stdin = std::io::stdin();
    loop {
        print!("  🔎 Search: ");
        if std::io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                println!("\n  Goodbye.");
                break;
            }
            Ok(_) => {}
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if matches!(raw.to_lowercase().as_str(), "q" | "quit" | "exit") {
            println!("  Goodbye.");
            break;
        }
        print_results(&engine.search(raw, trawl::DEFAULT_TOP_K));
    }
}

/// Print index statistics without loading the document snapshot.
fn run_inspect(index_path: &str) {
    let index = match trawl::load_index(Path::new(index_path)) {
        Ok(index) => index,
        Err(e) => fatal(e),
    };

    println!("{}", styled(BOLD, index_path));
    println!("  documents        {}", index.metadata.num_docs);
    println!("  avg doc length   {:.2}", index.metadata.avg_doc_length);
    println!("  distinct terms   {}", index.term_count());

    let mut heavy: Vec<(&String, usize)> = index
        .terms
        .iter()
        .map(|(term, entry)| (term, entry.doc_freq))
        .collect();
    heavy.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    if !heavy.is_empty() {
        println!("  heaviest terms by document frequency:");
        for (term, doc_freq) in heavy.into_iter().take(10) {
            println!("    {:>6}  {}", doc_freq, term);
        }
    }
}
