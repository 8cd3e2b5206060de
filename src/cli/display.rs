// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the trawl CLI.
//!
//! Plain ANSI styling with the usual escape hatches: colors only when stdout
//! is a TTY, and `NO_COLOR` wins over everything. Result rendering mirrors
//! the snippet markers - `**bold**` spans become actual bold text on a
//! terminal and stay as markers in a pipeline.

use trawl::SearchHit;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if colors should be used (TTY detection).
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply a style if stdout is a terminal, otherwise return plain text.
pub fn styled(style: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", style, text, RESET)
    } else {
        text.to_string()
    }
}

/// Turn `**span**` snippet markers into bold terminal text. Markers pass
/// through untouched when colors are off so piped output keeps them.
fn render_snippet(snippet: &str) -> String {
    if !use_colors() {
        return snippet.to_string();
    }
    let mut out = String::with_capacity(snippet.len());
    let mut bold = false;
    let mut rest = snippet;
    while let Some(at) = rest.find("**") {
        out.push_str(&rest[..at]);
        out.push_str(if bold { RESET } else { BOLD });
        bold = !bold;
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    if bold {
        out.push_str(RESET);
    }
    out
}

/// Pretty-print a result list the way the REPL shows it.
pub fn print_results(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("\n  No results found.");
        return;
    }
    println!();
    for hit in hits {
        println!(
            "  {}{}  {}",
            styled(GREEN, &format!("#{}", hit.rank)),
            styled(DIM, &format!("  [{:.4}]", hit.score)),
            styled(BOLD, &hit.title),
        );
        println!("      {}", styled(CYAN, &hit.url));
        println!("      {}", render_snippet(&hit.snippet));
        println!();
    }
}

/// The REPL banner: the three query syntaxes on one card.
pub fn print_banner() {
    let lines = [
        "╔══════════════════════════════════════════════╗",
        "║             trawl search REPL                ║",
        "╠══════════════════════════════════════════════╣",
        "║  plain words      →  neural networks         ║",
        "║  exact phrase     →  \"neural networks\"       ║",
        "║  boolean          →  python AND NOT robot    ║",
        "║  quit             →  q                       ║",
        "╚══════════════════════════════════════════════╝",
    ];
    for line in lines {
        println!("{}", styled(YELLOW, line));
    }
    println!();
}
