// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Snippet extraction and highlighting.
//!
//! Takes the document's original text and the raw (un-stemmed) query words,
//! finds the earliest hit, cuts a window around it, trims the ragged edges
//! to word boundaries, and bolds every word-bounded occurrence of a query
//! word with `**…**` - matched casing preserved, so "Neural" stays "Neural".
//!
//! Highlighting runs longest-word-first over non-overlapping ranges, which
//! makes the output stable under repeated calls and keeps markers from
//! nesting. All scanning is over a char vector: byte offsets never touch a
//! UTF-8 boundary they shouldn't.

/// Maximum snippet width in characters, before the `...` affixes.
pub const SNIPPET_MAX_LEN: usize = 200;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Case-folded subsequence search over chars. Returns the earliest start.
fn find_substring(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Build a highlighted preview of `text` for the given query words.
///
/// `query_words` are the lowercased alphanumeric runs of the raw query -
/// stopwords and all, because the user typed them and expects them bolded.
/// Falls back to the opening of the text when no word occurs.
pub fn build_snippet(text: &str, query_words: &[String], max_len: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().map(|c| c.to_ascii_lowercase()).collect();

    // 1. Earliest occurrence of any query word, substring-wise. No hit
    //    anchors the window at the start of the text.
    let anchor = query_words
        .iter()
        .filter_map(|word| {
            let needle: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
            find_substring(&folded, &needle)
        })
        .min()
        .unwrap_or(0);

    // 2. Center a window of max_len chars around the anchor.
    let half = max_len / 2;
    let start = anchor.saturating_sub(half);
    let end = (anchor + half).min(chars.len());
    let mut window: Vec<char> = chars[start..end].to_vec();

    // 3. Trim ragged edges to word boundaries.
    if start > 0 {
        if let Some(space) = window.iter().position(|&c| c == ' ') {
            window.drain(..=space);
        }
    }
    if end < chars.len() {
        if let Some(space) = window.iter().rposition(|&c| c == ' ') {
            window.truncate(space);
        }
    }

    // 4. Collect word-bounded highlight ranges, longest query word first.
    let mut by_length: Vec<&String> = query_words.iter().collect();
    by_length.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let folded_window: Vec<char> = window.iter().map(|c| c.to_ascii_lowercase()).collect();
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for word in by_length {
        let needle: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        if needle.len() < 2 {
            continue; // single-char noise
        }
        let mut at = 0usize;
        while at + needle.len() <= folded_window.len() {
            if folded_window[at..at + needle.len()] == needle[..] {
                let hit_end = at + needle.len();
                let left_clear = at == 0 || !is_word_char(folded_window[at - 1]);
                let right_clear =
                    hit_end == folded_window.len() || !is_word_char(folded_window[hit_end]);
                let free = !ranges.iter().any(|&(s, e)| at < e && s < hit_end);
                if left_clear && right_clear && free {
                    ranges.push((at, hit_end));
                    at = hit_end;
                    continue;
                }
            }
            at += 1;
        }
    }
    ranges.sort_unstable();

    // 5. Emit the window with markers, plus ellipses for trimmed sides.
    let mut out = String::with_capacity(window.len() + ranges.len() * 4 + 6);
    if start > 0 {
        out.push_str("...");
    }
    let mut next_range = 0usize;
    let mut pos = 0usize;
    while pos < window.len() {
        if next_range < ranges.len() && ranges[next_range].0 == pos {
            let (_, hit_end) = ranges[next_range];
            out.push_str("**");
            out.extend(&window[pos..hit_end]);
            out.push_str("**");
            pos = hit_end;
            next_range += 1;
        } else {
            out.push(window[pos]);
            pos += 1;
        }
    }
    if end < chars.len() {
        out.push_str("...");
    }
    out
}
