// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The text-analysis pipeline: raw text in, index terms out.
//!
//! Every string that touches the index - document bodies at build time, query
//! words at search time - goes through [`analyze`], so both sides always agree
//! on what a term looks like. The pipeline is fixed and deterministic:
//!
//! 1. ASCII case folding (non-ASCII letters act as separators, see below)
//! 2. extract maximal `[a-z0-9]+` runs
//! 3. drop runs of length ≤ 1 and stopwords
//! 4. stem the survivors
//!
//! # Invariants
//!
//! - **ORDERED**: tokens come out in document order; positions recorded
//!   against this sequence are what phrase matching relies on.
//! - **AGREEMENT**: `analyze` is the only path from text to terms. There is
//!   no second tokenizer hiding in the query parser.

use crate::stem::stem;
use std::collections::HashSet;
use std::sync::LazyLock;

/// English function words plus high-frequency noise words that dominate
/// encyclopedic corpora. A term in this list never reaches the index.
///
/// The contraction forms ("aren't" and friends) can never match an
/// alphanumeric run; they are kept so the list stays recognizably the
/// standard English set.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "d", "did", "didn't", "do",
    "does", "doesn't", "doing", "don", "don't", "down", "during", "each", "few", "for", "from",
    "further", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "isn't", "it", "it's", "its", "itself", "just", "ll", "m", "ma", "me", "mightn", "mightn't",
    "more", "most", "mustn", "mustn't", "my", "myself", "needn", "needn't", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves",
    "out", "over", "own", "re", "s", "same", "shan", "shan't", "she", "she's", "should",
    "should've", "shouldn", "shouldn't", "so", "some", "such", "t", "than", "that", "that'll",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "ve", "very", "was", "wasn",
    "wasn't", "we", "were", "weren", "weren't", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "won", "won't", "wouldn", "wouldn't", "y", "you",
    "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
    // extras that show up a lot in encyclopedic text
    "also", "one", "two", "new", "like", "many", "may", "would", "use", "using", "used",
    "much", "well", "even", "still", "known", "often", "however", "though", "another",
    "every", "since", "first", "last", "around", "called", "based", "became", "according",
    "although", "including", "several", "various", "within",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Check whether a lowercased word is in the stopword set.
#[inline]
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Analyze text into the ordered token sequence the index stores.
pub fn analyze(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            run.push(ch.to_ascii_lowercase());
        } else if !run.is_empty() {
            flush_run(&mut run, &mut tokens);
        }
    }
    if !run.is_empty() {
        flush_run(&mut run, &mut tokens);
    }
    tokens
}

fn flush_run(run: &mut String, tokens: &mut Vec<String>) {
    if run.len() > 1 && !is_stopword(run) {
        tokens.push(stem(run));
    }
    run.clear();
}

/// Extract the raw lowercased alphanumeric words of a query, unfiltered and
/// unstemmed. Snippet highlighting works on these, because users expect
/// "networks" bolded in the text even though the index term is "network".
pub fn raw_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut run = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            run.push(ch.to_ascii_lowercase());
        } else if !run.is_empty() {
            words.push(std::mem::take(&mut run));
        }
    }
    if !run.is_empty() {
        words.push(run);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_lowercases_filters_and_stems() {
        assert_eq!(
            analyze("Neural networks are computational models."),
            vec!["neural", "network", "computat", "model"]
        );
    }

    #[test]
    fn stopwords_and_short_runs_are_dropped() {
        assert_eq!(analyze("the and of"), Vec::<String>::new());
        assert_eq!(analyze("a I x 9"), Vec::<String>::new());
    }

    #[test]
    fn punctuation_and_non_ascii_separate_runs() {
        assert_eq!(analyze("machine-learning"), vec!["machin", "learn"]);
        assert_eq!(analyze("café"), vec!["caf"]);
    }

    #[test]
    fn digits_are_terms() {
        assert_eq!(analyze("2024 items"), vec!["2024", "item"]);
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert!(analyze("").is_empty());
        assert!(analyze("   \t\n").is_empty());
    }

    #[test]
    fn raw_words_keep_stopwords_and_casing_folds() {
        assert_eq!(
            raw_words("The \"Neural Networks\" of 2024!"),
            vec!["the", "neural", "networks", "of", "2024"]
        );
    }

    #[test]
    fn stopword_lookup() {
        assert!(is_stopword("the"));
        assert!(is_stopword("however"));
        assert!(!is_stopword("neural"));
    }
}
