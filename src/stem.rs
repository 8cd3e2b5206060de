// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A reduced Porter-style stemmer.
//!
//! Collapses the most common English suffixes so that "running", "runs", and
//! "run" all land on the same index term. This is deliberately NOT canonical
//! Porter: the measure thresholds and the step-4 suffix table diverge from the
//! 1980 paper in a handful of edge cases, and the index format depends on the
//! exact output. Swapping in a library stemmer would silently orphan every
//! previously built index, so don't.
//!
//! # Invariants
//!
//! - **TOTAL**: `stem` never fails. Words shorter than 3 characters and
//!   non-ASCII words are returned unchanged.
//! - **DETERMINISTIC**: same input, same output, no configuration.

/// Step-4 suffix table, tried in order. First suffix that matches with
/// `measure(stem) > 0` wins and terminates the step.
const STEP4_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("ator", "ate"),
    ("alli", "al"),
    ("ousli", "ous"),
    ("entli", "ent"),
    ("eli", "e"),
    ("fulness", "ful"),
    ("iveness", "ive"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ness", ""),
    ("ment", ""),
];

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u' | b'y')
}

/// Count of vowel→consonant transitions in `word`.
///
/// "tr" → 0, "ee" → 0, "tree" → 1, "oats" → 1, "trees" → 1. Anything that is
/// not `aeiouy` counts as a consonant, digits included.
fn measure(word: &str) -> usize {
    let mut count = 0;
    let mut prev_vowel = false;
    for b in word.bytes() {
        let vowel = is_vowel(b);
        if prev_vowel && !vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    count
}

fn has_vowel(word: &str) -> bool {
    word.bytes().any(is_vowel)
}

/// Post-fix applied after stripping `-ed` or `-ing`: restore a silent `e`
/// after `at`/`bl`/`iz`, otherwise undouble a trailing consonant pair
/// (except `l`, `s`, `z`).
fn fix_stripped_suffix(word: &mut String) {
    if word.ends_with("at") || word.ends_with("bl") || word.ends_with("iz") {
        word.push('e');
        return;
    }
    let bytes = word.as_bytes();
    if bytes.len() >= 2
        && bytes[bytes.len() - 1] == bytes[bytes.len() - 2]
        && !matches!(bytes[bytes.len() - 1], b'l' | b's' | b'z')
    {
        word.truncate(word.len() - 1);
    }
}

/// Stem a single token.
///
/// The steps run in order on the current form of the word:
///
/// 1. plurals (`-sses`, `-ies`, `-s`)
/// 2. past tense / gerund (`-eed`, `-ed`, `-ing`) with the doubled-consonant
///    and silent-`e` post-fix
/// 3. terminal `y` → `i` when a vowel precedes it
/// 4. the suffix table above
/// 5. terminal `e` / `ll` cleanup for long stems
pub fn stem(word: &str) -> String {
    if word.len() < 3 || !word.is_ascii() {
        return word.to_string();
    }
    let mut w = word.to_string();

    // Step 1: plurals
    if w.ends_with("sses") {
        w.truncate(w.len() - 2);
    } else if w.ends_with("ies") {
        w.truncate(w.len() - 2);
    } else if w.ends_with("ss") {
        // "caress" stays
    } else if w.ends_with('s') && !w.ends_with("us") {
        w.truncate(w.len() - 1);
    }

    // Step 2: -eed / -ed / -ing
    if w.ends_with("eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.truncate(w.len() - 1); // "agreed" → "agree"
        }
    } else if w.ends_with("ed") {
        if has_vowel(&w[..w.len() - 2]) {
            w.truncate(w.len() - 2);
            fix_stripped_suffix(&mut w);
        }
    } else if w.ends_with("ing") {
        if has_vowel(&w[..w.len() - 3]) {
            w.truncate(w.len() - 3);
            fix_stripped_suffix(&mut w);
        }
    }

    // Step 3: -y → -i when preceded by a vowel
    if w.ends_with('y') && w.len() > 2 && has_vowel(&w[..w.len() - 1]) {
        w.truncate(w.len() - 1);
        w.push('i');
    }

    // Step 4: suffix table
    for &(suffix, replacement) in STEP4_SUFFIXES {
        if w.ends_with(suffix) && measure(&w[..w.len() - suffix.len()]) > 0 {
            w.truncate(w.len() - suffix.len());
            w.push_str(replacement);
            break;
        }
    }

    // Step 5: final cleanup
    if w.ends_with('e') && measure(&w[..w.len() - 1]) > 1 {
        w.truncate(w.len() - 1);
    }
    if w.ends_with("ll") && measure(&w[..w.len() - 1]) > 1 {
        w.truncate(w.len() - 1);
    }

    w
}
