// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: one raw string in, one of three query shapes out.
//!
//! Users type three syntaxes:
//!
//! ```text
//! neural networks                          plain multi-term
//! "neural networks"                        quoted phrase, order matters
//! python AND (learning OR neural) NOT c    boolean, uppercase operators
//! ```
//!
//! Classification is top-down: a fully quoted query is a phrase; anything
//! containing a word-bounded uppercase `AND`/`OR`/`NOT` is boolean; the rest
//! is a plain term list. Lowercase "and" is just a stopword, never an
//! operator.
//!
//! The boolean grammar is minimal and forgiving:
//!
//! ```text
//! expr    → factor (( "AND" | "OR" ) factor)*    left-associative, equal precedence
//! factor  → "NOT" factor | atom
//! atom    → "(" expr ")" | word
//! ```
//!
//! Operators and parentheses are whitespace-separated tokens. There is no
//! precedence between `AND` and `OR` - parenthesize. Malformed input never
//! fails: a stray `)` is skipped, an unclosed `(` runs to end of input, and
//! a dangling operator gets an empty-term operand that matches nothing.

use crate::analyze::analyze;

/// A node of the boolean syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An analyzed leaf term.
    Term(String),
    Not(Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    /// Every leaf term in the tree, left to right, including terms under
    /// `NOT`. Boolean ranking scores all of them.
    pub fn leaf_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms(&self, out: &mut Vec<String>) {
        match self {
            Node::Term(term) => out.push(term.clone()),
            Node::Not(child) => child.collect_terms(out),
            Node::And(left, right) | Node::Or(left, right) => {
                left.collect_terms(out);
                right.collect_terms(out);
            }
        }
    }
}

/// A parsed query, ready for the matching scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Simple { terms: Vec<String> },
    Phrase { tokens: Vec<String> },
    Boolean { ast: Node },
}

/// Classify and parse a raw query string. Never fails.
pub fn parse_query(raw: &str) -> Query {
    let raw = raw.trim();
    if raw.is_empty() {
        return Query::Simple { terms: Vec::new() };
    }

    if let Some(inner) = quoted_phrase(raw) {
        return Query::Phrase {
            tokens: analyze(inner),
        };
    }

    if has_boolean_operator(raw) {
        return Query::Boolean {
            ast: BoolParser::new(raw).expr(),
        };
    }

    Query::Simple {
        terms: analyze(raw),
    }
}

/// The inner content of a fully quoted query, if that's what this is.
/// `"` and `""` don't count; the phrase needs at least one character.
fn quoted_phrase(raw: &str) -> Option<&str> {
    let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

fn has_boolean_operator(raw: &str) -> bool {
    ["AND", "OR", "NOT"]
        .iter()
        .any(|op| contains_word(raw, op))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Whole-word substring search: `needle` must not touch a word character on
/// either side. "OPERAND" does not contain the operator "AND".
fn contains_word(haystack: &str, needle: &str) -> bool {
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let at = from + found;
        let end = at + needle.len();
        let left_clear = at == 0 || !is_word_byte(bytes[at - 1]);
        let right_clear = end == bytes.len() || !is_word_byte(bytes[end]);
        if left_clear && right_clear {
            return true;
        }
        from = at + 1;
    }
    false
}

/// Recursive-descent parser over whitespace-separated tokens.
struct BoolParser<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> BoolParser<'a> {
    fn new(raw: &'a str) -> Self {
        BoolParser {
            tokens: raw.split_whitespace().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<&'a str> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Node {
        let mut left = self.factor();
        while let Some(op @ ("AND" | "OR")) = self.peek() {
            self.pos += 1;
            let right = self.factor();
            left = if op == "AND" {
                Node::And(Box::new(left), Box::new(right))
            } else {
                Node::Or(Box::new(left), Box::new(right))
            };
        }
        left
    }

    fn factor(&mut self) -> Node {
        if self.peek() == Some("NOT") {
            self.pos += 1;
            return Node::Not(Box::new(self.factor()));
        }
        self.atom()
    }

    fn atom(&mut self) -> Node {
        if self.peek() == Some("(") {
            self.pos += 1;
            let node = self.expr();
            if self.peek() == Some(")") {
                self.pos += 1;
            }
            return node;
        }
        match self.bump() {
            Some(word) => {
                // Same pipeline as everything else; a word that analyzes to
                // nothing (stopword, punctuation) falls back to its
                // lowercased raw form and will simply match no postings.
                let term = analyze(word)
                    .into_iter()
                    .next()
                    .unwrap_or_else(|| word.to_lowercase());
                Node::Term(term)
            }
            // Dangling operator at end of input. An empty term matches
            // nothing, which is the forgiving answer.
            None => Node::Term(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(t: &str) -> Node {
        Node::Term(t.to_string())
    }

    #[test]
    fn empty_and_whitespace_queries_are_empty_simple() {
        assert_eq!(parse_query(""), Query::Simple { terms: vec![] });
        assert_eq!(parse_query("   "), Query::Simple { terms: vec![] });
    }

    #[test]
    fn plain_words_become_simple_terms() {
        assert_eq!(
            parse_query("neural networks"),
            Query::Simple {
                terms: vec!["neural".into(), "network".into()]
            }
        );
    }

    #[test]
    fn quoted_queries_become_phrases() {
        assert_eq!(
            parse_query("\"machine learning\""),
            Query::Phrase {
                tokens: vec!["machin".into(), "learn".into()]
            }
        );
    }

    #[test]
    fn lone_or_empty_quotes_are_not_phrases() {
        assert!(matches!(parse_query("\""), Query::Simple { .. }));
        assert!(matches!(parse_query("\"\""), Query::Simple { .. }));
    }

    #[test]
    fn uppercase_operators_trigger_boolean_mode() {
        assert!(matches!(
            parse_query("python AND language"),
            Query::Boolean { .. }
        ));
        assert!(matches!(parse_query("NOT python"), Query::Boolean { .. }));
    }

    #[test]
    fn lowercase_and_embedded_operators_do_not() {
        // "and" is a stopword, "OPERAND"/"NOTION" merely contain operator
        // letters
        assert!(matches!(
            parse_query("python and language"),
            Query::Simple { .. }
        ));
        assert!(matches!(parse_query("OPERAND NOTION"), Query::Simple { .. }));
    }

    #[test]
    fn and_or_are_left_associative_with_equal_precedence() {
        let Query::Boolean { ast } = parse_query("alpha AND beta OR gamma") else {
            panic!("expected boolean");
        };
        assert_eq!(
            ast,
            Node::Or(
                Box::new(Node::And(Box::new(term("alpha")), Box::new(term("beta")))),
                Box::new(term("gamma")),
            )
        );
    }

    #[test]
    fn not_binds_tighter_than_and() {
        let Query::Boolean { ast } = parse_query("python AND NOT robotics") else {
            panic!("expected boolean");
        };
        assert_eq!(
            ast,
            Node::And(
                Box::new(term("python")),
                Box::new(Node::Not(Box::new(term("robotic")))),
            )
        );
    }

    #[test]
    fn parentheses_group_when_whitespace_separated() {
        let Query::Boolean { ast } = parse_query("python AND ( learning OR neural )") else {
            panic!("expected boolean");
        };
        assert_eq!(
            ast,
            Node::And(
                Box::new(term("python")),
                Box::new(Node::Or(Box::new(term("learn")), Box::new(term("neural")))),
            )
        );
    }

    #[test]
    fn unmatched_parens_are_tolerated() {
        let Query::Boolean { ast } = parse_query("( python AND learning") else {
            panic!("expected boolean");
        };
        assert_eq!(
            ast,
            Node::And(Box::new(term("python")), Box::new(term("learn")))
        );

        // stray ')' is simply not consumed
        assert!(matches!(
            parse_query("python OR cells )"),
            Query::Boolean { .. }
        ));
    }

    #[test]
    fn dangling_operator_gets_an_empty_term() {
        let Query::Boolean { ast } = parse_query("python AND") else {
            panic!("expected boolean");
        };
        assert_eq!(
            ast,
            Node::And(Box::new(term("python")), Box::new(term("")))
        );
    }

    #[test]
    fn boolean_words_fall_back_to_lowercase_when_analysis_empties_them() {
        let Query::Boolean { ast } = parse_query("the AND python") else {
            panic!("expected boolean");
        };
        // "the" is a stopword, so the leaf keeps the raw lowercased word
        assert_eq!(
            ast,
            Node::And(Box::new(term("the")), Box::new(term("python")))
        );
    }

    #[test]
    fn leaf_terms_include_negated_branches() {
        let Query::Boolean { ast } = parse_query("python AND NOT robotics OR cells") else {
            panic!("expected boolean");
        };
        assert_eq!(ast.leaf_terms(), vec!["python", "robotic", "cell"]);
    }
}
