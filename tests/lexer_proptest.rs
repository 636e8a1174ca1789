//! Property-based tests for the weakprec lexer and parser
//!
//! These tests check that segmentation never loses text, that lexeme positions point back
//! at their text, that token interning follows (class, subclass), and that generated
//! programs always parse into a tree whose frontier is the token stream.

use proptest::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;
use weakprec::weakprec::lexing::patterns::RESERVED_WORDS;
use weakprec::weakprec::lexing::segment;
use weakprec::weakprec::{Frontend, LexicalAnalyzer};

/// The text a lexeme should cover, by character position
fn char_slice(line: &str, column: usize, len: usize) -> String {
    line.chars().skip(column).take(len).collect()
}

#[cfg(test)]
mod strategies {
    use super::*;

    pub fn identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,6}".prop_filter("reserved words are not identifiers", |s| {
            !RESERVED_WORDS.contains(&s.as_str())
        })
    }

    fn operand() -> impl Strategy<Value = String> {
        prop_oneof![
            identifier(),
            "[0-9]{1,4}",
            "[0-9]{1,3}\\.[0-9]{1,2}",
            "\"[a-z ;+]{0,8}\"",
        ]
    }

    pub fn expression() -> impl Strategy<Value = String> {
        operand().prop_recursive(3, 16, 2, |inner| {
            prop_oneof![
                (inner.clone(), prop_oneof!["\\+", "-", "\\*", "/"], inner.clone())
                    .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b)),
                inner.prop_map(|e| format!("({})", e)),
            ]
        })
    }

    fn declaration() -> impl Strategy<Value = String> {
        (identifier(), prop_oneof!["int", "real", "string"])
            .prop_map(|(name, ty)| format!("    {}: {};", name, ty))
    }

    fn statement() -> impl Strategy<Value = String> {
        prop_oneof![
            (identifier(), expression()).prop_map(|(name, e)| format!("    {} = {};", name, e)),
            expression().prop_map(|e| format!("    return {};", e)),
        ]
    }

    /// Generate valid programs
    pub fn program() -> impl Strategy<Value = String> {
        (
            prop::collection::vec(declaration(), 1..4),
            prop::collection::vec(statement(), 1..5),
        )
            .prop_map(|(declarations, statements)| {
                format!(
                    "vars\n{}\nbegin\n{}\nend\n",
                    declarations.join("\n"),
                    statements.join("\n")
                )
            })
    }

    /// Whitespace-separated words, some of which share a token
    pub fn words() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(
            prop_oneof![
                "[a-z]{1,3}",
                "[0-9]{1,3}",
                Just("+".to_string()),
                Just(";".to_string()),
                Just("<=".to_string()),
                Just("begin".to_string()),
                Just("\"a b\"".to_string()),
            ],
            1..30,
        )
    }
}

use strategies::*;

proptest! {
    #[test]
    fn test_segmentation_is_lossless(line in "[^\n]{0,60}") {
        let rebuilt: String = segment(&line).iter().map(|f| f.text).collect();
        prop_assert_eq!(rebuilt, line);
    }

    #[test]
    fn test_lexeme_positions_point_at_their_text(line in "[ -~\t]{0,40}") {
        let mut analyzer = LexicalAnalyzer::new();
        match analyzer.tokenize_line(&line, 7) {
            Ok(lexemes) => {
                for lexeme in lexemes {
                    prop_assert_eq!(lexeme.line(), 7);
                    let width = lexeme.text().chars().count();
                    prop_assert_eq!(char_slice(&line, lexeme.column(), width), lexeme.text());
                }
            }
            Err(err) => {
                let lexeme = err.lexeme();
                let width = lexeme.text().chars().count();
                prop_assert_eq!(char_slice(&line, lexeme.column(), width), lexeme.text());
                prop_assert!(lexeme.token().is_uncategorized());
            }
        }
    }

    #[test]
    fn test_interning_follows_token_keys(words in words()) {
        let mut analyzer = LexicalAnalyzer::new();
        let lexemes = analyzer.tokenize_line(&words.join(" "), 0).unwrap();

        for a in &lexemes {
            for b in &lexemes {
                prop_assert_eq!(
                    Rc::ptr_eq(a.token(), b.token()),
                    a.token().key() == b.token().key()
                );
            }
        }

        let keys: HashSet<_> = lexemes.iter().map(|l| l.token().key()).collect();
        prop_assert_eq!(analyzer.recognized_tokens().len(), keys.len());
    }

    #[test]
    fn test_generated_programs_parse(source in program()) {
        let frontend = Frontend::program().unwrap();
        let analysis = frontend.analyze(&source).unwrap();

        prop_assert_eq!(analysis.derivation[0].head(), "<program>");

        let kinds: Vec<&str> = analysis.lexemes.iter().map(|l| l.kind()).collect();
        prop_assert_eq!(analysis.tree.frontier(frontend.parser().grammar()), kinds);

        let annotated = analysis
            .tree
            .leaves()
            .iter()
            .filter(|leaf| leaf.lexeme().is_some())
            .count();
        prop_assert_eq!(annotated, analysis.lexemes.len());
    }

    #[test]
    fn test_parsing_is_deterministic(source in program()) {
        let frontend = Frontend::program().unwrap();
        let first = frontend.analyze(&source).unwrap();
        let second = frontend.analyze(&source).unwrap();
        prop_assert_eq!(first.derivation, second.derivation);
        prop_assert_eq!(first.tree, second.tree);
    }
}
