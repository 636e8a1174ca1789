//! Pattern table for the weakprec language
//!
//! This module defines the patterns a source fragment can be classified as.
//! The patterns are defined using the logos derive macro; the splitting regexes used by
//! [segmentation](super::segmentation) live here too so both sides agree on what an
//! operator is.
use crate::weakprec::token::TokenClass;
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

/// Operators and special characters, multi-character operators first.
///
/// Alternation in the splitting regex is leftmost-first, so `==` must come before `=`.
pub const OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "+", "-", "*", "/", "%", "=", "<", ">", "(", ")", ":", ";", ",",
];

pub const RESERVED_WORDS: &[&str] = &["vars", "begin", "end", "return", "int", "real", "string"];

pub(crate) static STRING_LITERAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""[^"]*""#).unwrap());

pub(crate) static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub(crate) static OPERATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    let alternatives = OPERATORS
        .iter()
        .map(|op| regex::escape(op))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternatives).unwrap()
});

/// All recognized fragment patterns
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pattern {
    #[regex(r"\s+")]
    Whitespace,

    #[regex(r#""[^"]*""#)]
    StringLiteral,

    #[token("vars")]
    #[token("begin")]
    #[token("end")]
    #[token("return")]
    #[token("int")]
    #[token("real")]
    #[token("string")]
    Reserved,

    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("=")]
    #[token("<")]
    #[token(">")]
    Operator,

    #[token("(")]
    #[token(")")]
    #[token(":")]
    #[token(";")]
    #[token(",")]
    Special,

    #[regex(r"[0-9]+\.[0-9]+")]
    Real,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

/// Result of classifying one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Whitespace,
    Token { class: TokenClass, subclass: String },
    Uncategorized,
}

impl Classification {
    fn token(class: TokenClass, subclass: &str) -> Self {
        Classification::Token {
            class,
            subclass: subclass.to_string(),
        }
    }
}

/// Classify a fragment. The whole fragment must be exactly one pattern.
pub fn classify(fragment: &str) -> Classification {
    let mut lexer = Pattern::lexer(fragment);
    let pattern = match lexer.next() {
        Some(Ok(pattern)) => pattern,
        _ => return Classification::Uncategorized,
    };
    if lexer.span() != (0..fragment.len()) {
        return Classification::Uncategorized;
    }

    match pattern {
        Pattern::Whitespace => Classification::Whitespace,
        Pattern::StringLiteral => Classification::token(TokenClass::Literal, "string"),
        Pattern::Real => Classification::token(TokenClass::Literal, "real"),
        Pattern::Integer => Classification::token(TokenClass::Literal, "integer"),
        Pattern::Identifier => Classification::token(TokenClass::Identifier, "id"),
        Pattern::Reserved => Classification::token(TokenClass::Reserved, fragment),
        Pattern::Operator => Classification::token(TokenClass::Operator, fragment),
        Pattern::Special => Classification::token(TokenClass::Special, fragment),
    }
}
