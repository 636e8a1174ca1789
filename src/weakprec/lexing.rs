//! Lexer
//!
//!     This module turns source lines into lexemes for the parser.
//!
//! The Lexing Pipeline
//!
//!     Lexing works one line at a time and in three splitting passes. See
//!     [segmentation](segmentation). Every pass keeps the text it did not match as its own
//!     fragment, so the fragments of a line always concatenate back to the line:
//!         1. String literals are cut out first and never split again.
//!         2. The rest is split on whitespace runs. Whitespace is kept (columns are computed
//!            from fragment lengths) but never becomes a lexeme.
//!         3. What is left is split around every operator and special character.
//!
//!     Each surviving fragment is classified by the logos pattern table in
//!     [patterns](patterns). Classification is all or nothing: a fragment either is exactly
//!     one pattern or it is uncategorized, and an uncategorized fragment is a lexical error.
//!
//! Tokens and Lexemes
//!
//!     The [analyzer](analyzer) interns one token per (class, subclass) pair, so every
//!     identifier in a run shares one token and every `;` shares another. Lexemes keep their
//!     own text and position.
//!
//!     The parser never sees the analyzer directly. It pulls from a
//!     [lookahead buffer](buffer), which tokenizes the next line only when the previous one
//!     has been consumed.

pub mod analyzer;
pub mod buffer;
pub mod patterns;
pub mod segmentation;

pub use analyzer::LexicalAnalyzer;
pub use buffer::{LexemeBuffer, LookaheadBuffer, TerminalBuffer};
pub use patterns::{classify, Classification};
pub use segmentation::{segment, Fragment, FragmentKind};
