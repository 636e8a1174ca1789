//! # weakprec
//!
//! A compiler front end for a small line-oriented imperative language.
//!
//! File Layout
//!
//! The crate follows the pipeline order. Source text is split into lexemes by the lexing
//! module, the lexemes are pulled one at a time by the weak precedence parser, and the
//! resulting derivation is turned back into a concrete syntax tree:
//!
//! src/weakprec
//!   ├── lexing       Pattern classifier, line segmentation, analyzer, lookahead buffer
//!   ├── grammar      Productions, symbol sets and the YAML rule tables
//!   ├── parsing      Precedence relations, action table and the shift/reduce driver
//!   ├── tree         Syntax tree rebuilt from a derivation
//!   ├── formats      Text renderings (treeviz, table grid, relation list)
//!   ├── frontend     One-call analysis: lexemes + derivation + annotated tree
//!   └── processor    stage/format processing API used by the CLI
//!
//! Semantic analysis, code generation and any visualization live outside this crate and
//! consume the serialized lexemes, derivation and tree.

pub mod weakprec;
