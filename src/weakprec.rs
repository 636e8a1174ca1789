//! Main module for weakprec library functionality

pub mod error;
pub mod formats;
pub mod frontend;
pub mod grammar;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod token;
pub mod tree;

pub use error::{AnalysisError, GrammarError, GrammaticalError, LexicalError, TreeError};
pub use frontend::{Analysis, Frontend};
pub use grammar::{Grammar, GrammarConfig, Production};
pub use lexing::{LexemeBuffer, LexicalAnalyzer, LookaheadBuffer, TerminalBuffer};
pub use parsing::{
    Action, ActionTable, Derivation, PrecedenceRelations, Relation, WeakPrecedenceParser,
};
pub use token::{Element, Lexeme, Token, TokenClass};
pub use tree::SyntaxNode;
