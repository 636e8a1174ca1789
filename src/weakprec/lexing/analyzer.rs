//! Lexical analyzer
//!
//!     Turns source lines into lexemes, interning one token per (class, subclass) pair.
//!     The intern map belongs to the analyzer, so two analyzers never share tokens.

use super::patterns::{classify, Classification};
use super::segmentation::segment;
use crate::weakprec::error::LexicalError;
use crate::weakprec::token::{Lexeme, Token, TokenClass, TokenKey};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug, Default)]
pub struct LexicalAnalyzer {
    /// Interned tokens in first-seen order
    tokens: Vec<Rc<Token>>,
    index: HashMap<TokenKey, usize>,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize one line. `line` is the 0-based line index recorded on each lexeme.
    ///
    /// Whitespace advances the column but produces no lexeme. The first uncategorized
    /// fragment aborts the line.
    pub fn tokenize_line(&mut self, text: &str, line: usize) -> Result<Vec<Lexeme>, LexicalError> {
        let mut lexemes = Vec::new();
        let mut column = 0;

        for fragment in segment(text) {
            let width = fragment.width();
            match classify(fragment.text) {
                Classification::Whitespace => {}
                Classification::Token { class, subclass } => {
                    let token = self.intern(class, subclass);
                    lexemes.push(Lexeme::new(fragment.text, line, column, token));
                }
                Classification::Uncategorized => {
                    let lexeme =
                        Lexeme::new(fragment.text, line, column, Rc::new(Token::uncategorized()));
                    return Err(LexicalError::new(lexeme));
                }
            }
            column += width;
        }

        trace!(line, lexemes = lexemes.len(), "tokenized line");
        Ok(lexemes)
    }

    /// Tokenize a whole source, line by line.
    pub fn tokenize(&mut self, source: &str) -> Result<Vec<Lexeme>, LexicalError> {
        let mut lexemes = Vec::new();
        for (line, text) in source.lines().enumerate() {
            lexemes.extend(self.tokenize_line(text, line)?);
        }
        Ok(lexemes)
    }

    /// Every token interned so far, in the order first seen.
    pub fn recognized_tokens(&self) -> &[Rc<Token>] {
        &self.tokens
    }

    fn intern(&mut self, class: TokenClass, subclass: String) -> Rc<Token> {
        let key = (class, subclass);
        if let Some(&i) = self.index.get(&key) {
            return Rc::clone(&self.tokens[i]);
        }
        let token = Rc::new(Token::new(key.0, key.1));
        self.index.insert(token.key(), self.tokens.len());
        self.tokens.push(Rc::clone(&token));
        token
    }
}
