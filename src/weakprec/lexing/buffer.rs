//! Lookahead buffers
//!
//!     The parser pulls one element at a time through [LookaheadBuffer]. [LexemeBuffer]
//!     tokenizes source text lazily, a line at a time, and [TerminalBuffer] feeds raw grammar
//!     terminals for grammars that have no lexer of their own (the arithmetic grammar's `v`).
//!
//!     Both return the end marker once input runs out, and keep returning it.

use super::analyzer::LexicalAnalyzer;
use crate::weakprec::error::LexicalError;
use crate::weakprec::token::{Element, Lexeme};
use std::collections::VecDeque;
use std::iter::Enumerate;
use std::str::Lines;

/// Pull-based source of parser input.
pub trait LookaheadBuffer {
    /// The next element, or the end marker when input is exhausted.
    fn next_element(&mut self) -> Result<Element, LexicalError>;
}

/// Lexemes from source text, tokenized on demand.
pub struct LexemeBuffer<'a> {
    lines: Enumerate<Lines<'a>>,
    analyzer: &'a mut LexicalAnalyzer,
    pending: VecDeque<Lexeme>,
    /// Every lexeme handed out so far, for attaching to the tree afterwards
    consumed: Vec<Lexeme>,
    end_marker: String,
}

impl<'a> LexemeBuffer<'a> {
    pub fn new(
        source: &'a str,
        analyzer: &'a mut LexicalAnalyzer,
        end_marker: impl Into<String>,
    ) -> Self {
        LexemeBuffer {
            lines: source.lines().enumerate(),
            analyzer,
            pending: VecDeque::new(),
            consumed: Vec::new(),
            end_marker: end_marker.into(),
        }
    }

    pub fn consumed(&self) -> &[Lexeme] {
        &self.consumed
    }

    pub fn into_lexemes(self) -> Vec<Lexeme> {
        self.consumed
    }
}

impl LookaheadBuffer for LexemeBuffer<'_> {
    fn next_element(&mut self) -> Result<Element, LexicalError> {
        loop {
            if let Some(lexeme) = self.pending.pop_front() {
                self.consumed.push(lexeme.clone());
                return Ok(Element::Lexeme(lexeme));
            }
            match self.lines.next() {
                Some((line, text)) => {
                    let lexemes = self.analyzer.tokenize_line(text, line)?;
                    self.pending.extend(lexemes);
                }
                None => return Ok(Element::symbol(self.end_marker.as_str())),
            }
        }
    }
}

/// Raw terminal symbols, already in grammar form.
#[derive(Debug, Clone)]
pub struct TerminalBuffer {
    terminals: VecDeque<String>,
    end_marker: String,
}

impl TerminalBuffer {
    pub fn new<I, S>(terminals: I, end_marker: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TerminalBuffer {
            terminals: terminals.into_iter().map(Into::into).collect(),
            end_marker: end_marker.into(),
        }
    }

    /// One terminal per character, skipping whitespace. Fits grammars whose
    /// terminals are single characters, like `v+v`.
    pub fn from_chars(input: &str, end_marker: impl Into<String>) -> Self {
        Self::new(
            input
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_string()),
            end_marker,
        )
    }
}

impl LookaheadBuffer for TerminalBuffer {
    fn next_element(&mut self) -> Result<Element, LexicalError> {
        Ok(match self.terminals.pop_front() {
            Some(terminal) => Element::Symbol(terminal),
            None => Element::symbol(self.end_marker.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexeme_buffer_crosses_lines() {
        let mut analyzer = LexicalAnalyzer::new();
        let mut buffer = LexemeBuffer::new("vars\n\n  x: int;", &mut analyzer, "$");

        let mut kinds = Vec::new();
        loop {
            let element = buffer.next_element().unwrap();
            if element.kind() == "$" {
                break;
            }
            kinds.push(element.kind().to_string());
        }
        assert_eq!(kinds, vec!["vars", "id", ":", "int", ";"]);
        // End marker repeats
        assert_eq!(buffer.next_element().unwrap(), Element::symbol("$"));
        assert_eq!(buffer.into_lexemes().len(), 5);
    }

    #[test]
    fn test_lexeme_buffer_is_lazy() {
        let mut analyzer = LexicalAnalyzer::new();
        let mut buffer = LexemeBuffer::new("x;\n@", &mut analyzer, "$");

        // The second line is not tokenized until the first is drained
        assert_eq!(buffer.next_element().unwrap().kind(), "id");
        assert_eq!(buffer.next_element().unwrap().kind(), ";");
        let err = buffer.next_element().unwrap_err();
        assert_eq!(err.lexeme().line(), 1);
        assert_eq!(buffer.consumed().len(), 2);
    }

    #[test]
    fn test_terminal_buffer() {
        let mut buffer = TerminalBuffer::from_chars("v + v", "$");
        let kinds: Vec<String> = (0..5)
            .map(|_| buffer.next_element().unwrap().kind().to_string())
            .collect();
        assert_eq!(kinds, vec!["v", "+", "v", "$", "$"]);
    }
}
