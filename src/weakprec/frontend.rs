//! The full pipeline: source text in, annotated tree out.
//!
//!     A [Frontend] owns one parser (and so one grammar and its tables). Every call to
//!     [Frontend::analyze] gets a fresh lexical analyzer, so tokens are interned per run.

use crate::weakprec::error::{AnalysisError, GrammarError};
use crate::weakprec::grammar::GrammarConfig;
use crate::weakprec::lexing::{LexemeBuffer, LexicalAnalyzer, LookaheadBuffer, TerminalBuffer};
use crate::weakprec::parsing::{Derivation, WeakPrecedenceParser};
use crate::weakprec::token::Lexeme;
use crate::weakprec::tree::{self, SyntaxNode};
use serde::Serialize;
use tracing::debug;

/// Everything one successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis<'p> {
    pub lexemes: Vec<Lexeme>,
    pub derivation: Derivation<'p>,
    pub tree: SyntaxNode,
}

#[derive(Debug, Clone)]
pub struct Frontend {
    parser: WeakPrecedenceParser,
}

impl Frontend {
    pub fn new(config: &GrammarConfig) -> Result<Self, GrammarError> {
        Ok(Frontend {
            parser: config.parser()?,
        })
    }

    pub fn from_parser(parser: WeakPrecedenceParser) -> Self {
        Frontend { parser }
    }

    pub fn program() -> Result<Self, GrammarError> {
        Self::new(GrammarConfig::program())
    }

    pub fn arithmetic() -> Result<Self, GrammarError> {
        Self::new(GrammarConfig::arithmetic())
    }

    pub fn parser(&self) -> &WeakPrecedenceParser {
        &self.parser
    }

    /// Lex, parse and build the annotated tree for `source`.
    pub fn analyze(&self, source: &str) -> Result<Analysis<'_>, AnalysisError> {
        let mut analyzer = LexicalAnalyzer::new();
        let mut buffer = LexemeBuffer::new(source, &mut analyzer, self.parser.end_marker());
        let derivation = match self.parser.parse(&mut buffer) {
            Ok(derivation) => derivation,
            Err(err) => {
                debug!(consumed = buffer.consumed().len(), %err, "analysis failed");
                return Err(err);
            }
        };
        let lexemes = buffer.into_lexemes();

        let analysis = self.finish(lexemes, derivation)?;
        debug!(
            lexemes = analysis.lexemes.len(),
            tokens = analyzer.recognized_tokens().len(),
            productions = analysis.derivation.len(),
            "analysis complete"
        );
        Ok(analysis)
    }

    /// Parse raw terminal symbols, for grammars the lexer knows nothing about.
    pub fn analyze_terminals<I, S>(&self, terminals: I) -> Result<Analysis<'_>, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = TerminalBuffer::new(terminals, self.parser.end_marker());
        self.analyze_buffer(&mut buffer, Vec::new())
    }

    /// Parse whatever `buffer` supplies. `lexemes` are attached to the tree afterwards.
    pub fn analyze_buffer<B>(
        &self,
        buffer: &mut B,
        lexemes: Vec<Lexeme>,
    ) -> Result<Analysis<'_>, AnalysisError>
    where
        B: LookaheadBuffer + ?Sized,
    {
        let derivation = self.parser.parse(buffer)?;
        self.finish(lexemes, derivation)
    }

    fn finish<'p>(
        &'p self,
        lexemes: Vec<Lexeme>,
        derivation: Derivation<'p>,
    ) -> Result<Analysis<'p>, AnalysisError> {
        let mut tree = tree::build(&derivation, self.parser.grammar())?;
        tree.attach_lexemes(&lexemes);
        Ok(Analysis {
            lexemes,
            derivation,
            tree,
        })
    }
}
