//! Error types for the analysis pipeline
//!
//!     Lexical and grammatical errors are terminal: the analysis that raised them is
//!     abandoned and no partial derivation or tree is returned. Both carry the element that
//!     caused them so callers can point at a line and column.

use crate::weakprec::token::{Element, Lexeme};
use std::fmt;

/// A source fragment matched no recognized pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    lexeme: Lexeme,
}

impl LexicalError {
    pub fn new(lexeme: Lexeme) -> Self {
        LexicalError { lexeme }
    }

    pub fn lexeme(&self) -> &Lexeme {
        &self.lexeme
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical error at {}:{}: unrecognized fragment {:?}",
            self.lexeme.line() + 1,
            self.lexeme.column() + 1,
            self.lexeme.text()
        )
    }
}

impl std::error::Error for LexicalError {}

/// The parser found no action, or no production matching the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammaticalError {
    lookahead: Element,
}

impl GrammaticalError {
    pub fn new(lookahead: Element) -> Self {
        GrammaticalError { lookahead }
    }

    pub fn lookahead(&self) -> &Element {
        &self.lookahead
    }
}

impl fmt::Display for GrammaticalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lookahead {
            Element::Lexeme(lexeme) => write!(
                f,
                "Grammatical error at {}:{}: unexpected {:?} ({})",
                lexeme.line() + 1,
                lexeme.column() + 1,
                lexeme.text(),
                lexeme.kind()
            ),
            Element::Symbol(symbol) => {
                write!(f, "Grammatical error: unexpected symbol {:?}", symbol)
            }
        }
    }
}

impl std::error::Error for GrammaticalError {}

/// A derivation that does not rebuild into a tree under the given grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// No productions to build from
    EmptyDerivation,
    /// A non-terminal needed expanding but the derivation ran out
    Exhausted { symbol: String },
    /// The next production does not expand the symbol being built
    Mismatch { expected: String, found: String },
    /// The tree was complete before the derivation was
    Unconsumed { remaining: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::EmptyDerivation => write!(f, "Tree error: empty derivation"),
            TreeError::Exhausted { symbol } => {
                write!(f, "Tree error: derivation exhausted while expanding {}", symbol)
            }
            TreeError::Mismatch { expected, found } => write!(
                f,
                "Tree error: expected a production for {}, found one for {}",
                expected, found
            ),
            TreeError::Unconsumed { remaining } => {
                write!(f, "Tree error: {} productions left unconsumed", remaining)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Any failure of a full analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    Lexical(LexicalError),
    Grammatical(GrammaticalError),
    Tree(TreeError),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Lexical(e) => write!(f, "{}", e),
            AnalysisError::Grammatical(e) => write!(f, "{}", e),
            AnalysisError::Tree(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Lexical(e) => Some(e),
            AnalysisError::Grammatical(e) => Some(e),
            AnalysisError::Tree(e) => Some(e),
        }
    }
}

impl From<LexicalError> for AnalysisError {
    fn from(err: LexicalError) -> Self {
        AnalysisError::Lexical(err)
    }
}

impl From<GrammaticalError> for AnalysisError {
    fn from(err: GrammaticalError) -> Self {
        AnalysisError::Grammatical(err)
    }
}

impl From<TreeError> for AnalysisError {
    fn from(err: TreeError) -> Self {
        AnalysisError::Tree(err)
    }
}

/// Errors raised while loading or validating a grammar rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// The rule table has no productions
    EmptyRuleSet,
    /// A production body with no symbols
    EmptyBody { head: String },
    /// The empty symbol used alongside other symbols in one body
    MisplacedEmptySymbol { head: String },
    /// The start symbol is not the head of any production
    UndefinedStart(String),
    /// The end marker also appears as a grammar symbol
    ReservedSymbol(String),
    /// Malformed YAML or a schema mismatch
    Config(String),
    Io(String),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::EmptyRuleSet => write!(f, "Grammar has no productions"),
            GrammarError::EmptyBody { head } => {
                write!(f, "Production for {} has an empty body", head)
            }
            GrammarError::MisplacedEmptySymbol { head } => write!(
                f,
                "Production for {} mixes the empty symbol with other symbols",
                head
            ),
            GrammarError::UndefinedStart(start) => {
                write!(f, "Start symbol {} heads no production", start)
            }
            GrammarError::ReservedSymbol(symbol) => {
                write!(f, "End marker {} is used as a grammar symbol", symbol)
            }
            GrammarError::Config(msg) => write!(f, "Grammar configuration error: {}", msg),
            GrammarError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for GrammarError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weakprec::token::{Token, TokenClass};
    use std::rc::Rc;

    #[test]
    fn test_lexical_error_display() {
        let lexeme = Lexeme::new("@", 3, 4, Rc::new(Token::uncategorized()));
        let err = LexicalError::new(lexeme);
        assert_eq!(
            err.to_string(),
            "Lexical error at 4:5: unrecognized fragment \"@\""
        );
    }

    #[test]
    fn test_grammatical_error_display() {
        let token = Rc::new(Token::new(TokenClass::Special, ")"));
        let err = GrammaticalError::new(Element::Lexeme(Lexeme::new(")", 0, 0, token)));
        assert_eq!(
            err.to_string(),
            "Grammatical error at 1:1: unexpected \")\" ())"
        );

        let err = GrammaticalError::new(Element::symbol("$"));
        assert_eq!(err.to_string(), "Grammatical error: unexpected symbol \"$\"");
    }

    #[test]
    fn test_analysis_error_conversions() {
        let err: AnalysisError = TreeError::EmptyDerivation.into();
        assert!(matches!(err, AnalysisError::Tree(TreeError::EmptyDerivation)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
