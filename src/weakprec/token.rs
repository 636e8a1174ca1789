//! Token and lexeme types shared by the lexer, the parser and the tree builder.
//!
//!     A Token is a classification: every identifier in a compilation unit shares the same
//!     `(identifier, id)` token, every `+` shares the `(operator, +)` token. The analyzer
//!     interns them, so two lexemes of the same kind point at the same `Rc<Token>`.
//!
//!     A Lexeme is one recognized fragment of source text: its text, where it starts, and the
//!     token it was classified as.
//!
//!     The parser works on kinds. A token's kind is the grammar terminal it stands for, which
//!     is why the parser stack can mix lexemes with bare grammar symbols (see [Element]).

use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Broad category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenClass {
    Reserved,
    Identifier,
    Literal,
    Operator,
    Special,
    /// Only ever carried by a [crate::weakprec::LexicalError]; never interned.
    Uncategorized,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Reserved => "reserved",
            TokenClass::Identifier => "identifier",
            TokenClass::Literal => "literal",
            TokenClass::Operator => "operator",
            TokenClass::Special => "special",
            TokenClass::Uncategorized => "uncategorized",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interning key: token identity is a pure function of this pair.
pub type TokenKey = (TokenClass, String);

/// An interned token classification.
#[derive(Debug, Clone, Serialize)]
pub struct Token {
    class: TokenClass,
    subclass: String,
    kind: String,
}

impl Token {
    pub fn new(class: TokenClass, subclass: impl Into<String>) -> Self {
        let subclass = subclass.into();
        let kind = derive_kind(class, &subclass);
        Token {
            class,
            subclass,
            kind,
        }
    }

    pub fn uncategorized() -> Self {
        Token::new(TokenClass::Uncategorized, "")
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    pub fn subclass(&self) -> &str {
        &self.subclass
    }

    /// The grammar terminal this token stands for.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn key(&self) -> TokenKey {
        (self.class, self.subclass.clone())
    }

    pub fn is_uncategorized(&self) -> bool {
        self.class == TokenClass::Uncategorized
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.subclass == other.subclass
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}>", self.class, self.kind)
    }
}

fn derive_kind(class: TokenClass, subclass: &str) -> String {
    match class {
        TokenClass::Identifier => "id".to_string(),
        TokenClass::Literal => match subclass {
            "string" => "text".to_string(),
            _ => "num".to_string(),
        },
        TokenClass::Uncategorized => "uncategorized".to_string(),
        TokenClass::Reserved | TokenClass::Operator | TokenClass::Special => subclass.to_string(),
    }
}

/// A recognized unit of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    text: String,
    line: usize,
    column: usize,
    token: Rc<Token>,
}

impl Lexeme {
    pub fn new(text: impl Into<String>, line: usize, column: usize, token: Rc<Token>) -> Self {
        Lexeme {
            text: text.into(),
            line,
            column,
            token,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 0-based line index.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based character offset within the line.
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn token(&self) -> &Rc<Token> {
        &self.token
    }

    pub fn kind(&self) -> &str {
        self.token.kind()
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} at {}:{}",
            self.text,
            self.token,
            self.line + 1,
            self.column + 1
        )
    }
}

/// An item on the parser stack or in the lookahead slot.
///
/// Bare symbols cover raw terminals fed directly to the parser, non-terminal heads pushed
/// by reductions, the end marker and the empty marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    Symbol(String),
    Lexeme(Lexeme),
}

impl Element {
    pub fn symbol(symbol: impl Into<String>) -> Self {
        Element::Symbol(symbol.into())
    }

    /// The grammar symbol this element is matched as.
    pub fn kind(&self) -> &str {
        match self {
            Element::Symbol(symbol) => symbol,
            Element::Lexeme(lexeme) => lexeme.kind(),
        }
    }

    pub fn as_lexeme(&self) -> Option<&Lexeme> {
        match self {
            Element::Lexeme(lexeme) => Some(lexeme),
            Element::Symbol(_) => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Symbol(symbol) => write!(f, "{:?}", symbol),
            Element::Lexeme(lexeme) => write!(f, "{}", lexeme),
        }
    }
}
