//! YAML grammar configuration
//!
//! A grammar file names its start symbol, an optional end marker (default `$`), an
//! optional empty symbol and its rules:
//!
//! ```yaml
//! start: "E"
//! empty: "ε"
//! rules:
//!   - head: "F"
//!     bodies: ["+ M F", "ε"]
//! ```
//!
//! Bodies are whitespace-separated symbol lists, so symbols that YAML treats specially
//! (`:` followed by a space, a leading `*` or `&`) need quoting.

use super::{Grammar, Production};
use crate::weakprec::error::GrammarError;
use crate::weakprec::parsing::WeakPrecedenceParser;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const PROGRAM_YAML: &str = include_str!("../../../grammars/program.yaml");
const ARITHMETIC_YAML: &str = include_str!("../../../grammars/arithmetic.yaml");

static PROGRAM: Lazy<GrammarConfig> =
    Lazy::new(|| GrammarConfig::from_yaml(PROGRAM_YAML).expect("bundled program grammar"));
static ARITHMETIC: Lazy<GrammarConfig> =
    Lazy::new(|| GrammarConfig::from_yaml(ARITHMETIC_YAML).expect("bundled arithmetic grammar"));

fn default_end_marker() -> String {
    "$".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub start: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
    #[serde(default)]
    pub empty: Option<String>,
    pub rules: Vec<RuleConfig>,
}

/// All alternatives for one head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub head: String,
    pub bodies: Vec<String>,
}

impl GrammarConfig {
    /// The grammar of the bundled imperative language.
    pub fn program() -> &'static GrammarConfig {
        &PROGRAM
    }

    /// The bundled `E/F/M/N/P` expression grammar with empty productions.
    pub fn arithmetic() -> &'static GrammarConfig {
        &ARITHMETIC
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, GrammarError> {
        serde_yaml::from_str(yaml).map_err(|e| GrammarError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| GrammarError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Productions in declaration order: rules top to bottom, bodies left to right.
    pub fn productions(&self) -> Vec<Production> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.bodies
                    .iter()
                    .map(move |body| Production::parse(&rule.head, body))
            })
            .collect()
    }

    /// Validate and build the grammar.
    pub fn build(&self) -> Result<Grammar, GrammarError> {
        let grammar = Grammar::new(self.productions(), self.empty.clone())?;

        if !grammar.is_non_terminal(&self.start) {
            return Err(GrammarError::UndefinedStart(self.start.clone()));
        }
        if grammar.symbols().any(|symbol| symbol == self.end_marker) {
            return Err(GrammarError::ReservedSymbol(self.end_marker.clone()));
        }

        Ok(grammar)
    }

    /// Build the grammar and the parser tables for it.
    pub fn parser(&self) -> Result<WeakPrecedenceParser, GrammarError> {
        Ok(WeakPrecedenceParser::new(
            self.build()?,
            &self.start,
            &self.end_marker,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_program_grammar() {
        let config = GrammarConfig::program();
        assert_eq!(config.start, "<program>");
        assert_eq!(config.end_marker, "$");
        assert_eq!(config.empty, None);

        let grammar = config.build().unwrap();
        assert_eq!(grammar.productions().len(), 21);
        assert_eq!(grammar.non_terminals().len(), 9);
        assert_eq!(
            grammar.terminals(),
            &[
                "vars", "begin", "end", "id", ":", ";", "int", "real", "string", "=", "return",
                "+", "-", "*", "/", "(", ")", "num", "text"
            ]
        );
    }

    #[test]
    fn test_bundled_arithmetic_grammar() {
        let config = GrammarConfig::arithmetic();
        let grammar = config.build().unwrap();
        assert_eq!(grammar.empty_symbol(), Some("ε"));
        assert_eq!(grammar.productions().len(), 8);
        assert_eq!(grammar.productions()[2].to_string(), "F → ε");
    }

    #[test]
    fn test_end_marker_defaults_to_dollar() {
        let config = GrammarConfig::from_yaml(
            "start: S\nrules:\n  - head: S\n    bodies: [\"a S b\", \"c\"]\n",
        )
        .unwrap();
        assert_eq!(config.end_marker, "$");
        assert_eq!(config.productions().len(), 2);
    }

    #[test]
    fn test_undefined_start() {
        let config = GrammarConfig::from_yaml(
            "start: T\nrules:\n  - head: S\n    bodies: [\"a\"]\n",
        )
        .unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            GrammarError::UndefinedStart("T".to_string())
        );
    }

    #[test]
    fn test_end_marker_is_reserved() {
        let config = GrammarConfig::from_yaml(
            "start: S\nend_marker: \"#\"\nrules:\n  - head: S\n    bodies: [\"a #\"]\n",
        )
        .unwrap();
        assert_eq!(
            config.build().unwrap_err(),
            GrammarError::ReservedSymbol("#".to_string())
        );
    }

    #[test]
    fn test_malformed_yaml() {
        let err = GrammarConfig::from_yaml("start: [unclosed").unwrap_err();
        assert!(matches!(err, GrammarError::Config(_)));

        let err = GrammarConfig::from_yaml("start: S\n").unwrap_err();
        assert!(matches!(err, GrammarError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GrammarConfig::from_file("no/such/grammar.yaml").unwrap_err();
        assert!(matches!(err, GrammarError::Io(_)));
    }
}
