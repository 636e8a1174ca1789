//! Grammar
//!
//!     An immutable registry of productions. Symbols that head at least one production are
//!     non-terminals; every other body symbol is a terminal, except the grammar's empty
//!     symbol (when it declares one), which stands for an empty body.
//!
//!     Grammars are normally loaded from YAML through [GrammarConfig]; the two bundled
//!     grammars are available as [GrammarConfig::program] and [GrammarConfig::arithmetic].

pub mod config;
pub mod production;

pub use config::{GrammarConfig, RuleConfig};
pub use production::Production;

use crate::weakprec::error::GrammarError;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
    by_head: HashMap<String, Vec<usize>>,
    by_body: HashMap<String, Vec<usize>>,
    /// Heads, first-seen order
    non_terminals: Vec<String>,
    /// Body symbols that are never heads, first-seen order
    terminals: Vec<String>,
    empty_symbol: Option<String>,
}

impl Grammar {
    /// Build a grammar from productions in declaration order.
    pub fn new(
        productions: Vec<Production>,
        empty_symbol: Option<String>,
    ) -> Result<Self, GrammarError> {
        if productions.is_empty() {
            return Err(GrammarError::EmptyRuleSet);
        }

        for production in &productions {
            if production.body().is_empty() {
                return Err(GrammarError::EmptyBody {
                    head: production.head().to_string(),
                });
            }
            if let Some(empty) = &empty_symbol {
                if production.body().len() > 1 && production.body().contains(empty) {
                    return Err(GrammarError::MisplacedEmptySymbol {
                        head: production.head().to_string(),
                    });
                }
            }
        }

        let mut by_head: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_body: HashMap<String, Vec<usize>> = HashMap::new();
        let mut non_terminals = Vec::new();

        for (i, production) in productions.iter().enumerate() {
            if !by_head.contains_key(production.head()) {
                non_terminals.push(production.head().to_string());
            }
            by_head
                .entry(production.head().to_string())
                .or_default()
                .push(i);
            by_body
                .entry(production.body_key().to_string())
                .or_default()
                .push(i);
        }

        let mut seen = HashSet::new();
        let mut terminals = Vec::new();
        for symbol in productions.iter().flat_map(|p| p.body()) {
            if by_head.contains_key(symbol) || empty_symbol.as_ref() == Some(symbol) {
                continue;
            }
            if seen.insert(symbol.as_str()) {
                terminals.push(symbol.clone());
            }
        }

        Ok(Grammar {
            productions,
            by_head,
            by_body,
            non_terminals,
            terminals,
            empty_symbol,
        })
    }

    /// Build from `(head, body)` pairs with whitespace-separated bodies.
    pub fn from_rules(rules: &[(&str, &str)], empty_symbol: Option<&str>) -> Result<Self, GrammarError> {
        let productions = rules
            .iter()
            .map(|(head, body)| Production::parse(head, body))
            .collect();
        Grammar::new(productions, empty_symbol.map(str::to_string))
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Productions headed by `head`, in declaration order.
    pub fn productions_with_head<'g>(&'g self, head: &str) -> impl Iterator<Item = &'g Production> + 'g {
        self.lookup(&self.by_head, head)
    }

    /// Productions whose body key is exactly `body_key`, in declaration order.
    pub fn productions_with_body<'g>(
        &'g self,
        body_key: &str,
    ) -> impl Iterator<Item = &'g Production> + 'g {
        self.lookup(&self.by_body, body_key)
    }

    fn lookup<'g>(
        &'g self,
        index: &'g HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = &'g Production> + 'g {
        index
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.productions[i])
    }

    pub fn is_non_terminal(&self, symbol: &str) -> bool {
        self.by_head.contains_key(symbol)
    }

    pub fn is_terminal(&self, symbol: &str) -> bool {
        self.terminals.iter().any(|t| t == symbol)
    }

    pub fn is_empty_symbol(&self, symbol: &str) -> bool {
        self.empty_symbol.as_deref() == Some(symbol)
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    pub fn non_terminals(&self) -> &[String] {
        &self.non_terminals
    }

    pub fn empty_symbol(&self) -> Option<&str> {
        self.empty_symbol.as_deref()
    }

    /// Every symbol appearing anywhere in the grammar.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.non_terminals
            .iter()
            .chain(self.terminals.iter())
            .chain(self.empty_symbol.iter())
            .map(String::as_str)
    }
}
