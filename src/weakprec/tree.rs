//! Concrete syntax trees
//!
//!     The parser emits a rightmost derivation: the first production is headed by the start
//!     symbol, and each later one expands the rightmost non-terminal still open. [build]
//!     replays it with a cursor, walking each body right to left so every recursive call
//!     picks up the production meant for it.
//!
//!     Trees carry no parent pointers. Leaves are terminals (or the empty symbol) and receive
//!     lexemes after the fact through [SyntaxNode::attach_lexemes].

use crate::weakprec::error::TreeError;
use crate::weakprec::grammar::{Grammar, Production};
use crate::weakprec::token::Lexeme;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxNode {
    symbol: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<SyntaxNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lexeme: Option<Lexeme>,
}

/// Rebuild the tree for a derivation under `grammar`.
pub fn build(derivation: &[&Production], grammar: &Grammar) -> Result<SyntaxNode, TreeError> {
    let first = derivation.first().ok_or(TreeError::EmptyDerivation)?;
    let mut cursor = 0;
    let root = expand(first.head(), derivation, grammar, &mut cursor)?;

    if cursor < derivation.len() {
        return Err(TreeError::Unconsumed {
            remaining: derivation.len() - cursor,
        });
    }
    Ok(root)
}

fn expand(
    symbol: &str,
    derivation: &[&Production],
    grammar: &Grammar,
    cursor: &mut usize,
) -> Result<SyntaxNode, TreeError> {
    let production = derivation
        .get(*cursor)
        .ok_or_else(|| TreeError::Exhausted {
            symbol: symbol.to_string(),
        })?;
    if production.head() != symbol {
        return Err(TreeError::Mismatch {
            expected: symbol.to_string(),
            found: production.head().to_string(),
        });
    }
    *cursor += 1;

    let mut children = Vec::with_capacity(production.body().len());
    for part in production.body().iter().rev() {
        let child = if grammar.is_non_terminal(part) {
            expand(part, derivation, grammar, cursor)?
        } else {
            SyntaxNode::leaf(part)
        };
        children.push(child);
    }
    children.reverse();

    Ok(SyntaxNode {
        symbol: symbol.to_string(),
        children,
        lexeme: None,
    })
}

impl SyntaxNode {
    pub fn leaf(symbol: impl Into<String>) -> Self {
        SyntaxNode {
            symbol: symbol.into(),
            children: Vec::new(),
            lexeme: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn lexeme(&self) -> Option<&Lexeme> {
        self.lexeme.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Attach lexemes to leaves, left to right.
    ///
    /// A leaf takes the next lexeme only if its symbol is that lexeme's kind; otherwise the
    /// leaf stays bare and the lexeme waits for the next leaf. Returns how many were attached.
    pub fn attach_lexemes(&mut self, lexemes: &[Lexeme]) -> usize {
        let mut cursor = 0;
        self.attach(lexemes, &mut cursor);
        cursor
    }

    fn attach(&mut self, lexemes: &[Lexeme], cursor: &mut usize) {
        if self.is_leaf() {
            if let Some(lexeme) = lexemes.get(*cursor) {
                if lexeme.kind() == self.symbol {
                    self.lexeme = Some(lexeme.clone());
                    *cursor += 1;
                }
            }
            return;
        }
        for child in &mut self.children {
            child.attach(lexemes, cursor);
        }
    }

    /// Leaves, left to right.
    pub fn leaves(&self) -> Vec<&SyntaxNode> {
        self.pre_order().into_iter().filter(|n| n.is_leaf()).collect()
    }

    /// Leaf symbols left to right, without the empty symbol.
    pub fn frontier(&self, grammar: &Grammar) -> Vec<&str> {
        self.leaves()
            .into_iter()
            .map(SyntaxNode::symbol)
            .filter(|symbol| !grammar.is_empty_symbol(symbol))
            .collect()
    }

    pub fn pre_order(&self) -> Vec<&SyntaxNode> {
        let mut nodes = Vec::new();
        self.visit_pre(&mut |node| nodes.push(node));
        nodes
    }

    pub fn post_order(&self) -> Vec<&SyntaxNode> {
        let mut nodes = Vec::new();
        self.visit_post(&mut |node| nodes.push(node));
        nodes
    }

    pub fn visit_pre<'a>(&'a self, visitor: &mut impl FnMut(&'a SyntaxNode)) {
        visitor(self);
        for child in &self.children {
            child.visit_pre(visitor);
        }
    }

    pub fn visit_post<'a>(&'a self, visitor: &mut impl FnMut(&'a SyntaxNode)) {
        for child in &self.children {
            child.visit_post(visitor);
        }
        visitor(self);
    }

    /// Nodes labeled `symbol`, in pre-order. With `max_depth`, nodes deeper than that are
    /// not searched; the root is depth 0, so `Some(0)` looks at the root alone and only
    /// `None` is unbounded.
    pub fn find_all(&self, symbol: &str, max_depth: Option<usize>) -> Vec<&SyntaxNode> {
        let mut found = Vec::new();
        self.find_into(symbol, max_depth, 0, &mut found);
        found
    }

    fn find_into<'a>(
        &'a self,
        symbol: &str,
        max_depth: Option<usize>,
        depth: usize,
        found: &mut Vec<&'a SyntaxNode>,
    ) {
        if max_depth.is_some_and(|max| depth > max) {
            return;
        }
        if self.symbol == symbol {
            found.push(self);
        }
        for child in &self.children {
            child.find_into(symbol, max_depth, depth + 1, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weakprec::grammar::GrammarConfig;
    use crate::weakprec::token::{Token, TokenClass};
    use std::rc::Rc;

    fn productions(rules: &[(&str, &str)]) -> Vec<Production> {
        rules
            .iter()
            .map(|(head, body)| Production::parse(head, body))
            .collect()
    }

    fn sum_derivation() -> Vec<Production> {
        productions(&[
            ("E", "M F"),
            ("F", "+ M F"),
            ("F", "ε"),
            ("M", "P N"),
            ("N", "ε"),
            ("P", "v"),
            ("M", "P N"),
            ("N", "ε"),
            ("P", "v"),
        ])
    }

    fn build_owned(derivation: &[Production], grammar: &Grammar) -> Result<SyntaxNode, TreeError> {
        let refs: Vec<&Production> = derivation.iter().collect();
        build(&refs, grammar)
    }

    #[test]
    fn test_build_sum() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let tree = build_owned(&sum_derivation(), &grammar).unwrap();

        assert_eq!(tree.symbol(), "E");
        assert_eq!(tree.frontier(&grammar), vec!["v", "+", "v"]);
        let leaves: Vec<&str> = tree.leaves().iter().map(|n| n.symbol()).collect();
        assert_eq!(leaves, vec!["v", "ε", "+", "v", "ε", "ε"]);
    }

    #[test]
    fn test_traversal_orders() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let tree = build_owned(&productions(&[
            ("E", "M F"),
            ("F", "ε"),
            ("M", "P N"),
            ("N", "ε"),
            ("P", "v"),
        ]), &grammar)
        .unwrap();

        let pre: Vec<&str> = tree.pre_order().iter().map(|n| n.symbol()).collect();
        assert_eq!(pre, vec!["E", "M", "P", "v", "N", "ε", "F", "ε"]);
        let post: Vec<&str> = tree.post_order().iter().map(|n| n.symbol()).collect();
        assert_eq!(post, vec!["v", "P", "ε", "N", "M", "ε", "F", "E"]);
    }

    #[test]
    fn test_find_all_respects_depth() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let tree = build_owned(&sum_derivation(), &grammar).unwrap();

        assert_eq!(tree.find_all("M", None).len(), 2);
        assert_eq!(tree.find_all("M", Some(1)).len(), 1);
        assert_eq!(tree.find_all("v", Some(2)).len(), 0);
        assert_eq!(tree.find_all("E", Some(0)).len(), 1);
        assert!(tree.find_all("M", Some(0)).is_empty());
    }

    #[test]
    fn test_attach_lexemes_by_kind() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let mut tree = build_owned(&sum_derivation(), &grammar).unwrap();

        let v = Rc::new(Token::new(TokenClass::Reserved, "v"));
        let plus = Rc::new(Token::new(TokenClass::Operator, "+"));
        let lexemes = vec![
            Lexeme::new("v", 0, 0, Rc::clone(&v)),
            Lexeme::new("+", 0, 1, plus),
            Lexeme::new("v", 0, 2, v),
        ];
        assert_eq!(tree.attach_lexemes(&lexemes), 3);

        let columns: Vec<Option<usize>> = tree
            .leaves()
            .iter()
            .map(|leaf| leaf.lexeme().map(|l| l.column()))
            .collect();
        assert_eq!(
            columns,
            vec![Some(0), None, Some(1), Some(2), None, None]
        );
    }

    #[test]
    fn test_empty_derivation() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        assert_eq!(build(&[], &grammar).unwrap_err(), TreeError::EmptyDerivation);
    }

    #[test]
    fn test_exhausted_derivation() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let err = build_owned(&productions(&[("E", "M F")]), &grammar).unwrap_err();
        assert_eq!(
            err,
            TreeError::Exhausted {
                symbol: "F".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_order_derivation() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let err = build_owned(&productions(&[("E", "M F"), ("M", "P N")]), &grammar).unwrap_err();
        assert_eq!(
            err,
            TreeError::Mismatch {
                expected: "F".to_string(),
                found: "M".to_string()
            }
        );
    }

    #[test]
    fn test_unconsumed_derivation() {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let mut derivation = productions(&[
            ("E", "M F"),
            ("F", "ε"),
            ("M", "P N"),
            ("N", "ε"),
            ("P", "v"),
        ]);
        derivation.push(Production::parse("P", "v"));
        let err = build_owned(&derivation, &grammar).unwrap_err();
        assert_eq!(err, TreeError::Unconsumed { remaining: 1 });
    }
}
