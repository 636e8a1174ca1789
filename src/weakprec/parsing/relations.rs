//! Wirth–Weber precedence relations
//!
//!     `X = Y` when X and Y are adjacent in some body. `X < Z` when X sits right before a
//!     non-terminal that can begin with Z. `Z > Y` when Z can end a non-terminal that sits
//!     right before Y (or before a non-terminal that can begin with Y).
//!
//!     The end marker yields to everything the start symbol can begin with, and everything
//!     the start symbol can end with takes over the end marker.

use crate::weakprec::grammar::{Grammar, Production};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relation {
    /// `<`
    Yields,
    /// `=`
    Equal,
    /// `>`
    Takes,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Yields => "<",
            Relation::Equal => "=",
            Relation::Takes => ">",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `left relation right` fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelationEntry {
    pub left: String,
    pub relation: Relation,
    pub right: String,
}

impl fmt::Display for RelationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation, self.right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceRelations {
    /// Insertion order, deduplicated
    entries: Vec<RelationEntry>,
    index: HashSet<(String, Relation, String)>,
    left_sets: HashMap<String, Vec<String>>,
    right_sets: HashMap<String, Vec<String>>,
}

impl PrecedenceRelations {
    pub fn compute(grammar: &Grammar, start: &str, end_marker: &str) -> Self {
        let mut left_sets = HashMap::new();
        let mut right_sets = HashMap::new();
        for head in grammar.non_terminals() {
            left_sets.insert(head.clone(), closure(grammar, head, Production::first));
            right_sets.insert(head.clone(), closure(grammar, head, Production::last));
        }

        let mut relations = PrecedenceRelations {
            entries: Vec::new(),
            index: HashSet::new(),
            left_sets,
            right_sets,
        };

        for production in grammar.productions() {
            for pair in production.body().windows(2) {
                let (x, y) = (pair[0].as_str(), pair[1].as_str());
                relations.insert(x, Relation::Equal, y);

                if grammar.is_non_terminal(y) {
                    for z in relations.left_set(y).to_vec() {
                        relations.insert(x, Relation::Yields, &z);
                    }
                }

                if grammar.is_non_terminal(x) {
                    let followers = if grammar.is_non_terminal(y) {
                        relations.left_set(y).to_vec()
                    } else {
                        vec![y.to_string()]
                    };
                    for z in relations.right_set(x).to_vec() {
                        for w in &followers {
                            relations.insert(&z, Relation::Takes, w);
                        }
                    }
                }
            }
        }

        for z in relations.left_set(start).to_vec() {
            relations.insert(end_marker, Relation::Yields, &z);
        }
        for z in relations.right_set(start).to_vec() {
            relations.insert(&z, Relation::Takes, end_marker);
        }

        relations
    }

    fn insert(&mut self, left: &str, relation: Relation, right: &str) {
        let key = (left.to_string(), relation, right.to_string());
        if self.index.insert(key) {
            self.entries.push(RelationEntry {
                left: left.to_string(),
                relation,
                right: right.to_string(),
            });
        }
    }

    pub fn holds(&self, left: &str, relation: Relation, right: &str) -> bool {
        self.index
            .contains(&(left.to_string(), relation, right.to_string()))
    }

    /// Either `<` or `=`: the pair calls for a shift.
    pub fn shifts(&self, left: &str, right: &str) -> bool {
        self.holds(left, Relation::Yields, right) || self.holds(left, Relation::Equal, right)
    }

    /// Symbols a derivation of `symbol` can begin with. Empty for terminals.
    pub fn left_set(&self, symbol: &str) -> &[String] {
        self.left_sets.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }

    /// Symbols a derivation of `symbol` can end with. Empty for terminals.
    pub fn right_set(&self, symbol: &str) -> &[String] {
        self.right_sets.get(symbol).map(Vec::as_slice).unwrap_or_default()
    }

    /// Pairs that call for both a shift and a reduce. Empty for a weak precedence grammar.
    pub fn conflicts(&self) -> Vec<(String, String)> {
        let mut conflicts = Vec::new();
        for entry in &self.entries {
            if entry.relation == Relation::Takes && self.shifts(&entry.left, &entry.right) {
                conflicts.push((entry.left.clone(), entry.right.clone()));
            }
        }
        conflicts
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Leftmost (or rightmost, depending on `edge`) symbols reachable from `root`.
///
/// A production whose edge symbol is the head being expanded contributes nothing.
/// Non-terminals are expanded once per closure.
fn closure(grammar: &Grammar, root: &str, edge: fn(&Production) -> Option<&str>) -> Vec<String> {
    let mut set = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(root.to_string());
    expand(grammar, root, edge, &mut visited, &mut set);
    set
}

fn expand(
    grammar: &Grammar,
    symbol: &str,
    edge: fn(&Production) -> Option<&str>,
    visited: &mut HashSet<String>,
    set: &mut Vec<String>,
) {
    for production in grammar.productions_with_head(symbol) {
        let Some(next) = edge(production) else {
            continue;
        };
        if next == symbol {
            continue;
        }
        if !set.iter().any(|s| s == next) {
            set.push(next.to_string());
        }
        if grammar.is_non_terminal(next) && visited.insert(next.to_string()) {
            expand(grammar, next, edge, visited, set);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weakprec::grammar::GrammarConfig;

    fn arithmetic() -> PrecedenceRelations {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        PrecedenceRelations::compute(&grammar, "E", "$")
    }

    #[test]
    fn test_left_and_right_sets() {
        let relations = arithmetic();
        assert_eq!(relations.left_set("E"), &["M", "P", "(", "v"]);
        assert_eq!(relations.left_set("F"), &["+", "ε"]);
        assert_eq!(relations.right_set("E"), &["F", "ε"]);
        assert_eq!(relations.right_set("M"), &["N", "ε"]);
        assert_eq!(relations.right_set("P"), &[")", "v"]);
        assert!(relations.left_set("v").is_empty());
    }

    #[test]
    fn test_direct_recursion_is_skipped() {
        let grammar = GrammarConfig::program().build().unwrap();
        let relations = PrecedenceRelations::compute(&grammar, "<program>", "$");
        assert_eq!(
            relations.left_set("<declarations>"),
            &["<declaration>", "id"]
        );
        assert_eq!(
            relations.left_set("<expression>"),
            &["<term>", "<factor>", "(", "id", "num", "text"]
        );
        assert_eq!(relations.right_set("<statements>"), &["<statement>", ";"]);
    }

    #[test]
    fn test_indirect_recursion_terminates() {
        let grammar = Grammar::from_rules(&[("A", "B a"), ("B", "A b"), ("B", "c")], None).unwrap();
        let relations = PrecedenceRelations::compute(&grammar, "A", "$");
        assert_eq!(relations.left_set("A"), &["B", "A", "c"]);
        assert_eq!(relations.left_set("B"), &["A", "B", "c"]);
    }

    #[test]
    fn test_arithmetic_relations() {
        let relations = arithmetic();
        assert!(relations.holds("M", Relation::Equal, "F"));
        assert!(relations.holds("M", Relation::Yields, "+"));
        assert!(relations.holds("+", Relation::Yields, "v"));
        assert!(relations.holds("v", Relation::Takes, "ε"));
        assert!(relations.holds("N", Relation::Takes, "+"));
        assert!(relations.holds("ε", Relation::Takes, ")"));
        assert!(relations.holds("$", Relation::Yields, "v"));
        assert!(relations.holds("F", Relation::Takes, "$"));
        assert!(!relations.holds("$", Relation::Yields, ")"));
        assert!(relations.conflicts().is_empty());
    }

    #[test]
    fn test_program_grammar_has_no_conflicts() {
        let grammar = GrammarConfig::program().build().unwrap();
        let relations = PrecedenceRelations::compute(&grammar, "<program>", "$");
        assert_eq!(relations.conflicts(), Vec::<(String, String)>::new());
    }

    #[test]
    fn test_conflicting_grammar() {
        // `a` both precedes S directly and can end S before `a`
        let grammar = Grammar::from_rules(&[("S", "a S a"), ("S", "a")], None).unwrap();
        let relations = PrecedenceRelations::compute(&grammar, "S", "$");
        assert!(!relations.conflicts().is_empty());
    }
}
