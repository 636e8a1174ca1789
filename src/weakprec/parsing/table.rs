use super::relations::{PrecedenceRelations, Relation};
use crate::weakprec::grammar::Grammar;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// What the parser does for a (stack top, lookahead) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Shift,
    Reduce,
    Undefined,
}

impl Action {
    /// Single-character form used by the grid rendering.
    pub fn symbol(&self) -> char {
        match self {
            Action::Shift => 'S',
            Action::Reduce => 'R',
            Action::Undefined => '-',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Shift => "shift",
            Action::Reduce => "reduce",
            Action::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// Shift/reduce table keyed by (stack top kind, lookahead kind).
///
/// Columns are the terminals, the empty symbol when the grammar has one, and the end
/// marker. Rows are the non-terminals followed by every column symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionTable {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<Action>>,
    #[serde(skip)]
    row_index: HashMap<String, usize>,
    #[serde(skip)]
    column_index: HashMap<String, usize>,
}

impl ActionTable {
    pub fn build(grammar: &Grammar, relations: &PrecedenceRelations, end_marker: &str) -> Self {
        let mut columns: Vec<String> = grammar.terminals().to_vec();
        columns.extend(grammar.empty_symbol().map(str::to_string));
        columns.push(end_marker.to_string());

        let mut rows: Vec<String> = grammar.non_terminals().to_vec();
        rows.extend(columns.iter().cloned());

        let cells: Vec<Vec<Action>> = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|column| {
                        if relations.shifts(row, column) {
                            Action::Shift
                        } else if relations.holds(row, Relation::Takes, column) {
                            Action::Reduce
                        } else {
                            Action::Undefined
                        }
                    })
                    .collect()
            })
            .collect();

        let index = |symbols: &[String]| -> HashMap<String, usize> {
            symbols
                .iter()
                .enumerate()
                .map(|(i, s)| (s.clone(), i))
                .collect()
        };

        let table = ActionTable {
            row_index: index(&rows[..]),
            column_index: index(&columns[..]),
            rows,
            columns,
            cells,
        };
        debug!(
            rows = table.rows.len(),
            columns = table.columns.len(),
            "built action table"
        );
        table
    }

    /// The action for `row` on top of the stack and `column` as lookahead. Symbols outside
    /// the table are undefined.
    pub fn action(&self, row: &str, column: &str) -> Action {
        match (self.row_index.get(row), self.column_index.get(column)) {
            (Some(&r), Some(&c)) => self.cells[r][c],
            _ => Action::Undefined,
        }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cells(&self) -> &[Vec<Action>] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weakprec::grammar::GrammarConfig;

    fn arithmetic_table() -> ActionTable {
        let grammar = GrammarConfig::arithmetic().build().unwrap();
        let relations = PrecedenceRelations::compute(&grammar, "E", "$");
        ActionTable::build(&grammar, &relations, "$")
    }

    #[test]
    fn test_shape() {
        let table = arithmetic_table();
        assert_eq!(table.columns(), &["+", "x", "(", ")", "v", "ε", "$"]);
        assert_eq!(
            table.rows(),
            &["E", "F", "M", "N", "P", "+", "x", "(", ")", "v", "ε", "$"]
        );
        assert!(table.cells().iter().all(|row| row.len() == 7));
    }

    #[test]
    fn test_cells() {
        let table = arithmetic_table();
        assert_eq!(table.action("$", "v"), Action::Shift);
        assert_eq!(table.action("E", ")"), Action::Shift);
        assert_eq!(table.action("P", "ε"), Action::Shift);
        assert_eq!(table.action("v", "ε"), Action::Reduce);
        assert_eq!(table.action("F", "$"), Action::Reduce);
        assert_eq!(table.action("v", "+"), Action::Undefined);
        assert_eq!(table.action("$", ")"), Action::Undefined);
    }

    #[test]
    fn test_unknown_symbols_are_undefined() {
        let table = arithmetic_table();
        assert_eq!(table.action("q", "v"), Action::Undefined);
        assert_eq!(table.action("E", "q"), Action::Undefined);
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(arithmetic_table(), arithmetic_table());
    }
}
