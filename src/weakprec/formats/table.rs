use crate::weakprec::grammar::Production;
use crate::weakprec::parsing::{ActionTable, PrecedenceRelations};
use crate::weakprec::token::Lexeme;

/// The action table as a grid: one row per stack symbol, `S`, `R` or `-` per lookahead.
pub fn table_to_grid(table: &ActionTable) -> String {
    let label_width = table
        .rows()
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);
    let cell_width = table
        .columns()
        .iter()
        .map(|column| column.chars().count())
        .max()
        .unwrap_or(1);

    let mut result = String::new();

    let mut header = format!("{:label_width$}", "");
    for column in table.columns() {
        header.push_str(&format!(" {:>cell_width$}", column));
    }
    result.push_str(header.trim_end());
    result.push('\n');

    for (row, cells) in table.rows().iter().zip(table.cells()) {
        let mut line = format!("{:<label_width$}", row);
        for action in cells {
            line.push_str(&format!(" {:>cell_width$}", action.symbol()));
        }
        result.push_str(line.trim_end());
        result.push('\n');
    }

    result
}

pub fn relations_to_lines(relations: &PrecedenceRelations) -> String {
    relations
        .iter()
        .map(|entry| format!("{}\n", entry))
        .collect()
}

pub fn derivation_to_lines(derivation: &[&Production]) -> String {
    derivation.iter().map(|p| format!("{}\n", p)).collect()
}

pub fn lexemes_to_lines(lexemes: &[Lexeme]) -> String {
    lexemes.iter().map(|l| format!("{}\n", l)).collect()
}
