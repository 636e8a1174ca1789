//! Treeviz formatter for syntax trees

use crate::weakprec::tree::SyntaxNode;

/// Render a tree with box-drawing connectors, one node per line.
///
/// Leaves that carry a lexeme show its text and 1-based position.
pub fn to_treeviz_str(root: &SyntaxNode) -> String {
    let mut result = String::new();
    result.push_str(&node_label(root));
    result.push('\n');
    append_children(&mut result, root.children(), "");
    result
}

fn node_label(node: &SyntaxNode) -> String {
    match node.lexeme() {
        Some(lexeme) => format!(
            "{} {:?} {}:{}",
            node.symbol(),
            lexeme.text(),
            lexeme.line() + 1,
            lexeme.column() + 1
        ),
        None => node.symbol().to_string(),
    }
}

fn append_node(result: &mut String, node: &SyntaxNode, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };
    result.push_str(&format!("{}{} {}\n", prefix, connector, node_label(node)));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    append_children(result, node.children(), &new_prefix);
}

fn append_children(result: &mut String, children: &[SyntaxNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, prefix, is_last);
    }
}
