//! Shared helpers for tree snapshot tests.
#![allow(dead_code, unused_imports)]

pub use borm_syntax::{collect_bad, parse, tokenize, Position, SyntaxKind, SyntaxTree};
use borm_syntax::NodeId;

/// Formats the tree built from `source` for snapshot testing.
///
/// One line per node: `Kind@start..end "value"`, with `!` after the kind of
/// a bad node and its diagnostics on the following lines.
pub fn dump(source: &str) -> String {
    let tree = parse("test.borm", source);
    let mut output = String::new();
    format_node(&tree, tree.root(), &mut output, 0);
    output
}

/// Lists `(kind, message)` for every diagnostic in pre-order.
pub fn diagnostics(source: &str) -> Vec<(SyntaxKind, String)> {
    let tree = parse("test.borm", source);
    collect_bad(&tree)
        .into_iter()
        .flat_map(|id| {
            let node = tree.node(id);
            node.diagnostics()
                .iter()
                .map(move |message| (node.kind(), message.clone()))
        })
        .collect()
}

/// Renders [`diagnostics`] one per line.
pub fn render_diagnostics(source: &str) -> String {
    diagnostics(source)
        .into_iter()
        .map(|(kind, message)| format!("{kind}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_node(tree: &SyntaxTree, id: NodeId, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    let node = tree.node(id);
    let bad = if node.is_bad() { "!" } else { "" };
    out.push_str(&format!(
        "{indent}{}{bad}@{} {:?}\n",
        node.kind(),
        node.span(),
        node.value()
    ));
    for message in node.diagnostics() {
        out.push_str(&format!("{indent}  ! {message}\n"));
    }
    for &child in node.children() {
        format_node(tree, child, out, depth + 1);
    }
}
