//! Hover information for Borm.

use std::fmt::Write;

use borm_syntax::{Position, Span, SyntaxNode, SyntaxTree};

use crate::catalog::Catalog;

/// Result of a hover request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The span of the hovered node. `None` when no node contains the
    /// position.
    pub span: Option<Span>,
}

/// Describes the node at `position`.
///
/// An exact match shows the node's kind and value, its diagnostics if it is
/// bad, and the catalog entry its value names. Otherwise the closest node is
/// described along with its one-based position.
pub fn hover(tree: &SyntaxTree, position: Position, catalog: &Catalog) -> HoverResult {
    let (id, matched) = tree.find_at(position);
    let node = tree.node(id);

    if !matched {
        let start = node.span().start;
        return HoverResult {
            contents: format!(
                "Closest node {} (line {}, column {})",
                describe(node),
                start.line + 1,
                start.column + 1
            ),
            span: None,
        };
    }

    let mut contents = describe(node);
    if node.is_bad() {
        contents.push('\n');
        for message in node.diagnostics() {
            let _ = write!(contents, "\n- {message}");
        }
    }
    if let Some(function) = catalog.find(node.value()) {
        let _ = write!(contents, "\n\n```borm\n{}\n```", function.definition());
        if !function.description.is_empty() {
            let _ = write!(contents, "\n\n{}", function.description);
        }
    }
    HoverResult {
        contents,
        span: Some(node.span()),
    }
}

fn describe(node: &SyntaxNode) -> String {
    if node.value().is_empty() {
        node.kind().to_string()
    } else {
        format!("{}: {}", node.kind(), node.value())
    }
}
