//! Collection of malformed nodes.

use crate::syntax::{NodeId, SyntaxTree};

/// Returns every bad node of `tree` in pre-order.
///
/// A bad node does not hide its children: a malformed function still reports
/// a malformed declaration inside its body.
#[must_use]
pub fn collect_bad(tree: &SyntaxTree) -> Vec<NodeId> {
    tree.preorder()
        .filter(|&id| tree.node(id).is_bad())
        .collect()
}
