//! Position to node lookup.
//!
//! A linear walk over the tree. Nodes on a single line are tested by column;
//! taller nodes forward the query to each child whose lines include the
//! query line. When nothing contains the position, the last such child at
//! the top level of the walk is reported as the closest node.

use crate::syntax::{NodeId, Position, SyntaxTree};

/// Finds the node at `position`.
///
/// Returns the tightest node containing the position with `true`, or the
/// closest candidate with `false`.
#[must_use]
pub fn find_at(tree: &SyntaxTree, position: Position) -> (NodeId, bool) {
    search(tree, tree.root(), position)
}

impl SyntaxTree {
    /// Finds the node at `position`. See [`find_at`].
    #[must_use]
    pub fn find_at(&self, position: Position) -> (NodeId, bool) {
        find_at(self, position)
    }
}

fn search(tree: &SyntaxTree, id: NodeId, position: Position) -> (NodeId, bool) {
    let node = tree.node(id);
    let span = node.span();

    if span.is_on_line(position.line) {
        if span.start.column > position.column || position.column > span.end.column {
            return (id, false);
        }
        let tighter = node
            .children()
            .iter()
            .filter(|&&child| tree.node(child).span().contains(position))
            .find_map(|&child| match search(tree, child, position) {
                (found, true) => Some(found),
                (_, false) => None,
            });
        return (tighter.unwrap_or(id), true);
    }

    let mut closest = id;
    for &child in node.children() {
        if !tree.node(child).span().covers_line(position.line) {
            continue;
        }
        let (found, matched) = search(tree, child, position);
        if matched {
            return (found, true);
        }
        closest = child;
    }
    (closest, false)
}
