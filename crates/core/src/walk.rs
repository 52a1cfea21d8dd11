//! Depth-first doctree traversal with enter/leave callbacks.

use crate::doctree::Node;

/// What the walker should do after entering a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visit {
    /// Descend into the node's children.
    #[default]
    Continue,
    /// Do not descend; `leave` is still called for the node.
    SkipChildren,
}

/// Callbacks invoked by [`walk`] in document order.
pub trait Visitor {
    /// Called before a node's children are visited.
    fn enter(&mut self, node: &Node) -> Visit;

    /// Called after a node's children were visited (or skipped).
    fn leave(&mut self, node: &Node);
}

/// Walks `node` and its subtree, calling `enter` in pre-order and `leave`
/// in post-order.
pub fn walk<V: Visitor + ?Sized>(node: &Node, visitor: &mut V) {
    if visitor.enter(node) == Visit::Continue {
        for child in node.children() {
            walk(child, visitor);
        }
    }
    visitor.leave(node);
}
