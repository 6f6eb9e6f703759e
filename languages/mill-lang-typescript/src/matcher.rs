//! Selection-driven node matching
//!
//! Every refactoring starts the same way: collect the nodes the selection
//! sits inside, keep the ones the refactoring recognises, and prefer the
//! innermost.

use crate::tree::{AstNode, NodeId, SyntaxTree};
use mill_foundation::Selection;

/// Innermost node containing `selection` that satisfies `predicate`
pub fn find_innermost<'a, F>(
    tree: &SyntaxTree<'a>,
    selection: &Selection,
    mut predicate: F,
) -> Option<NodeId>
where
    F: FnMut(NodeId, AstNode<'a>) -> bool,
{
    tree.nodes_containing(selection)
        .into_iter()
        .find(|&id| predicate(id, tree.node(id)))
}

/// Innermost candidate for which `extract` returns a target
///
/// Lets a strategy both filter and destructure a node in one pass.
pub fn find_map_innermost<'a, T, F>(
    tree: &SyntaxTree<'a>,
    selection: &Selection,
    mut extract: F,
) -> Option<T>
where
    F: FnMut(NodeId, AstNode<'a>) -> Option<T>,
{
    tree.nodes_containing(selection)
        .into_iter()
        .find_map(|id| extract(id, tree.node(id)))
}
