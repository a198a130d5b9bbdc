//! Helper functions for TypeScript extractor
//!
//! Small node inspections shared by the classifier and the extraction passes.

use tree_sitter::Node;

/// Check if a node has a modifier token of the given kind
///
/// Useful for checking for 'async', 'static', 'get', 'set', etc. Named
/// children never match, so a method called `get` is not a getter.
pub(super) fn has_modifier(node: Node, modifier_kind: &str) -> bool {
    node.children(&mut node.walk())
        .any(|child| !child.is_named() && child.kind() == modifier_kind)
}

/// Strip wrappers that do not change which expression produces the value:
/// `await`, parentheses, `as`/`satisfies` casts and `!` assertions
pub(super) fn unwrap_expression(node: Node) -> Node {
    let mut current = node;
    while matches!(
        current.kind(),
        "await_expression"
            | "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression"
    ) {
        match current.named_child(0) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}
