// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor {
    /// Find nodes by type, in document order (the node itself included)
    pub fn find_nodes_by_type<'a>(&self, node: &Node<'a>, node_type: &str) -> Vec<Node<'a>> {
        self.find_nodes_by_types(node, &[node_type])
    }

    /// Find nodes whose kind is any of `types`, in document order
    pub fn find_nodes_by_types<'a>(&self, node: &Node<'a>, types: &[&str]) -> Vec<Node<'a>> {
        let mut nodes = Vec::new();
        self.find_nodes_by_types_recursive(node, types, &mut nodes);
        nodes
    }

    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    fn find_nodes_by_types_recursive<'a>(
        &self,
        node: &Node<'a>,
        types: &[&str],
        nodes: &mut Vec<Node<'a>>,
    ) {
        if types.contains(&node.kind()) {
            nodes.push(*node);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.find_nodes_by_types_recursive(&child, types, nodes);
        }
    }

    /// Find the closest ancestor whose kind is any of `types`
    pub fn find_parent_of_types<'a>(&self, node: &Node<'a>, types: &[&str]) -> Option<Node<'a>> {
        let mut current = node.parent();
        while let Some(parent) = current {
            if types.contains(&parent.kind()) {
                return Some(parent);
            }
            current = parent.parent();
        }
        None
    }

    /// Get children of type
    pub fn get_children_of_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        let children = node
            .children(&mut cursor)
            .filter(|child| child.kind() == child_type)
            .collect();
        children
    }
}

#[cfg(test)]
mod tests {
    use crate::extractors::base::{BaseExtractor, ExtractionConfig};
    use tree_sitter::Parser;

    #[test]
    fn test_find_nodes_and_parents() {
        let content = "function outer() { const f = () => inner(() => 1); }";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(content, None).unwrap();
        let base = BaseExtractor::new(
            "typescript".to_string(),
            "/ws/a.ts",
            "/ws/a.ts".to_string(),
            "/ws".to_string(),
            content.to_string(),
            ExtractionConfig::default(),
        );

        let root = tree.root_node();
        let arrows = base.find_nodes_by_type(&root, "arrow_function");
        assert_eq!(arrows.len(), 2);
        assert_eq!(base.get_node_text(&arrows[1]), "() => 1");

        let outer = base
            .find_parent_of_types(&arrows[1], &["function_declaration"])
            .unwrap();
        assert_eq!(base.get_field_text(&outer, "name").as_deref(), Some("outer"));
        assert!(base.find_parent_of_types(&outer, &["class_body"]).is_none());

        let blocks = base.get_children_of_type(&outer, "statement_block");
        assert_eq!(blocks.len(), 1);
    }
}
