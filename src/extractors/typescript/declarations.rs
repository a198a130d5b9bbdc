//! Top-level declaration walk
//!
//! Yields the declarations a module makes at its top level, looking through
//! `export` and `declare` wrappers, in source order.

use tree_sitter::Node;

/// Top-level declaration nodes of a program
pub(super) fn top_level_declarations<'a>(root: Node<'a>) -> Vec<Node<'a>> {
    let mut declarations = Vec::new();
    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        push_declaration(statement, &mut declarations);
    }
    declarations
}

fn push_declaration<'a>(node: Node<'a>, declarations: &mut Vec<Node<'a>>) {
    match node.kind() {
        "export_statement" => {
            if let Some(declaration) = node
                .child_by_field_name("declaration")
                .or_else(|| node.child_by_field_name("value"))
            {
                push_declaration(declaration, declarations);
            }
        }
        "ambient_declaration" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                push_declaration(child, declarations);
            }
        }
        _ => declarations.push(node),
    }
}

/// Top-level nodes of the given kinds
pub(super) fn top_level_of_kinds<'a>(root: Node<'a>, kinds: &[&str]) -> Vec<Node<'a>> {
    top_level_declarations(root)
        .into_iter()
        .filter(|node| kinds.contains(&node.kind()))
        .collect()
}

/// Declarators of top-level `const`/`let`/`var` statements
pub(super) fn top_level_declarators<'a>(root: Node<'a>) -> Vec<Node<'a>> {
    let mut declarators = Vec::new();
    for statement in top_level_of_kinds(root, &["lexical_declaration", "variable_declaration"]) {
        let mut cursor = statement.walk();
        declarators.extend(
            statement
                .named_children(&mut cursor)
                .filter(|child| child.kind() == "variable_declarator"),
        );
    }
    declarators
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    #[test]
    fn test_walk_looks_through_export_and_declare() {
        let source = r#"
export class A {}
declare class B {}
export function c() {}
function d() { function nested() {} }
export const e = make(), f = 1;
let g = 2;
import x from './x';
"#;
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        let root = tree.root_node();

        let classes = top_level_of_kinds(root, &["class_declaration"]);
        assert_eq!(classes.len(), 2);

        let functions = top_level_of_kinds(root, &["function_declaration"]);
        assert_eq!(functions.len(), 2);

        let names: Vec<&str> = top_level_declarators(root)
            .into_iter()
            .map(|d| d.child_by_field_name("name").unwrap().utf8_text(source.as_bytes()).unwrap())
            .collect();
        assert_eq!(names, vec!["e", "f", "g"]);
    }
}
