//! Small tree-sitter helpers shared by the module scope indexer and the resolver

use tree_sitter::Node;

/// Node text as a borrowed slice of the source (empty if the node is not
/// valid UTF-8 in this source)
pub(crate) fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

pub(crate) fn field_text<'s>(node: Node<'_>, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field)
        .map(|child| node_text(child, source))
}

/// Strip one layer of string quotes
pub(crate) fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}

/// Check for an anonymous token child such as `default`, `get`, `static`
pub(crate) fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Name of a class member (method, field, signature)
///
/// Computed names like `[Symbol.iterator]` have no identifier and yield `None`.
pub(crate) fn member_name<'s>(node: Node<'_>, source: &'s str) -> Option<&'s str> {
    let name_node = node
        .child_by_field_name("name")
        .or_else(|| node.child_by_field_name("property"))?;
    match name_node.kind() {
        "property_identifier" | "private_property_identifier" | "identifier" => {
            Some(node_text(name_node, source))
        }
        "string" => Some(unquote(node_text(name_node, source))),
        _ => None,
    }
}

/// Collect the names bound by a binding pattern or parameter
pub(crate) fn pattern_names<'s>(node: Node<'_>, source: &'s str, names: &mut Vec<&'s str>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            names.push(node_text(node, source));
        }
        "required_parameter" | "optional_parameter" => {
            if let Some(pattern) = node.child_by_field_name("pattern") {
                pattern_names(pattern, source, names);
            }
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                pattern_names(left, source, names);
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                pattern_names(value, source, names);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" | "formal_parameters" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                pattern_names(child, source, names);
            }
        }
        _ => {}
    }
}

/// Names declared by a `let`/`const`/`var` statement
pub(crate) fn declarator_names<'s>(node: Node<'_>, source: &'s str) -> Vec<&'s str> {
    let mut names = Vec::new();
    let mut cursor = node.walk();
    for declarator in node.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            pattern_names(name, source, &mut names);
        }
    }
    names
}
