//! Symbol classification
//!
//! Decides whether a node is an extractable symbol and, if so, its general
//! kind, its TypeScript hint and the name it is extracted under. Rules are
//! checked in a fixed precedence: classes, methods, function declarations,
//! arrow functions, factory-initialised variables, interfaces, type aliases.

use super::helpers::{has_modifier, unwrap_expression};
use crate::extractors::base::{BaseExtractor, CodeSymbolKind, TypescriptCodeType};
use crate::project::syntax::member_name;
use tree_sitter::Node;

/// Ancestors that make an arrow function an inner helper rather than a symbol
const ARROW_EXCLUDING_ANCESTORS: &[&str] = &[
    "arrow_function",
    "function_declaration",
    "generator_function_declaration",
];

const CLASS_KINDS: &[&str] = &["class_declaration", "abstract_class_declaration", "class"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: CodeSymbolKind,
    pub hint: TypescriptCodeType,
    /// Local name as written in the source
    pub name: String,
    /// Class whose name joins the qualified name (methods, class arrows)
    pub enclosing_class: Option<String>,
}

impl Classification {
    fn new(kind: CodeSymbolKind, hint: TypescriptCodeType, name: String) -> Self {
        Self {
            kind,
            hint,
            name,
            enclosing_class: None,
        }
    }

    fn in_class(mut self, class: Option<String>) -> Self {
        self.enclosing_class = class;
        self
    }
}

/// Classify a node; `None` means it is not extracted
pub fn classify(base: &BaseExtractor, node: Node) -> Option<Classification> {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" => {
            let name = base.get_field_text(&node, "name")?;
            Some(Classification::new(
                CodeSymbolKind::Class,
                TypescriptCodeType::Class,
                name,
            ))
        }
        "method_definition" => classify_method(base, node),
        "function_declaration" | "generator_function_declaration" => {
            let name = base.get_field_text(&node, "name")?;
            Some(Classification::new(
                CodeSymbolKind::Function,
                TypescriptCodeType::Function,
                name,
            ))
        }
        "arrow_function" => classify_arrow(base, node),
        "variable_declarator" => classify_factory_variable(base, node),
        "interface_declaration" => {
            let name = base.get_field_text(&node, "name")?;
            Some(Classification::new(
                CodeSymbolKind::Interface,
                TypescriptCodeType::Interface,
                name,
            ))
        }
        "type_alias_declaration" => {
            let name = base.get_field_text(&node, "name")?;
            Some(Classification::new(
                CodeSymbolKind::TypeParameter,
                TypescriptCodeType::TypeAlias,
                name,
            ))
        }
        _ => None,
    }
}

fn classify_method(base: &BaseExtractor, node: Node) -> Option<Classification> {
    if has_modifier(node, "get") || has_modifier(node, "set") {
        return None;
    }
    let body = node.parent().filter(|p| p.kind() == "class_body")?;
    let class = body.parent()?;
    let class_name = base.get_field_text(&class, "name")?;

    let name = member_name(node, &base.content)?;
    if name == "constructor" {
        return None;
    }
    Some(
        Classification::new(
            CodeSymbolKind::Method,
            TypescriptCodeType::ClassMethod,
            name.to_string(),
        )
        .in_class(Some(class_name)),
    )
}

fn classify_arrow(base: &BaseExtractor, node: Node) -> Option<Classification> {
    if base.find_parent_of_types(&node, ARROW_EXCLUDING_ANCESTORS).is_some() {
        return None;
    }
    let name = arrow_name(base, node)?;

    match base.find_parent_of_types(&node, &["class_body"]) {
        Some(body) => {
            let class_name = body
                .parent()
                .filter(|class| CLASS_KINDS.contains(&class.kind()))
                .and_then(|class| base.get_field_text(&class, "name"));
            Some(
                Classification::new(
                    CodeSymbolKind::Function,
                    TypescriptCodeType::ClassArrowFunction,
                    name,
                )
                .in_class(class_name),
            )
        }
        None => Some(Classification::new(
            CodeSymbolKind::Function,
            TypescriptCodeType::ArrowFunction,
            name,
        )),
    }
}

/// Name an arrow function borrows from its immediate parent
fn arrow_name(base: &BaseExtractor, node: Node) -> Option<String> {
    let parent = node.parent()?;
    match parent.kind() {
        // const name = () => ...
        "variable_declarator" => parent
            .child_by_field_name("name")
            .filter(|name| name.kind() == "identifier")
            .map(|name| base.get_node_text(&name)),
        // class field: name = () => ...
        "public_field_definition" | "field_definition" => {
            member_name(parent, &base.content).map(str::to_string)
        }
        // name = () => ...
        "assignment_expression" => parent
            .child_by_field_name("left")
            .filter(|left| left.kind() == "identifier")
            .map(|left| base.get_node_text(&left)),
        // { name: () => ... }
        "pair" => parent
            .child_by_field_name("key")
            .filter(|key| key.kind() == "property_identifier")
            .map(|key| base.get_node_text(&key)),
        // name(() => ...) and new Name(() => ...): the callee names the callback
        "arguments" => {
            let call = parent.parent()?;
            let callee = match call.kind() {
                "call_expression" => call.child_by_field_name("function"),
                "new_expression" => call.child_by_field_name("constructor"),
                _ => None,
            }?;
            (callee.kind() == "identifier").then(|| base.get_node_text(&callee))
        }
        _ => None,
    }
}

fn classify_factory_variable(base: &BaseExtractor, node: Node) -> Option<Classification> {
    let name = node
        .child_by_field_name("name")
        .filter(|name| name.kind() == "identifier")?;
    let value = node.child_by_field_name("value")?;
    if value.kind() == "arrow_function" {
        return None;
    }
    if unwrap_expression(value).kind() != "call_expression" {
        return None;
    }
    Some(Classification::new(
        CodeSymbolKind::Function,
        TypescriptCodeType::Function,
        base.get_node_text(&name),
    ))
}
