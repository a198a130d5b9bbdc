//! Module scope index
//!
//! Built once per source file. Records what the module declares at its top
//! level, what it imports and what it exports, so identifier resolution never
//! has to rescan the tree.

use super::syntax::{declarator_names, field_text, has_token, member_name, node_text, unquote};
use std::collections::HashMap;
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Class,
    Function,
    Interface,
    TypeAlias,
    Enum,
    Variable,
    Namespace,
}

/// One module-scope declaration of a name (a name may have several: overloads,
/// interface merging, class + interface merging)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub kind: DeclarationKind,
    /// Member names, for classes
    pub members: Vec<String>,
}

/// What an import binding refers to in the imported module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    Named(String),
    Default,
    /// `import * as ns` / `export * as ns`
    Namespace,
}

impl ImportedName {
    fn from_export_name(name: &str) -> Self {
        if name == "default" {
            ImportedName::Default
        } else {
            ImportedName::Named(name.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub imported: ImportedName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEntry {
    /// Exports a module-scope name of this file
    Local(String),
    /// `export default <anonymous expression>`
    AnonymousDefault,
    /// `export { a as b } from '...'`, `export * as ns from '...'`
    Reexport(ImportBinding),
}

#[derive(Debug, Clone, Default)]
pub struct ModuleScope {
    declarations: HashMap<String, Vec<ScopeEntry>>,
    imports: HashMap<String, ImportBinding>,
    exports: HashMap<String, ExportEntry>,
    star_exports: Vec<String>,
}

impl ModuleScope {
    /// Index the top-level statements of a program node
    pub fn index(root: Node<'_>, source: &str) -> Self {
        let mut scope = ModuleScope::default();
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            match statement.kind() {
                "import_statement" => scope.index_import(statement, source),
                "export_statement" => scope.index_export(statement, source),
                _ => {
                    scope.index_declaration(statement, source);
                }
            }
        }
        scope
    }

    pub fn declarations(&self, name: &str) -> &[ScopeEntry] {
        self.declarations
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_declaration(&self, name: &str) -> bool {
        !self.declarations(name).is_empty()
    }

    /// Whether `class_name` is a class of this module declaring `member`
    pub fn class_has_member(&self, class_name: &str, member: &str) -> bool {
        self.declarations(class_name).iter().any(|entry| {
            entry.kind == DeclarationKind::Class && entry.members.iter().any(|m| m == member)
        })
    }

    pub fn import(&self, local_name: &str) -> Option<&ImportBinding> {
        self.imports.get(local_name)
    }

    pub fn export(&self, exported_name: &str) -> Option<&ExportEntry> {
        self.exports.get(exported_name)
    }

    pub fn star_exports(&self) -> &[String] {
        &self.star_exports
    }

    /// Every module specifier this file imports from or re-exports
    pub fn module_specifiers(&self) -> impl Iterator<Item = &str> {
        let reexports = self.exports.values().filter_map(|entry| match entry {
            ExportEntry::Reexport(binding) => Some(binding.specifier.as_str()),
            _ => None,
        });
        self.imports
            .values()
            .map(|binding| binding.specifier.as_str())
            .chain(reexports)
            .chain(self.star_exports.iter().map(String::as_str))
    }

    fn declare(&mut self, name: &str, kind: DeclarationKind, members: Vec<String>) -> Vec<String> {
        self.declarations
            .entry(name.to_string())
            .or_default()
            .push(ScopeEntry { kind, members });
        vec![name.to_string()]
    }

    /// Record a declaration statement and return the names it binds
    fn index_declaration(&mut self, node: Node<'_>, source: &str) -> Vec<String> {
        let kind = match node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => {
                let Some(name) = field_text(node, "name", source) else {
                    return Vec::new();
                };
                let members = class_members(node, source);
                return self.declare(name, DeclarationKind::Class, members);
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut bound = Vec::new();
                for name in declarator_names(node, source) {
                    bound.extend(self.declare(name, DeclarationKind::Variable, Vec::new()));
                }
                return bound;
            }
            "ambient_declaration" | "expression_statement" => {
                let mut bound = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    bound.extend(self.index_declaration(child, source));
                }
                return bound;
            }
            "function_declaration"
            | "generator_function_declaration"
            | "function_signature"
            | "function_expression"
            | "function"
            | "generator_function" => DeclarationKind::Function,
            "interface_declaration" => DeclarationKind::Interface,
            "type_alias_declaration" => DeclarationKind::TypeAlias,
            "enum_declaration" => DeclarationKind::Enum,
            "internal_module" | "module" => DeclarationKind::Namespace,
            _ => return Vec::new(),
        };

        match node.child_by_field_name("name") {
            // `declare module 'pkg'` is named by a string and binds nothing
            Some(name) if name.kind() != "string" => {
                self.declare(node_text(name, source), kind, Vec::new())
            }
            _ => Vec::new(),
        }
    }

    fn index_import(&mut self, node: Node<'_>, source: &str) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_clause" => {
                    let Some(specifier) = field_text(node, "source", source).map(unquote) else {
                        return;
                    };
                    self.index_import_clause(child, specifier, source);
                }
                // import fs = require('fs')
                "import_require_clause" => {
                    let specifier = field_text(child, "source", source).map(unquote);
                    let local = child
                        .named_child(0)
                        .filter(|n| n.kind() == "identifier");
                    if let (Some(specifier), Some(local)) = (specifier, local) {
                        self.imports.insert(
                            node_text(local, source).to_string(),
                            ImportBinding {
                                specifier: specifier.to_string(),
                                imported: ImportedName::Namespace,
                            },
                        );
                    }
                }
                _ => {}
            }
        }
    }

    fn index_import_clause(&mut self, clause: Node<'_>, specifier: &str, source: &str) {
        let mut bind = |local: &str, imported: ImportedName| {
            self.imports.insert(
                local.to_string(),
                ImportBinding {
                    specifier: specifier.to_string(),
                    imported,
                },
            );
        };

        let mut cursor = clause.walk();
        for child in clause.named_children(&mut cursor) {
            match child.kind() {
                // import Foo from '...'
                "identifier" => bind(node_text(child, source), ImportedName::Default),
                // import * as ns from '...'
                "namespace_import" => {
                    let mut inner = child.walk();
                    let local = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "identifier");
                    if let Some(local) = local {
                        bind(node_text(local, source), ImportedName::Namespace);
                    }
                }
                // import { a, b as c } from '...'
                "named_imports" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        let Some(name) = field_text(spec, "name", source).map(unquote) else {
                            continue;
                        };
                        let local = field_text(spec, "alias", source).unwrap_or(name);
                        bind(local, ImportedName::from_export_name(name));
                    }
                }
                _ => {}
            }
        }
    }

    fn index_export(&mut self, node: Node<'_>, source: &str) {
        let is_default = has_token(node, "default");
        let specifier = field_text(node, "source", source).map(unquote);

        // export [default] class/function/const ...
        if let Some(declaration) = node.child_by_field_name("declaration") {
            let names = self.index_declaration(declaration, source);
            if is_default {
                let entry = names
                    .into_iter()
                    .next()
                    .map(ExportEntry::Local)
                    .unwrap_or(ExportEntry::AnonymousDefault);
                self.exports.insert("default".to_string(), entry);
            } else {
                for name in names {
                    self.exports.insert(name.clone(), ExportEntry::Local(name));
                }
            }
            return;
        }

        // export default <expression>
        if let Some(value) = node.child_by_field_name("value") {
            let entry = match value.kind() {
                "identifier" => ExportEntry::Local(node_text(value, source).to_string()),
                _ => self
                    .index_declaration(value, source)
                    .into_iter()
                    .next()
                    .map(ExportEntry::Local)
                    .unwrap_or(ExportEntry::AnonymousDefault),
            };
            self.exports.insert("default".to_string(), entry);
            return;
        }

        let mut has_clause = false;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                // export { a, b as c } [from '...']
                "export_clause" => {
                    has_clause = true;
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let Some(name) = field_text(spec, "name", source).map(unquote) else {
                            continue;
                        };
                        let exported = field_text(spec, "alias", source)
                            .map(unquote)
                            .unwrap_or(name);
                        let entry = match specifier {
                            Some(specifier) => ExportEntry::Reexport(ImportBinding {
                                specifier: specifier.to_string(),
                                imported: ImportedName::from_export_name(name),
                            }),
                            None => ExportEntry::Local(name.to_string()),
                        };
                        self.exports.insert(exported.to_string(), entry);
                    }
                }
                // export * as ns from '...'
                "namespace_export" => {
                    has_clause = true;
                    let alias = child.named_child(0).map(|n| unquote(node_text(n, source)));
                    if let (Some(alias), Some(specifier)) = (alias, specifier) {
                        self.exports.insert(
                            alias.to_string(),
                            ExportEntry::Reexport(ImportBinding {
                                specifier: specifier.to_string(),
                                imported: ImportedName::Namespace,
                            }),
                        );
                    }
                }
                _ => {}
            }
        }

        // export * from '...'
        if !has_clause {
            if let Some(specifier) = specifier {
                self.star_exports.push(specifier.to_string());
            }
        }
    }
}

pub(crate) fn class_members(class: Node<'_>, source: &str) -> Vec<String> {
    let Some(body) = class.child_by_field_name("body") else {
        return Vec::new();
    };
    let mut members = Vec::new();
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        match member.kind() {
            "method_definition"
            | "method_signature"
            | "abstract_method_signature"
            | "public_field_definition"
            | "field_definition" => {
                if let Some(name) = member_name(member, source) {
                    members.push(name.to_string());
                }
            }
            _ => {}
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn index(source: &str) -> ModuleScope {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(source, None).unwrap();
        ModuleScope::index(tree.root_node(), source)
    }

    #[test]
    fn test_indexes_top_level_declarations() {
        let scope = index(
            r#"
class Service { run() {} private helper = () => 1; }
function boot() {}
interface Options { verbose: boolean }
type Id = string;
enum Mode { A, B }
const { left, right } = pair, total = 3;
"#,
        );
        assert_eq!(scope.declarations("Service")[0].kind, DeclarationKind::Class);
        assert!(scope.class_has_member("Service", "run"));
        assert!(scope.class_has_member("Service", "helper"));
        assert!(!scope.class_has_member("Service", "boot"));
        assert_eq!(scope.declarations("boot")[0].kind, DeclarationKind::Function);
        assert_eq!(scope.declarations("Options")[0].kind, DeclarationKind::Interface);
        assert_eq!(scope.declarations("Id")[0].kind, DeclarationKind::TypeAlias);
        assert_eq!(scope.declarations("Mode")[0].kind, DeclarationKind::Enum);
        assert!(scope.has_declaration("left"));
        assert!(scope.has_declaration("right"));
        assert!(scope.has_declaration("total"));
        assert!(!scope.has_declaration("pair"));
    }

    #[test]
    fn test_overloads_keep_every_declaration() {
        let scope = index(
            r#"
export function parse(input: string): number;
export function parse(input: number): number;
export function parse(input: any): number { return 0; }
"#,
        );
        assert_eq!(scope.declarations("parse").len(), 3);
        assert_eq!(
            scope.export("parse"),
            Some(&ExportEntry::Local("parse".to_string()))
        );
    }

    #[test]
    fn test_indexes_import_bindings() {
        let scope = index(
            r#"
import React, { useState, useEffect as effect } from 'react';
import * as util from './util';
import type { Config } from "../config";
"#,
        );
        assert_eq!(
            scope.import("React"),
            Some(&ImportBinding {
                specifier: "react".to_string(),
                imported: ImportedName::Default,
            })
        );
        assert_eq!(
            scope.import("effect").map(|b| &b.imported),
            Some(&ImportedName::Named("useEffect".to_string()))
        );
        assert_eq!(
            scope.import("util").map(|b| &b.imported),
            Some(&ImportedName::Namespace)
        );
        assert_eq!(
            scope.import("Config").map(|b| b.specifier.as_str()),
            Some("../config")
        );
        assert!(scope.import("useEffect").is_none());
    }

    #[test]
    fn test_indexes_exports_and_reexports() {
        let scope = index(
            r#"
const internal = 1;
export { internal as publicName };
export { helper, other as renamed } from './helpers';
export * from './everything';
export * as tools from './tools';
export default function main() {}
"#,
        );
        assert_eq!(
            scope.export("publicName"),
            Some(&ExportEntry::Local("internal".to_string()))
        );
        assert_eq!(
            scope.export("renamed"),
            Some(&ExportEntry::Reexport(ImportBinding {
                specifier: "./helpers".to_string(),
                imported: ImportedName::Named("other".to_string()),
            }))
        );
        assert_eq!(
            scope.export("tools"),
            Some(&ExportEntry::Reexport(ImportBinding {
                specifier: "./tools".to_string(),
                imported: ImportedName::Namespace,
            }))
        );
        assert_eq!(scope.star_exports(), &["./everything".to_string()]);
        assert_eq!(
            scope.export("default"),
            Some(&ExportEntry::Local("main".to_string()))
        );
        assert!(scope.has_declaration("main"));

        let mut specifiers: Vec<&str> = scope.module_specifiers().collect();
        specifiers.sort();
        assert_eq!(specifiers, vec!["./everything", "./helpers", "./helpers", "./tools"]);
    }

    #[test]
    fn test_anonymous_default_export() {
        let scope = index("export default () => 42;");
        assert_eq!(scope.export("default"), Some(&ExportEntry::AnonymousDefault));
    }
}
