//! Symbol resolution against a [`Project`]
//!
//! Identifiers resolve to one of three shapes: a module-scope declaration (or a
//! member of a module-scope class), a local binding, or an import alias that
//! has to be followed to find what it refers to. Fully-qualified names of
//! declarations quote the declaring file's extensionless path:
//! `"/ws/src/user".UserService.load`.

use super::errors::ResolveError;
use super::scope::{class_members, ExportEntry, ImportBinding, ImportedName};
use super::syntax::{declarator_names, field_text, node_text, pattern_names};
use super::{Project, SourceFile};
use std::collections::HashSet;
use tracing::trace;
use tree_sitter::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSymbol {
    /// Module-scope declaration (`chain == [Name]`) or class member
    /// (`chain == [Class, member]`)
    Declared {
        stem: String,
        chain: Vec<String>,
        file_path: String,
    },
    /// Parameter, block-scoped variable or other non-module binding
    Local { name: String, file_path: String },
    /// Import binding, possibly with a member accessed through it
    Alias {
        name: String,
        file_path: String,
        binding: ImportBinding,
        member: Option<String>,
    },
}

impl ResolvedSymbol {
    pub fn is_alias(&self) -> bool {
        matches!(self, ResolvedSymbol::Alias { .. })
    }

    /// File the symbol is declared in (for aliases, the importing file)
    pub fn file_path(&self) -> &str {
        match self {
            ResolvedSymbol::Declared { file_path, .. }
            | ResolvedSymbol::Local { file_path, .. }
            | ResolvedSymbol::Alias { file_path, .. } => file_path,
        }
    }
}

/// One declaration an alias leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `None` for targets without a name of their own (a whole module, an
    /// unknown member)
    pub fully_qualified_name: Option<String>,
    pub file_path: Option<String>,
}

/// `"<stem>".A.B`
pub fn quoted_name(stem: &str, chain: &[String]) -> String {
    format!("\"{}\".{}", stem, chain.join("."))
}

/// The oracle the dependency pass asks about identifiers
pub trait SymbolResolver {
    fn source_file(&self, path: &str) -> Option<&SourceFile>;

    /// Resolve an identifier-like node of `file`; `None` when it names nothing
    /// the resolver knows (globals, members of unknown objects)
    fn resolve_symbol(
        &self,
        file: &SourceFile,
        node: Node<'_>,
    ) -> Result<Option<ResolvedSymbol>, ResolveError>;

    /// Follow an alias to its declarations; `None` if `symbol` is not an alias
    fn resolve_alias(
        &self,
        symbol: &ResolvedSymbol,
    ) -> Result<Option<Vec<Declaration>>, ResolveError>;

    fn fully_qualified_name(&self, symbol: &ResolvedSymbol) -> String {
        match symbol {
            ResolvedSymbol::Declared { stem, chain, .. } => quoted_name(stem, chain),
            ResolvedSymbol::Local { name, .. } | ResolvedSymbol::Alias { name, .. } => {
                name.clone()
            }
        }
    }
}

impl SymbolResolver for Project {
    fn source_file(&self, path: &str) -> Option<&SourceFile> {
        self.get_source_file(path)
    }

    fn resolve_symbol(
        &self,
        file: &SourceFile,
        node: Node<'_>,
    ) -> Result<Option<ResolvedSymbol>, ResolveError> {
        ensure_in_file(file, node)?;
        let name = node_text(node, file.content());
        let symbol = match node.kind() {
            "identifier" | "shorthand_property_identifier" => {
                if is_local_binding(node, name, file.content()) {
                    Some(ResolvedSymbol::Local {
                        name: name.to_string(),
                        file_path: file.path().to_string(),
                    })
                } else {
                    resolve_module_name(file, name)
                }
            }
            "type_identifier" => resolve_module_name(file, name),
            "property_identifier" | "private_property_identifier" => {
                resolve_member(file, node, name)
            }
            _ => None,
        };
        trace!("{} '{}' -> {:?}", node.kind(), name, symbol);
        Ok(symbol)
    }

    fn resolve_alias(
        &self,
        symbol: &ResolvedSymbol,
    ) -> Result<Option<Vec<Declaration>>, ResolveError> {
        let ResolvedSymbol::Alias {
            file_path,
            binding,
            member,
            ..
        } = symbol
        else {
            return Ok(None);
        };

        let mut active = HashSet::new();
        let targets = self.follow_binding(file_path, binding, &mut active, 0)?;
        let declarations = targets
            .into_iter()
            .map(|target| match target {
                Target::Symbol {
                    stem,
                    mut chain,
                    file_path,
                } => {
                    if let Some(member) = member {
                        let is_member = chain.len() == 1
                            && self
                                .get_source_file(&file_path)
                                .is_some_and(|f| f.scope().class_has_member(&chain[0], member));
                        if !is_member {
                            return Declaration {
                                fully_qualified_name: None,
                                file_path: Some(file_path),
                            };
                        }
                        chain.push(member.clone());
                    }
                    Declaration {
                        fully_qualified_name: Some(quoted_name(&stem, &chain)),
                        file_path: Some(file_path),
                    }
                }
                Target::Module { file_path } => Declaration {
                    fully_qualified_name: None,
                    file_path: Some(file_path),
                },
            })
            .collect();
        Ok(Some(declarations))
    }
}

enum Target {
    Symbol {
        stem: String,
        chain: Vec<String>,
        file_path: String,
    },
    Module {
        file_path: String,
    },
}

/// `(file, export name)` pairs on the re-export chain currently followed
type ActivePath = HashSet<(String, String)>;

impl Project {
    fn follow_binding(
        &self,
        from_path: &str,
        binding: &ImportBinding,
        active: &mut ActivePath,
        depth: usize,
    ) -> Result<Vec<Target>, ResolveError> {
        // Unloaded or package module: nothing to follow
        let Some(module) = self.resolve_module(from_path, &binding.specifier) else {
            return Ok(Vec::new());
        };
        match &binding.imported {
            ImportedName::Namespace => Ok(vec![Target::Module {
                file_path: module.path().to_string(),
            }]),
            ImportedName::Default => self.follow_export(module, "default", active, depth + 1, false),
            ImportedName::Named(name) => self.follow_export(module, name, active, depth + 1, false),
        }
    }

    fn follow_export(
        &self,
        file: &SourceFile,
        name: &str,
        active: &mut ActivePath,
        depth: usize,
        via_star: bool,
    ) -> Result<Vec<Target>, ResolveError> {
        let limit = self.options().max_alias_depth;
        if depth > limit {
            return Err(ResolveError::AliasDepthExceeded {
                name: name.to_string(),
                path: file.path().to_string(),
                limit,
            });
        }
        // Only exports on the chain being followed can form a cycle; a module
        // reached again through another branch is searched again
        let key = (file.path().to_string(), name.to_string());
        if !active.insert(key.clone()) {
            // A star re-export loop just means the name is not there
            if via_star {
                return Ok(Vec::new());
            }
            return Err(ResolveError::AliasCycle {
                name: name.to_string(),
                path: file.path().to_string(),
            });
        }
        let targets = self.follow_export_entry(file, name, active, depth);
        active.remove(&key);
        targets
    }

    fn follow_export_entry(
        &self,
        file: &SourceFile,
        name: &str,
        active: &mut ActivePath,
        depth: usize,
    ) -> Result<Vec<Target>, ResolveError> {
        let scope = file.scope();
        match scope.export(name) {
            Some(ExportEntry::Local(local)) => self.follow_local(file, local, active, depth),
            Some(ExportEntry::AnonymousDefault) => Ok(vec![Target::Symbol {
                stem: file.stem().to_string(),
                chain: vec!["default".to_string()],
                file_path: file.path().to_string(),
            }]),
            Some(ExportEntry::Reexport(binding)) => {
                self.follow_binding(file.path(), binding, active, depth)
            }
            // `export *` never forwards a default export
            None if name == "default" => Ok(Vec::new()),
            None => {
                for specifier in scope.star_exports() {
                    let Some(module) = self.resolve_module(file.path(), specifier) else {
                        continue;
                    };
                    let targets = self.follow_export(module, name, active, depth + 1, true)?;
                    if !targets.is_empty() {
                        return Ok(targets);
                    }
                }
                Ok(Vec::new())
            }
        }
    }

    fn follow_local(
        &self,
        file: &SourceFile,
        local: &str,
        active: &mut ActivePath,
        depth: usize,
    ) -> Result<Vec<Target>, ResolveError> {
        let scope = file.scope();
        let declarations = scope.declarations(local);
        if !declarations.is_empty() {
            return Ok(declarations
                .iter()
                .map(|_| Target::Symbol {
                    stem: file.stem().to_string(),
                    chain: vec![local.to_string()],
                    file_path: file.path().to_string(),
                })
                .collect());
        }
        // export { x } where x is itself imported
        match scope.import(local) {
            Some(binding) => self.follow_binding(file.path(), binding, active, depth),
            None => Ok(Vec::new()),
        }
    }
}

fn ensure_in_file(file: &SourceFile, node: Node<'_>) -> Result<(), ResolveError> {
    let mut root = node;
    while let Some(parent) = root.parent() {
        root = parent;
    }
    if root.id() == file.tree().root_node().id() {
        Ok(())
    } else {
        Err(ResolveError::ForeignNode {
            kind: node.kind().to_string(),
            start: node.start_byte(),
            end: node.end_byte(),
            path: file.path().to_string(),
        })
    }
}

fn resolve_module_name(file: &SourceFile, name: &str) -> Option<ResolvedSymbol> {
    let scope = file.scope();
    if scope.has_declaration(name) {
        return Some(ResolvedSymbol::Declared {
            stem: file.stem().to_string(),
            chain: vec![name.to_string()],
            file_path: file.path().to_string(),
        });
    }
    scope.import(name).map(|binding| ResolvedSymbol::Alias {
        name: name.to_string(),
        file_path: file.path().to_string(),
        binding: binding.clone(),
        member: None,
    })
}

/// Resolve `x` in `this.x`, `Class.x` and `imported.x`
fn resolve_member(file: &SourceFile, node: Node<'_>, member: &str) -> Option<ResolvedSymbol> {
    let parent = node.parent()?;
    if parent.kind() != "member_expression"
        || parent.child_by_field_name("property").map(|p| p.id()) != Some(node.id())
    {
        return None;
    }
    let object = parent.child_by_field_name("object")?;
    let source = file.content();
    let scope = file.scope();

    match object.kind() {
        "this" => {
            let class = enclosing_class(node)?;
            let class_name = field_text(class, "name", source)?;
            if scope.class_has_member(class_name, member) {
                Some(declared_member(file, class_name, member))
            } else if class_members(class, source).iter().any(|m| m == member) {
                Some(ResolvedSymbol::Local {
                    name: member.to_string(),
                    file_path: file.path().to_string(),
                })
            } else {
                None
            }
        }
        "identifier" => {
            let object_name = node_text(object, source);
            if is_local_binding(object, object_name, source) {
                return None;
            }
            if scope.class_has_member(object_name, member) {
                return Some(declared_member(file, object_name, member));
            }
            let binding = scope.import(object_name)?;
            let symbol = match binding.imported {
                ImportedName::Namespace => ResolvedSymbol::Alias {
                    name: member.to_string(),
                    file_path: file.path().to_string(),
                    binding: ImportBinding {
                        specifier: binding.specifier.clone(),
                        imported: ImportedName::Named(member.to_string()),
                    },
                    member: None,
                },
                _ => ResolvedSymbol::Alias {
                    name: member.to_string(),
                    file_path: file.path().to_string(),
                    binding: binding.clone(),
                    member: Some(member.to_string()),
                },
            };
            Some(symbol)
        }
        _ => None,
    }
}

fn declared_member(file: &SourceFile, class_name: &str, member: &str) -> ResolvedSymbol {
    ResolvedSymbol::Declared {
        stem: file.stem().to_string(),
        chain: vec![class_name.to_string(), member.to_string()],
        file_path: file.path().to_string(),
    }
}

/// Class whose `this` a node sees (plain functions rebind `this`)
fn enclosing_class(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => return Some(ancestor),
            "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function" => return None,
            _ => {}
        }
        current = ancestor.parent();
    }
    None
}

/// Whether `name` at `node` is bound by an enclosing non-module scope
fn is_local_binding(node: Node<'_>, name: &str, source: &str) -> bool {
    let mut current = node.parent();
    while let Some(scope) = current {
        if scope.kind() == "program" {
            return false;
        }
        if binds_name(scope, name, source) {
            return true;
        }
        current = scope.parent();
    }
    false
}

fn binds_name(scope: Node<'_>, name: &str, source: &str) -> bool {
    let mut names = Vec::new();
    match scope.kind() {
        "function_declaration"
        | "generator_function_declaration"
        | "function_expression"
        | "function"
        | "generator_function"
        | "arrow_function"
        | "method_definition" => {
            if let Some(parameters) = scope.child_by_field_name("parameters") {
                pattern_names(parameters, source, &mut names);
            }
            // x => ...
            if let Some(parameter) = scope.child_by_field_name("parameter") {
                pattern_names(parameter, source, &mut names);
            }
            // Named function expressions see their own name
            if matches!(scope.kind(), "function_expression" | "function" | "generator_function") {
                names.extend(field_text(scope, "name", source));
            }
            // `var` anywhere in the body is hoisted to the function
            if let Some(body) = scope.child_by_field_name("body") {
                hoisted_vars(body, source, &mut names);
            }
        }
        "statement_block" | "class_static_block" => block_names(scope, source, &mut names),
        // Every case of a switch shares one block scope
        "switch_body" => {
            let mut cursor = scope.walk();
            for case in scope.named_children(&mut cursor) {
                block_names(case, source, &mut names);
            }
        }
        "for_in_statement" => {
            if let Some(left) = scope.child_by_field_name("left") {
                pattern_names(left, source, &mut names);
            }
        }
        "for_statement" => {
            if let Some(initializer) = scope.child_by_field_name("initializer") {
                names.extend(declarator_names(initializer, source));
            }
        }
        "catch_clause" => {
            if let Some(parameter) = scope.child_by_field_name("parameter") {
                pattern_names(parameter, source, &mut names);
            }
        }
        _ => {}
    }
    names.contains(&name)
}

/// Names declared by the direct statements of a block (or switch case)
fn block_names<'s>(block: Node<'_>, source: &'s str, names: &mut Vec<&'s str>) {
    let mut cursor = block.walk();
    for statement in block.named_children(&mut cursor) {
        match statement.kind() {
            "lexical_declaration" | "variable_declaration" => {
                names.extend(declarator_names(statement, source));
            }
            "function_declaration" | "generator_function_declaration" | "class_declaration" => {
                names.extend(field_text(statement, "name", source));
            }
            _ => {}
        }
    }
}

/// `var` declarations under `node`, not descending into nested functions
fn hoisted_vars<'s>(node: Node<'_>, source: &'s str, names: &mut Vec<&'s str>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "variable_declaration" => names.extend(declarator_names(child, source)),
            "function_declaration"
            | "generator_function_declaration"
            | "function_expression"
            | "function"
            | "generator_function"
            | "arrow_function"
            | "method_definition"
            | "class_declaration"
            | "class" => {}
            _ => hoisted_vars(child, source, names),
        }
    }
}
