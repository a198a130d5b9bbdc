//! Dependency extraction
//!
//! Every identifier inside a call expression of an executable body is resolved,
//! followed through import aliases, and kept as an edge when it names a
//! declaration inside the workspace.

use super::workspace_filter::{classify_name, rewrite_internal, WorkspaceMembership};
use super::TypeScriptExtractor;
use crate::extractors::base::{
    CodeSymbolDependencies, CodeSymbolDependencyWithFileInformation, CodeSymbolKind,
};
use crate::project::{Declaration, ResolveError};
use tracing::{debug, trace};
use tree_sitter::Node;

/// Identifier-like node kinds a call expression can reference symbols through
const IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "property_identifier",
    "private_property_identifier",
    "shorthand_property_identifier",
    "type_identifier",
];

/// File path recorded when a declaration's file is not known
pub const UNKNOWN_FILE: &str = "<unknown>";

/// Collect the dependencies raised by one executable body
///
/// Edges keep discovery order and are not deduplicated: a call nested in
/// another call's arguments is seen once per enclosing call.
pub(super) fn collect_dependencies(
    extractor: &TypeScriptExtractor,
    body: Node,
    source_symbol_name: &str,
) -> Result<Vec<CodeSymbolDependencies>, ResolveError> {
    let base = extractor.base();
    let mut dependencies = Vec::new();

    for call in base.find_nodes_by_type(&body, "call_expression") {
        for identifier in base.find_nodes_by_types(&call, IDENTIFIER_KINDS) {
            if let Some(edge) = resolve_edge(extractor, identifier)? {
                dependencies.push(CodeSymbolDependencies {
                    code_symbol_name: source_symbol_name.to_string(),
                    code_symbol_kind: CodeSymbolKind::Function,
                    edges: vec![edge],
                });
            }
        }
    }

    debug!(
        "Dependencies of {}: {}",
        source_symbol_name,
        dependencies.len()
    );
    Ok(dependencies)
}

/// Dependencies of every block in the file, attributed to one symbol name
pub(super) fn collect_block_dependencies(
    extractor: &TypeScriptExtractor,
    root: Node,
    block_symbol_name: &str,
) -> Result<Vec<CodeSymbolDependencies>, ResolveError> {
    let mut dependencies = Vec::new();
    for block in extractor.base().find_nodes_by_type(&root, "statement_block") {
        dependencies.extend(
            collect_dependencies(extractor, block, block_symbol_name)?
                .into_iter()
                .filter(|dependency| !dependency.edges.is_empty()),
        );
    }
    Ok(dependencies)
}

fn resolve_edge(
    extractor: &TypeScriptExtractor,
    identifier: Node,
) -> Result<Option<CodeSymbolDependencyWithFileInformation>, ResolveError> {
    let resolver = extractor.resolver();
    let Some(symbol) = resolver.resolve_symbol(extractor.source_file(), identifier)? else {
        trace!(
            "No symbol for '{}'",
            extractor.base().get_node_text(&identifier)
        );
        return Ok(None);
    };

    let own = Declaration {
        fully_qualified_name: Some(resolver.fully_qualified_name(&symbol)),
        file_path: (!symbol.is_alias()).then(|| symbol.file_path().to_string()),
    };
    // Aliases take the last declaration that carries a name
    let target = match resolver.resolve_alias(&symbol)? {
        Some(declarations) => declarations
            .into_iter()
            .rev()
            .find(|declaration| declaration.fully_qualified_name.is_some())
            .unwrap_or(own),
        None => own,
    };
    let Some(fully_qualified_name) = target.fully_qualified_name else {
        return Ok(None);
    };

    let workspace_root = &extractor.base().workspace_root;
    match classify_name(&fully_qualified_name, workspace_root) {
        WorkspaceMembership::Internal { path, chain } => {
            let code_symbol_name = rewrite_internal(workspace_root, path, &chain);
            trace!("Edge to {} ({})", code_symbol_name, fully_qualified_name);
            Ok(Some(CodeSymbolDependencyWithFileInformation {
                code_symbol_name,
                file_path: target
                    .file_path
                    .unwrap_or_else(|| UNKNOWN_FILE.to_string()),
            }))
        }
        WorkspaceMembership::External => {
            trace!("External reference {}", fully_qualified_name);
            Ok(None)
        }
    }
}
