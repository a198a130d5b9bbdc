//! Class extraction
//!
//! Each named top-level class yields one record per method, followed by the
//! class record itself. The class record carries one edge per method so the
//! class node is connected to its methods even when no method calls another.

use super::classify::classify;
use super::declarations::top_level_of_kinds;
use super::relationships::collect_dependencies;
use super::TypeScriptExtractor;
use crate::extractors::base::{
    CodeSymbolDependencies, CodeSymbolDependencyWithFileInformation, CodeSymbolInformation,
    CodeSymbolKind, SymbolOptions,
};
use crate::project::ResolveError;
use tracing::debug;
use tree_sitter::Node;

pub(super) fn extract_classes(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Result<Vec<CodeSymbolInformation>, ResolveError> {
    let mut symbols = Vec::new();
    for class in top_level_of_kinds(root, &["class_declaration", "abstract_class_declaration"]) {
        extract_class(extractor, class, &mut symbols)?;
    }
    Ok(symbols)
}

fn extract_class(
    extractor: &mut TypeScriptExtractor,
    node: Node,
    symbols: &mut Vec<CodeSymbolInformation>,
) -> Result<(), ResolveError> {
    let Some(classification) = classify(extractor.base(), node) else {
        return Ok(());
    };
    let class_name = classification.name;

    let mut method_names = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let methods = extractor.base().get_children_of_type(&body, "method_definition");
        for method in methods {
            if let Some(symbol) = extract_method(extractor, method)? {
                method_names.push(symbol.symbol_name.clone());
                symbols.push(symbol);
            }
        }
    }

    let qualified = extractor.base().qualified_name(&[class_name.as_str()]);
    let symbol_name = extractor.base_mut().claim_name(&qualified);
    let file_path = extractor.base().file_path.clone();
    let dependencies = method_names
        .into_iter()
        .map(|method_name| CodeSymbolDependencies {
            code_symbol_name: symbol_name.clone(),
            code_symbol_kind: CodeSymbolKind::Function,
            edges: vec![CodeSymbolDependencyWithFileInformation {
                code_symbol_name: method_name,
                file_path: file_path.clone(),
            }],
        })
        .collect();

    debug!("Class {} extracted", symbol_name);
    let symbol = extractor.base().create_symbol(
        &node,
        SymbolOptions {
            symbol_name,
            display_name: format!("class {}", class_name),
            name: class_name,
            kind: classification.kind,
            hint: Some(classification.hint),
            snippet: String::new(),
            dependencies,
        },
    );
    symbols.push(symbol);
    Ok(())
}

fn extract_method(
    extractor: &mut TypeScriptExtractor,
    node: Node,
) -> Result<Option<CodeSymbolInformation>, ResolveError> {
    let Some(classification) = classify(extractor.base(), node) else {
        return Ok(None);
    };
    let class_name = classification.enclosing_class.unwrap_or_default();
    let qualified = extractor
        .base()
        .qualified_name(&[class_name.as_str(), classification.name.as_str()]);
    let symbol_name = extractor.base_mut().claim_name(&qualified);

    let body = node.child_by_field_name("body");
    let snippet = body
        .map(|body| extractor.base().get_node_text(&body))
        .unwrap_or_default();
    let dependencies = match body {
        Some(body) => collect_dependencies(extractor, body, &symbol_name)?,
        None => Vec::new(),
    };

    Ok(Some(extractor.base().create_symbol(
        &node,
        SymbolOptions {
            symbol_name,
            display_name: format!("{}()", classification.name),
            name: classification.name,
            kind: classification.kind,
            hint: Some(classification.hint),
            snippet,
            dependencies,
        },
    )))
}
