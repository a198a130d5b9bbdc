//! Function extraction
//!
//! Three passes share this module: top-level function declarations, arrow
//! functions (scanned across the whole file), and top-level variables whose
//! initializer is a call (`const revisit = createCookie(...)`).

use super::classify::classify;
use super::declarations::{top_level_declarators, top_level_of_kinds};
use super::relationships::collect_dependencies;
use super::TypeScriptExtractor;
use crate::extractors::base::{CodeSymbolInformation, SymbolOptions};
use crate::project::ResolveError;
use tracing::debug;
use tree_sitter::Node;

/// Extract named top-level function declarations
pub(super) fn extract_functions(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Result<Vec<CodeSymbolInformation>, ResolveError> {
    let mut symbols = Vec::new();
    let functions = top_level_of_kinds(
        root,
        &["function_declaration", "generator_function_declaration"],
    );
    for node in functions {
        let Some(classification) = classify(extractor.base(), node) else {
            continue;
        };
        let qualified = extractor.base().qualified_name(&[classification.name.as_str()]);
        let symbol_name = extractor.base_mut().claim_name(&qualified);

        let body = node.child_by_field_name("body");
        let snippet = body
            .map(|body| extractor.base().get_node_text(&body))
            .unwrap_or_default();
        let dependencies = match body {
            Some(body) => collect_dependencies(extractor, body, &symbol_name)?,
            None => Vec::new(),
        };

        debug!("Function {} extracted", symbol_name);
        symbols.push(extractor.base().create_symbol(
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
        ));
    }
    Ok(symbols)
}

/// Extract qualifying arrow functions anywhere in the file
pub(super) fn extract_arrow_functions(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Result<Vec<CodeSymbolInformation>, ResolveError> {
    let mut symbols = Vec::new();
    let arrows = extractor.base().find_nodes_by_type(&root, "arrow_function");
    for node in arrows {
        let Some(classification) = classify(extractor.base(), node) else {
            continue;
        };
        let mut chain: Vec<&str> = Vec::new();
        if let Some(class_name) = classification.enclosing_class.as_deref() {
            chain.push(class_name);
        }
        chain.push(&classification.name);
        let qualified = extractor.base().qualified_name(&chain);
        let symbol_name = extractor.base_mut().claim_name(&qualified);

        // Block body or concise expression body
        let body = node.child_by_field_name("body");
        let snippet = body
            .map(|body| extractor.base().get_node_text(&body))
            .unwrap_or_default();
        let dependencies = match body {
            Some(body) => collect_dependencies(extractor, body, &symbol_name)?,
            None => Vec::new(),
        };

        debug!("Arrow function {} extracted", symbol_name);
        symbols.push(extractor.base().create_symbol(
            &node,
            SymbolOptions {
                symbol_name,
                display_name: format!("{} callback()", classification.name),
                name: classification.name.clone(),
                kind: classification.kind,
                hint: Some(classification.hint),
                snippet,
                dependencies,
            },
        ));
    }
    Ok(symbols)
}

/// Extract top-level variables initialised by a function call
///
/// The declarator text is the snippet. These records carry no dependencies.
pub(super) fn extract_factory_variables(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Vec<CodeSymbolInformation> {
    let mut symbols = Vec::new();
    for node in top_level_declarators(root) {
        let Some(classification) = classify(extractor.base(), node) else {
            continue;
        };
        let qualified = extractor.base().qualified_name(&[classification.name.as_str()]);
        let symbol_name = extractor.base_mut().claim_name(&qualified);

        debug!("Factory variable {} extracted", symbol_name);
        symbols.push(extractor.base().create_symbol(
            &node,
            SymbolOptions {
                symbol_name,
                display_name: format!("{}()", classification.name),
                snippet: extractor.base().get_node_text(&node),
                name: classification.name,
                kind: classification.kind,
                hint: Some(classification.hint),
                dependencies: Vec::new(),
            },
        ));
    }
    symbols
}
