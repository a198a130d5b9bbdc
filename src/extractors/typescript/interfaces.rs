//! Interface and type alias extraction
//!
//! Both are top-level only. The snippet is the full declaration text and
//! neither has executable bodies, so they carry no dependencies.

use super::classify::classify;
use super::declarations::top_level_of_kinds;
use super::TypeScriptExtractor;
use crate::extractors::base::{CodeSymbolInformation, SymbolOptions};
use tracing::debug;
use tree_sitter::Node;

pub(super) fn extract_type_aliases(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Vec<CodeSymbolInformation> {
    extract_declarations(extractor, root, "type_alias_declaration", "type")
}

pub(super) fn extract_interfaces(
    extractor: &mut TypeScriptExtractor,
    root: Node,
) -> Vec<CodeSymbolInformation> {
    extract_declarations(extractor, root, "interface_declaration", "interface")
}

fn extract_declarations(
    extractor: &mut TypeScriptExtractor,
    root: Node,
    node_kind: &str,
    keyword: &str,
) -> Vec<CodeSymbolInformation> {
    let mut symbols = Vec::new();
    for node in top_level_of_kinds(root, &[node_kind]) {
        let Some(classification) = classify(extractor.base(), node) else {
            continue;
        };
        let qualified = extractor.base().qualified_name(&[classification.name.as_str()]);
        let symbol_name = extractor.base_mut().claim_name(&qualified);

        debug!("{} {} extracted", keyword, symbol_name);
        symbols.push(extractor.base().create_symbol(
            &node,
            SymbolOptions {
                symbol_name,
                display_name: format!("{} {}", keyword, classification.name),
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
