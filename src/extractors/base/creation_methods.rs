// Record creation methods for BaseExtractor

use tree_sitter::Node;

use super::extractor::BaseExtractor;
use super::types::{
    CodeSnippet, CodeSymbolDependencies, CodeSymbolInformation, CodeSymbolKind,
    TypescriptCodeType,
};

/// What a language pass knows about a symbol before it becomes a record
#[derive(Debug, Clone)]
pub struct SymbolOptions {
    /// Claimed qualified name
    pub symbol_name: String,
    /// Name as written in the source
    pub name: String,
    pub kind: CodeSymbolKind,
    pub hint: Option<TypescriptCodeType>,
    pub display_name: String,
    pub snippet: String,
    pub dependencies: Vec<CodeSymbolDependencies>,
}

impl BaseExtractor {
    /// Create a symbol record spanning `node`
    pub fn create_symbol(&self, node: &Node, options: SymbolOptions) -> CodeSymbolInformation {
        let start_pos = node.start_position();
        let end_pos = node.end_position();

        CodeSymbolInformation {
            symbol_name: options.symbol_name,
            symbol_kind: options.kind,
            symbol_start_line: (start_pos.row + 1) as u32,
            symbol_end_line: (end_pos.row + 1) as u32,
            code_snippet: CodeSnippet {
                language_id: self.config.language_id.clone(),
                code: options.snippet,
            },
            extra_symbol_hint: options.hint,
            dependencies: options.dependencies,
            fs_file_path: self.file_path.clone(),
            original_file_path: self.original_file_path.clone(),
            working_directory: self.workspace_root.clone(),
            display_name: options.display_name,
            original_name: options.name.clone(),
            original_symbol_name: options.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::ExtractionConfig;
    use tree_sitter::Parser;

    #[test]
    fn test_create_symbol_uses_one_based_lines() {
        let content = "\n\nfunction f() {\n  return 1;\n}\n";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .unwrap();
        let tree = parser.parse(content, None).unwrap();
        let function = tree.root_node().named_child(0).unwrap();

        let base = BaseExtractor::new(
            "typescript".to_string(),
            "/ws/a.ts",
            "/orig/a.ts".to_string(),
            "/ws".to_string(),
            content.to_string(),
            ExtractionConfig::default(),
        );
        let symbol = base.create_symbol(
            &function,
            SymbolOptions {
                symbol_name: "a.f".to_string(),
                name: "f".to_string(),
                kind: CodeSymbolKind::Function,
                hint: Some(TypescriptCodeType::Function),
                display_name: "f()".to_string(),
                snippet: "{\n  return 1;\n}".to_string(),
                dependencies: Vec::new(),
            },
        );

        assert_eq!(symbol.symbol_start_line, 3);
        assert_eq!(symbol.symbol_end_line, 5);
        assert_eq!(symbol.fs_file_path, "/ws/a.ts");
        assert_eq!(symbol.original_file_path, "/orig/a.ts");
        assert_eq!(symbol.working_directory, "/ws");
        assert_eq!(symbol.code_snippet.language_id, "typescript");
        assert_eq!(symbol.original_symbol_name, "f");
    }
}
