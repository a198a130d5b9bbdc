// BaseExtractor implementation
//
// Per-file extraction context shared by the language passes: the file's
// paths, its module path relative to the workspace root, its content, and the
// registry that hands out qualified names.

use tracing::debug;
use tree_sitter::Node;

use super::naming::QualifiedNameRegistry;
use super::types::ExtractionConfig;
use crate::utils::{compose, module_path, paths};

pub struct BaseExtractor {
    pub language: String,
    /// Normalized path of the file being extracted (`fsFilePath`)
    pub file_path: String,
    /// Path reported back to the caller as `originalFilePath`
    pub original_file_path: String,
    pub workspace_root: String,
    /// Dotted module path of the file, e.g. `src.services.user`
    pub module_path: String,
    pub content: String,
    pub config: ExtractionConfig,
    names: QualifiedNameRegistry,
}

impl BaseExtractor {
    pub fn new(
        language: String,
        file_path: &str,
        original_file_path: String,
        workspace_root: String,
        content: String,
        config: ExtractionConfig,
    ) -> Self {
        let file_path = paths::normalize(file_path);
        let module_path = module_path(&workspace_root, &file_path);
        debug!(
            "BaseExtractor path: '{}' -> module '{}' (root '{}')",
            file_path, module_path, workspace_root
        );

        let names = QualifiedNameRegistry::new(config.disambiguate_duplicates);
        Self {
            language,
            file_path,
            original_file_path,
            workspace_root,
            module_path,
            content,
            config,
            names,
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Get field text safely
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }

    /// Module path followed by the given scope chain
    pub fn qualified_name(&self, chain: &[&str]) -> String {
        compose(std::iter::once(self.module_path.as_str()).chain(chain.iter().copied()))
    }

    /// Reserve a qualified name for a new record
    pub fn claim_name(&mut self, qualified_name: &str) -> String {
        self.names.claim(qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(root: &str, file: &str) -> BaseExtractor {
        BaseExtractor::new(
            "typescript".to_string(),
            file,
            file.to_string(),
            root.to_string(),
            "class A {}".to_string(),
            ExtractionConfig::default(),
        )
    }

    #[test]
    fn test_module_path_and_qualified_names() {
        let base = extractor("/ws", "/ws/src/services/user.ts");
        assert_eq!(base.module_path, "src.services.user");
        assert_eq!(
            base.qualified_name(&["UserService", "load"]),
            "src.services.user.UserService.load"
        );
    }

    #[test]
    fn test_windows_paths_are_normalized() {
        let base = extractor("C:\\ws", "C:\\ws\\src\\a.ts");
        assert_eq!(base.file_path, "C:/ws/src/a.ts");
        assert_eq!(base.module_path, "src.a");
    }

    #[test]
    fn test_claim_name_disambiguates() {
        let mut base = extractor("/ws", "/ws/a.ts");
        assert_eq!(base.claim_name("a.f"), "a.f");
        assert_eq!(base.claim_name("a.f"), "a.f#2");
    }
}
