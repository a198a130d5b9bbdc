//! A parsed source file and its module scope

use super::scope::ModuleScope;
use crate::language::{detect_language_from_path, get_tree_sitter_language};
use crate::utils::paths;
use anyhow::{bail, Context, Result};
use tree_sitter::{Parser, Tree};

pub struct SourceFile {
    path: String,
    stem: String,
    language: &'static str,
    content: String,
    tree: Tree,
    scope: ModuleScope,
}

impl SourceFile {
    /// Parse `content` as the file at `path` (the grammar follows the extension)
    pub fn parse(path: &str, content: String) -> Result<Self> {
        let path = paths::normalize(path);
        let Some(language) = detect_language_from_path(&path) else {
            bail!("Unsupported source file extension: {}", path);
        };

        let mut parser = Parser::new();
        parser
            .set_language(&get_tree_sitter_language(language)?)
            .with_context(|| format!("Failed to set parser language for {}", language))?;
        let tree = parser
            .parse(&content, None)
            .with_context(|| format!("Failed to parse {}", path))?;

        let scope = ModuleScope::index(tree.root_node(), &content);
        let stem = paths::source_stem(&path);

        Ok(Self {
            path,
            stem,
            language,
            content,
            tree,
            scope,
        })
    }

    /// Normalized absolute path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path without its extension, as it appears in fully-qualified names
    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn scope(&self) -> &ModuleScope {
        &self.scope
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_picks_grammar_from_extension() {
        let ts = SourceFile::parse("/ws/src/a.ts", "let x: number = 1;".to_string()).unwrap();
        assert_eq!(ts.language(), "typescript");
        assert_eq!(ts.stem(), "/ws/src/a");

        let tsx = SourceFile::parse("/ws/src/view.tsx", "const v = <div />;".to_string()).unwrap();
        assert_eq!(tsx.language(), "tsx");
        assert!(!tsx.tree().root_node().has_error());

        let js = SourceFile::parse("/ws/lib/util.mjs", "export function f() {}".to_string()).unwrap();
        assert_eq!(js.language(), "javascript");
        assert!(js.scope().has_declaration("f"));
    }

    #[test]
    fn test_parse_normalizes_path() {
        let file = SourceFile::parse("C:\\ws\\src\\..\\lib\\x.ts", String::new()).unwrap();
        assert_eq!(file.path(), "C:/ws/lib/x.ts");
        assert_eq!(file.stem(), "C:/ws/lib/x");
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        assert!(SourceFile::parse("/ws/readme.md", String::new()).is_err());
    }
}
