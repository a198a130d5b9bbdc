//! Language Support - Shared tree-sitter language configuration
//!
//! Every grammar the crate parses is selected here. The symbol extractor only
//! understands the TypeScript family, so this stays small: TypeScript, TSX and
//! plain JavaScript (which shares the node kinds the extractor relies on).

use anyhow::Result;

/// Extensions probed when a module specifier omits one, in probing order.
pub const MODULE_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts",
];

/// Get tree-sitter language parser for a given language name
///
/// Language names are the ones returned by [`detect_language_from_extension`].
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "typescript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "javascript" => Ok(tree_sitter_javascript::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: typescript, tsx, javascript",
            language
        )),
    }
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("tsx"),
        // JSX is part of the tree-sitter-javascript grammar
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        _ => None,
    }
}

/// Detect language from a file path (either separator style)
pub fn detect_language_from_path(file_path: &str) -> Option<&'static str> {
    let file_name = file_path.rsplit(['/', '\\']).next().unwrap_or(file_path);
    let (_, extension) = file_name.rsplit_once('.')?;
    detect_language_from_extension(extension)
}

/// Supported language names
pub fn supported_languages() -> Vec<&'static str> {
    vec!["typescript", "tsx", "javascript"]
}
