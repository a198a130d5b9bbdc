// Base Extractor Types
//
// The symbol inventory data model and its wire format. Field names serialize in
// camelCase, general kinds serialize as their numeric code, and TypeScript hints
// serialize as `typescript.*` strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-run extraction settings
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// `languageId` written into every code snippet
    pub language_id: String,
    /// Suffix duplicate qualified names with `#2`, `#3`, ...
    pub disambiguate_duplicates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            language_id: "typescript".to_string(),
            disambiguate_duplicates: true,
        }
    }
}

/// General symbol kinds, numbered as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CodeSymbolKind {
    File = 0,
    Module = 1,
    Namespace = 2,
    Package = 3,
    Class = 4,
    Method = 5,
    Property = 6,
    Field = 7,
    Constructor = 8,
    Enum = 9,
    Interface = 10,
    Function = 11,
    Variable = 12,
    Constant = 13,
    String = 14,
    Number = 15,
    Boolean = 16,
    Array = 17,
    Object = 18,
    Key = 19,
    Null = 20,
    EnumMember = 21,
    Struct = 22,
    Event = 23,
    Operator = 24,
    TypeParameter = 25,
}

impl CodeSymbolKind {
    const ALL: [CodeSymbolKind; 26] = [
        CodeSymbolKind::File,
        CodeSymbolKind::Module,
        CodeSymbolKind::Namespace,
        CodeSymbolKind::Package,
        CodeSymbolKind::Class,
        CodeSymbolKind::Method,
        CodeSymbolKind::Property,
        CodeSymbolKind::Field,
        CodeSymbolKind::Constructor,
        CodeSymbolKind::Enum,
        CodeSymbolKind::Interface,
        CodeSymbolKind::Function,
        CodeSymbolKind::Variable,
        CodeSymbolKind::Constant,
        CodeSymbolKind::String,
        CodeSymbolKind::Number,
        CodeSymbolKind::Boolean,
        CodeSymbolKind::Array,
        CodeSymbolKind::Object,
        CodeSymbolKind::Key,
        CodeSymbolKind::Null,
        CodeSymbolKind::EnumMember,
        CodeSymbolKind::Struct,
        CodeSymbolKind::Event,
        CodeSymbolKind::Operator,
        CodeSymbolKind::TypeParameter,
    ];
}

impl From<CodeSymbolKind> for u8 {
    fn from(kind: CodeSymbolKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for CodeSymbolKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CodeSymbolKind::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("unknown code symbol kind: {}", value))
    }
}

impl fmt::Display for CodeSymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeSymbolKind::File => "file",
            CodeSymbolKind::Module => "module",
            CodeSymbolKind::Namespace => "namespace",
            CodeSymbolKind::Package => "package",
            CodeSymbolKind::Class => "class",
            CodeSymbolKind::Method => "method",
            CodeSymbolKind::Property => "property",
            CodeSymbolKind::Field => "field",
            CodeSymbolKind::Constructor => "constructor",
            CodeSymbolKind::Enum => "enum",
            CodeSymbolKind::Interface => "interface",
            CodeSymbolKind::Function => "function",
            CodeSymbolKind::Variable => "variable",
            CodeSymbolKind::Constant => "constant",
            CodeSymbolKind::String => "string",
            CodeSymbolKind::Number => "number",
            CodeSymbolKind::Boolean => "boolean",
            CodeSymbolKind::Array => "array",
            CodeSymbolKind::Object => "object",
            CodeSymbolKind::Key => "key",
            CodeSymbolKind::Null => "null",
            CodeSymbolKind::EnumMember => "enumMember",
            CodeSymbolKind::Struct => "struct",
            CodeSymbolKind::Event => "event",
            CodeSymbolKind::Operator => "operator",
            CodeSymbolKind::TypeParameter => "typeParameter",
        };
        write!(f, "{}", name)
    }
}

/// TypeScript-specific classification of an extracted symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypescriptCodeType {
    #[serde(rename = "typescript.function")]
    Function,
    #[serde(rename = "typescript.class")]
    Class,
    #[serde(rename = "typescript.interface")]
    Interface,
    #[serde(rename = "typescript.classMethod")]
    ClassMethod,
    #[serde(rename = "typescript.classArrowFunction")]
    ClassArrowFunction,
    #[serde(rename = "typescript.arrowFunction")]
    ArrowFunction,
    #[serde(rename = "typescript.typeAlias")]
    TypeAlias,
}

impl TypescriptCodeType {
    /// Human-readable label
    pub fn title(&self) -> &'static str {
        match self {
            TypescriptCodeType::Function => "Function",
            TypescriptCodeType::Class => "Class",
            TypescriptCodeType::Interface => "Interface",
            TypescriptCodeType::ClassMethod => "Class Method",
            TypescriptCodeType::ClassArrowFunction => "Class Arrow Function",
            TypescriptCodeType::ArrowFunction => "Arrow Function",
            TypescriptCodeType::TypeAlias => "Type Alias",
        }
    }
}

/// Label for an optional hint (`"Unknown"` when absent)
pub fn title_for_code_type(hint: Option<TypescriptCodeType>) -> &'static str {
    hint.map(|h| h.title()).unwrap_or("Unknown")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub language_id: String,
    pub code: String,
}

/// Target end of a dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSymbolDependencyWithFileInformation {
    pub code_symbol_name: String,
    pub file_path: String,
}

/// Edges going out of one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSymbolDependencies {
    pub code_symbol_name: String,
    pub code_symbol_kind: CodeSymbolKind,
    pub edges: Vec<CodeSymbolDependencyWithFileInformation>,
}

/// One extracted symbol (a node of the dependency graph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSymbolInformation {
    /// Qualified name, e.g. `src.user.UserService.load`
    pub symbol_name: String,
    pub symbol_kind: CodeSymbolKind,
    /// 1-based, inclusive
    pub symbol_start_line: u32,
    pub symbol_end_line: u32,
    pub code_snippet: CodeSnippet,
    pub extra_symbol_hint: Option<TypescriptCodeType>,
    pub dependencies: Vec<CodeSymbolDependencies>,
    pub fs_file_path: String,
    pub original_file_path: String,
    pub working_directory: String,
    pub display_name: String,
    pub original_name: String,
    pub original_symbol_name: String,
}

/// Inventory of one file, as produced by batch extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCodeSymbolInformation {
    pub working_directory: String,
    pub file_path: String,
    pub code_symbols: Vec<CodeSymbolInformation>,
}

/// `{"output": [...]}` envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub output: Vec<CodeSymbolInformation>,
}

impl ExtractionOutput {
    pub fn new(output: Vec<CodeSymbolInformation>) -> Self {
        Self { output }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
