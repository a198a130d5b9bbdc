// Base Extractor Types and Traits
//
// Shared by every language pass:
// - types.rs: the symbol inventory data model and its wire format
// - extractor.rs: BaseExtractor, the per-file extraction context
// - creation_methods.rs: record construction
// - tree_methods.rs: tree navigation
// - naming.rs: qualified name disambiguation

pub mod creation_methods;
pub mod extractor;
pub mod naming;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use creation_methods::SymbolOptions;
pub use extractor::BaseExtractor;
pub use naming::QualifiedNameRegistry;
pub use types::{
    title_for_code_type, CodeSnippet, CodeSymbolDependencies,
    CodeSymbolDependencyWithFileInformation, CodeSymbolInformation, CodeSymbolKind,
    ExtractionConfig, ExtractionOutput, FileCodeSymbolInformation, TypescriptCodeType,
};
