//! Symbol extractors
//!
//! - `base` - data model, wire format and the per-file extraction context
//! - `typescript` - the TypeScript/JavaScript passes
//! - `manager` - ExtractorManager public API (single file, disk, batch)

pub mod base;
pub mod manager;
pub mod typescript;

// Re-export the public API
pub use base::{
    CodeSnippet, CodeSymbolDependencies, CodeSymbolDependencyWithFileInformation,
    CodeSymbolInformation, CodeSymbolKind, ExtractionConfig, ExtractionOutput,
    FileCodeSymbolInformation, TypescriptCodeType,
};
pub use manager::ExtractorManager;
pub use typescript::TypeScriptExtractor;
