// Symgraph Core - tree-sitter symbol inventory and dependency graph for TypeScript
//
// Parses TypeScript/JavaScript files, lists their classes, methods, functions,
// arrow functions, factory variables, interfaces and type aliases under
// workspace-relative qualified names, and links every executable body to the
// workspace symbols it calls.

pub mod extractors;
pub mod language;
pub mod project;
pub mod utils;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use extractors::{
    CodeSymbolInformation, CodeSymbolKind, ExtractionConfig, ExtractionOutput, ExtractorManager,
    FileCodeSymbolInformation, TypescriptCodeType,
};
pub use project::{Project, ProjectOptions, ResolveError, SymbolResolver};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Symgraph Core Python module
#[cfg(feature = "python")]
#[pymodule]
fn symgraph_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(bindings::extract_file, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_files_batch, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::module_path, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::supported_languages, m)?)?;

    Ok(())
}
