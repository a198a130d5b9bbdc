// API Functions - PyO3-exposed functions for Python
//
// Extraction results are returned as JSON strings so the Python side sees the
// exact wire format (`{"output": [...]}` per file).

use crate::extractors::{ExtractionOutput, ExtractorManager};
use crate::utils;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Extract the symbol graph of one file
///
/// Args:
///     workspace_root (str): Absolute path of the workspace root
///     file_path (str): Absolute path of the file to extract
///     original_file_path (str | None): Path recorded on every symbol
///         (defaults to file_path)
///
/// Returns:
///     str: JSON document `{"output": [CodeSymbolInformation, ...]}`
///
/// Raises:
///     ValueError: If the file cannot be read or resolution fails
#[pyfunction]
#[pyo3(signature = (workspace_root, file_path, original_file_path=None))]
pub fn extract_file(
    py: Python<'_>,
    workspace_root: &str,
    file_path: &str,
    original_file_path: Option<&str>,
) -> PyResult<String> {
    let original_file_path = original_file_path.unwrap_or(file_path);

    let symbols = py
        .detach(|| {
            ExtractorManager::new().extract_file_from_disk(
                workspace_root,
                file_path,
                original_file_path,
            )
        })
        .map_err(|e| PyValueError::new_err(format!("Extraction failed: {:#}", e)))?;

    ExtractionOutput::new(symbols)
        .to_json()
        .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
}

/// Extract many files in parallel
///
/// Releases the GIL while Rayon works through the files. A file that fails is
/// logged and comes back with no symbols; it never fails the batch.
///
/// Args:
///     files (list[tuple[str, str]]): (file_path, original_file_path) pairs
///     workspace_root (str): Absolute path of the workspace root
///
/// Returns:
///     str: JSON array of `{"workingDirectory", "filePath", "codeSymbols"}`
///          objects, in input order
#[pyfunction]
#[pyo3(signature = (files, workspace_root))]
pub fn extract_files_batch(
    py: Python<'_>,
    files: Vec<(String, String)>,
    workspace_root: String,
) -> PyResult<String> {
    let results = py.detach(move || {
        ExtractorManager::new().extract_files_batch(&workspace_root, &files)
    });

    serde_json::to_string(&results)
        .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
}

/// Dotted module path of a file relative to the workspace root
///
/// Example:
///     >>> module_path("/ws", "/ws/src/foo.ts")
///     'src.foo'
#[pyfunction]
pub fn module_path(workspace_root: &str, file_path: &str) -> String {
    utils::module_path(workspace_root, file_path)
}

/// Languages the extractor parses
#[pyfunction]
pub fn supported_languages() -> Vec<String> {
    crate::language::supported_languages()
        .into_iter()
        .map(str::to_string)
        .collect()
}
