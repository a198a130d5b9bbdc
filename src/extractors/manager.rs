//! ExtractorManager - Public API for symbol and dependency extraction
//!
//! Extraction runs against a [`SymbolResolver`]. The disk-backed entry points
//! build a [`Project`] per file, load whatever it imports, and hand it to the
//! TypeScript extractor.

use crate::extractors::base::{CodeSymbolInformation, ExtractionConfig, FileCodeSymbolInformation};
use crate::extractors::typescript::TypeScriptExtractor;
use crate::project::{Project, ProjectOptions, ResolveError, SymbolResolver};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// Entry point for extraction over one or many files
#[derive(Debug, Clone, Default)]
pub struct ExtractorManager {
    config: ExtractionConfig,
    project_options: ProjectOptions,
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(config: ExtractionConfig, project_options: ProjectOptions) -> Self {
        Self {
            config,
            project_options,
        }
    }

    /// Languages the extractor understands
    pub fn supported_languages(&self) -> Vec<&'static str> {
        crate::language::supported_languages()
    }

    /// Extract the symbol inventory of `file_path`
    ///
    /// A file the resolver does not know yields an empty inventory. Resolver
    /// faults abort the file.
    pub fn extract_file(
        &self,
        resolver: &dyn SymbolResolver,
        workspace_root: &str,
        file_path: &str,
        original_file_path: &str,
    ) -> Result<Vec<CodeSymbolInformation>, ResolveError> {
        let Some(source_file) = resolver.source_file(file_path) else {
            info!("File not found in project: {}", file_path);
            return Ok(Vec::new());
        };

        let mut extractor = TypeScriptExtractor::new(
            resolver,
            source_file,
            workspace_root,
            original_file_path,
            self.config.clone(),
        );
        let symbols = extractor.extract_symbols()?;
        debug!(
            "Extracted {} symbols from {} file: {}",
            symbols.len(),
            source_file.language(),
            file_path
        );
        Ok(symbols)
    }

    /// Load `file_path` (and, unless disabled, the files it imports) from disk
    /// and extract it
    pub fn extract_file_from_disk(
        &self,
        workspace_root: &str,
        file_path: &str,
        original_file_path: &str,
    ) -> Result<Vec<CodeSymbolInformation>> {
        if !Path::new(file_path).is_file() {
            info!("File not found on disk: {}", file_path);
            return Ok(Vec::new());
        }

        let mut project = Project::with_options(self.project_options.clone());
        project.add_source_file_at_path(file_path)?;
        if self.project_options.resolve_dependencies {
            project
                .resolve_source_file_dependencies()
                .with_context(|| format!("Failed to load dependencies of {}", file_path))?;
        }

        self.extract_file(&project, workspace_root, file_path, original_file_path)
            .with_context(|| format!("Failed to extract symbols from {}", file_path))
    }

    /// Extract many files in parallel
    ///
    /// `files` holds `(file_path, original_file_path)` pairs. Each file gets
    /// its own project; a failing file is logged and yields an empty
    /// inventory. Results keep input order.
    pub fn extract_files_batch(
        &self,
        workspace_root: &str,
        files: &[(String, String)],
    ) -> Vec<FileCodeSymbolInformation> {
        files
            .par_iter()
            .map(|(file_path, original_file_path)| {
                let code_symbols = self
                    .extract_file_from_disk(workspace_root, file_path, original_file_path)
                    .unwrap_or_else(|e| {
                        warn!("Extraction failed for {}: {:#}", file_path, e);
                        Vec::new()
                    });
                FileCodeSymbolInformation {
                    working_directory: workspace_root.to_string(),
                    file_path: file_path.clone(),
                    code_symbols,
                }
            })
            .collect()
    }
}
