//! Project - the set of parsed source files symbol resolution runs against
//!
//! Files are keyed by their normalized absolute path. Relative module
//! specifiers are resolved lexically against that key space with extension
//! probing; bare package specifiers never resolve, which keeps everything they
//! import outside the workspace graph.

pub mod errors;
pub mod resolver;
pub mod scope;
pub mod source_file;
pub(crate) mod syntax;

pub use errors::ResolveError;
pub use resolver::{Declaration, ResolvedSymbol, SymbolResolver};
pub use scope::{DeclarationKind, ExportEntry, ImportBinding, ImportedName, ModuleScope};
pub use source_file::SourceFile;

use crate::language::MODULE_EXTENSIONS;
use crate::utils::paths;
use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Knobs for loading and resolving a project
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Longest import/re-export chain followed before giving up
    pub max_alias_depth: usize,
    /// Whether extraction loads the files a source file imports from disk
    pub resolve_dependencies: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            max_alias_depth: 32,
            resolve_dependencies: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Project {
    options: ProjectOptions,
    files: HashMap<String, SourceFile>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProjectOptions) -> Self {
        Self {
            options,
            files: HashMap::new(),
        }
    }

    pub fn options(&self) -> &ProjectOptions {
        &self.options
    }

    /// Add (or replace) a source file from in-memory content
    pub fn add_source_file(&mut self, path: &str, content: impl Into<String>) -> Result<&SourceFile> {
        let file = SourceFile::parse(path, content.into())?;
        let key = file.path().to_string();
        self.files.insert(key.clone(), file);
        self.files
            .get(&key)
            .with_context(|| format!("Source file vanished after insert: {}", key))
    }

    /// Read a source file from disk and add it
    pub fn add_source_file_at_path(&mut self, path: impl AsRef<Path>) -> Result<&SourceFile> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        self.add_source_file(&path.to_string_lossy(), content)
    }

    pub fn get_source_file(&self, path: &str) -> Option<&SourceFile> {
        self.files.get(&paths::normalize(path))
    }

    pub fn source_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Load every file reachable through relative imports and re-exports
    ///
    /// Specifiers that match no file on disk are skipped. Returns the number of
    /// files added.
    pub fn resolve_source_file_dependencies(&mut self) -> Result<usize> {
        let mut queue: Vec<String> = self.files.keys().cloned().collect();
        let mut seen: HashSet<String> = queue.iter().cloned().collect();
        let mut added = 0;

        while let Some(path) = queue.pop() {
            let specifiers: Vec<String> = match self.files.get(&path) {
                Some(file) => file
                    .scope()
                    .module_specifiers()
                    .filter(|specifier| is_relative_specifier(specifier))
                    .map(str::to_string)
                    .collect(),
                None => continue,
            };

            for specifier in specifiers {
                let base = paths::join(paths::parent_dir(&path), &specifier);
                let on_disk = module_candidates(&base)
                    .into_iter()
                    .find(|candidate| self.files.contains_key(candidate) || Path::new(candidate).is_file());
                let Some(candidate) = on_disk else {
                    debug!("Module '{}' imported by {} not found", specifier, path);
                    continue;
                };
                if !seen.insert(candidate.clone()) {
                    continue;
                }
                match self.add_source_file_at_path(&candidate) {
                    Ok(_) => {
                        added += 1;
                        queue.push(candidate);
                    }
                    Err(e) => warn!("Skipping dependency {}: {:#}", candidate, e),
                }
            }
        }

        debug!("Loaded {} dependency files", added);
        Ok(added)
    }

    /// Resolve a module specifier written in `from_path` to a loaded file
    pub fn resolve_module(&self, from_path: &str, specifier: &str) -> Option<&SourceFile> {
        if !is_relative_specifier(specifier) {
            return None;
        }
        let base = paths::join(paths::parent_dir(&paths::normalize(from_path)), specifier);
        module_candidates(&base)
            .into_iter()
            .find_map(|candidate| self.files.get(&candidate))
    }
}

/// Relative (`./x`, `../x`, `.`, `..`) or absolute (`/x`) specifiers; anything
/// else names a package
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// Candidate file paths for a specifier already joined onto its directory
fn module_candidates(base: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    let lower = base.to_ascii_lowercase();

    if MODULE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        candidates.push(base.to_string());
    }
    // ESM-style imports name the emitted `.js` file
    for (emitted, source) in [(".js", ".ts"), (".jsx", ".tsx"), (".mjs", ".mts"), (".cjs", ".cts")] {
        if lower.ends_with(emitted) {
            candidates.push(format!("{}{}", &base[..base.len() - emitted.len()], source));
        }
    }
    for ext in MODULE_EXTENSIONS {
        candidates.push(format!("{}{}", base, ext));
    }
    for ext in MODULE_EXTENSIONS {
        candidates.push(format!("{}/index{}", base, ext));
    }
    candidates
}
