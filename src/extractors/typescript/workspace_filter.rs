//! Workspace-membership filter for dependency targets
//!
//! Fully-qualified names of workspace declarations have the shape
//! `"<absolute path without extension>".Name` or
//! `"<absolute path without extension>".Enclosing.Name`. Anything else (bare
//! names of locals and globals, names inside packages, names outside the
//! workspace root) is external and never becomes an edge.

use crate::utils::{compose, module_path_from_stem, paths};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceMembership<'a> {
    /// Declared in a workspace file: quoted path and 1-2 name segments
    Internal { path: &'a str, chain: Vec<&'a str> },
    External,
}

/// Classify a fully-qualified name against the workspace root
///
/// The quoted path is parsed up to its closing quote, so dots inside
/// directory or file names never split it.
pub fn classify_name<'a>(fully_qualified_name: &'a str, workspace_root: &str) -> WorkspaceMembership<'a> {
    let Some(quoted) = fully_qualified_name.strip_prefix('"') else {
        return WorkspaceMembership::External;
    };
    let Some(close) = quoted.find('"') else {
        return WorkspaceMembership::External;
    };
    let path = &quoted[..close];
    let Some(rest) = quoted[close + 1..].strip_prefix('.') else {
        return WorkspaceMembership::External;
    };

    let chain: Vec<&str> = rest.split('.').collect();
    if chain.is_empty() || chain.len() > 2 || chain.iter().any(|segment| segment.is_empty()) {
        return WorkspaceMembership::External;
    }
    if path.is_empty() || !paths::is_within(workspace_root, path) {
        return WorkspaceMembership::External;
    }
    WorkspaceMembership::Internal { path, chain }
}

/// Rewrite an internal name to its module-relative form (`src.util.helper`)
pub fn rewrite_internal(workspace_root: &str, path: &str, chain: &[&str]) -> String {
    let module = module_path_from_stem(workspace_root, path);
    compose(std::iter::once(module.as_str()).chain(chain.iter().copied()))
}

/// Module-relative name of a workspace declaration, `None` for external names
pub fn workspace_relative_name(fully_qualified_name: &str, workspace_root: &str) -> Option<String> {
    match classify_name(fully_qualified_name, workspace_root) {
        WorkspaceMembership::Internal { path, chain } => {
            Some(rewrite_internal(workspace_root, path, &chain))
        }
        WorkspaceMembership::External => None,
    }
}
