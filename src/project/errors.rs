//! Errors raised by the resolution layer
//!
//! Unresolvable names are not errors (they resolve to `None`); these variants
//! describe a source tree the resolver cannot make sense of at all.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// An import/export chain loops back onto itself
    #[error("circular alias: export '{name}' of '{path}' forwards to itself")]
    AliasCycle { name: String, path: String },

    /// A re-export chain is longer than the configured limit
    #[error("alias chain for '{name}' exceeds {limit} hops (last module: '{path}')")]
    AliasDepthExceeded {
        name: String,
        path: String,
        limit: usize,
    },

    /// The node handed to the resolver does not belong to the given file
    #[error("node '{kind}' at bytes {start}..{end} is outside '{path}'")]
    ForeignNode {
        kind: String,
        start: usize,
        end: usize,
        path: String,
    },
}
