// Utilities Module
//
// Path handling and qualified-name composition shared by the project layer and
// the extractors.

pub mod paths;
pub mod qualified_name;

pub use qualified_name::{compose, module_path, module_path_from_stem};
