// PyO3 Bindings Module
//
// Python entry points over ExtractorManager. Results cross the boundary as the
// same JSON documents the CLI writes.

mod api;

// Re-export for lib.rs
pub use api::{extract_file, extract_files_batch, module_path, supported_languages};
