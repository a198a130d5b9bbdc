//! symgraph - extract one TypeScript file's symbol graph to JSON
//!
//! Writes `{"output": [...]}` with every symbol record of the file and its
//! workspace-internal dependency edges.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use symgraph_core::extractors::{ExtractionOutput, ExtractorManager};
use symgraph_core::utils::paths;

#[derive(Parser, Debug)]
#[command(
    name = "symgraph",
    version,
    about = "Extract the symbol inventory and dependency edges of a TypeScript file"
)]
struct Args {
    /// Workspace root; symbol names are relative to it
    workspace_root: String,

    /// Absolute path of the file to extract
    file_path: String,

    /// Where the JSON output is written
    output_file: String,

    /// Path recorded as the symbols' original file path
    original_file_path: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let workspace_root = paths::normalize(&args.workspace_root);
    let file_path = paths::normalize(&args.file_path);
    let original_file_path = args.original_file_path.as_deref().unwrap_or(&file_path);
    info!("Extracting {} (workspace {})", file_path, workspace_root);

    let symbols = ExtractorManager::new().extract_file_from_disk(
        &workspace_root,
        &file_path,
        original_file_path,
    )?;
    let count = symbols.len();

    let json = ExtractionOutput::new(symbols)
        .to_json()
        .context("Failed to serialize extraction output")?;
    fs::write(&args.output_file, json)
        .with_context(|| format!("Failed to write {}", args.output_file))?;

    info!("Wrote {} symbols to {}", count, args.output_file);
    Ok(())
}
