//! urlfix: move hardcoded API URLs onto a centralized endpoint config
//!
//! This library exposes urlfix's pieces for use in tests.
//! The main binary is at src/main.rs.

pub mod cli;
pub mod config;
pub mod error_helpers;
pub mod file_processor;
pub mod logger;
pub mod replacements;
pub mod rewriter;
pub mod walker;

use anyhow::Result;
use std::io::Write;

// Re-export commonly used types for convenience
pub use config::{Settings, load_settings};
pub use file_processor::{FileOutcome, FileProcessor, FileRecord, RunSummary};
pub use replacements::{ReplacementEntry, ReplacementTable};
pub use rewriter::{ImportRule, Rewrite, rewrite};
pub use walker::SourceWalker;

/// Rewrite every matching file under `settings.scan.root`, reporting to `out`.
pub fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<RunSummary> {
    let processor = FileProcessor::new(settings.replacement_table()?, settings.import_rule());
    let walker = SourceWalker::new(&settings.scan.root, &settings.scan.extensions);

    writeln!(out, "Starting URL replacement...")?;
    let summary = processor.process_all(walker, out)?;
    writeln!(out, "Done!")?;

    Ok(summary)
}
