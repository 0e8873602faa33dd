use anyhow::{Context, Result};
use similar::TextDiff;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error_helpers;
use crate::replacements::ReplacementTable;
use crate::rewriter::{self, ImportRule};

/// One file while it is being processed. Not kept past `process_file`.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub original: String,
    pub current: String,
    pub modified: bool,
}

impl FileRecord {
    pub fn load(path: &Path) -> Result<Self> {
        let original = fs::read_to_string(path)
            .map_err(|e| {
                let context = error_helpers::read_failure(&e);
                anyhow::Error::new(e).context(context)
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            current: original.clone(),
            original,
            modified: false,
        })
    }

    /// The file is written back exactly when this is true.
    pub fn is_changed(&self) -> bool {
        self.current != self.original
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub updated: usize,
    pub failed: usize,
}

pub struct FileProcessor {
    table: ReplacementTable,
    import_rule: ImportRule,
}

impl FileProcessor {
    pub fn new(table: ReplacementTable, import_rule: ImportRule) -> Self {
        Self { table, import_rule }
    }

    /// Run the record's content through the replacement table and import rule.
    pub fn transform(&self, record: &mut FileRecord) {
        let rewrite = rewriter::rewrite(&record.current, &self.table, &self.import_rule);
        if rewrite.modified {
            debug!(
                path = %record.path.display(),
                replacements = rewrite.replacements,
                import_added = rewrite.import_added,
                "rewrote content"
            );
        }
        record.current = rewrite.content;
        record.modified = record.modified || rewrite.modified;
    }

    /// Read, transform and, if the content changed, write back one file.
    pub fn process_file(&self, file_path: &Path) -> Result<FileOutcome> {
        let mut record = FileRecord::load(file_path)?;
        self.transform(&mut record);

        if !record.is_changed() {
            debug!(path = %record.path.display(), modified = record.modified, "unchanged");
            return Ok(FileOutcome::Unchanged);
        }

        write_in_place(&record.path, &record.current)?;

        let diff = TextDiff::from_lines(&record.original, &record.current);
        info!(
            path = %record.path.display(),
            modified = record.modified,
            "updated\n{}",
            diff.unified_diff().context_radius(1).header("original", "updated")
        );

        Ok(FileOutcome::Updated)
    }

    /// Process every path from `paths`, reporting to `out`.
    ///
    /// A failure on one file is reported and the loop moves on. An `Err`
    /// coming out of `paths` itself (directory traversal) ends the run.
    pub fn process_all<I, W>(&self, paths: I, out: &mut W) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<PathBuf>>,
        W: Write,
    {
        let mut summary = RunSummary::default();

        for path in paths {
            let path = path?;
            summary.scanned += 1;
            debug!(path = %path.display(), "scanning");

            match self.process_file(&path) {
                Ok(FileOutcome::Updated) => {
                    summary.updated += 1;
                    writeln!(out, "Updated: {}", path.display())?;
                }
                Ok(FileOutcome::Unchanged) => {}
                Err(e) => {
                    summary.failed += 1;
                    warn!(path = %path.display(), error = %format!("{:#}", e), "skipped");
                    writeln!(out, "Error processing {}: {:#}", path.display(), e)?;
                }
            }
        }

        info!(
            scanned = summary.scanned,
            updated = summary.updated,
            failed = summary.failed,
            "run finished"
        );

        Ok(summary)
    }
}

/// Replace `path` with `content` through a temp file in the same directory,
/// keeping the original permissions. A symlink is resolved first so the
/// link stays in place and its target receives the new content.
fn write_in_place(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path).context("Failed to resolve file path")?;
    let path = target.as_path();

    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let permissions = fs::metadata(path)
        .context("Failed to read file permissions")?
        .permissions();

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .map_err(|e| {
            let context = error_helpers::write_failure(path, &e);
            anyhow::Error::new(e).context(context)
        })?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write temp file")?;
    temp_file.flush().context("Failed to flush temp file")?;

    fs::set_permissions(temp_file.path(), permissions)
        .context("Failed to copy file permissions")?;

    temp_file
        .persist(path)
        .map_err(|e| {
            let context = error_helpers::write_failure(path, &e.error);
            anyhow::Error::new(e.error).context(context)
        })?;

    Ok(())
}
