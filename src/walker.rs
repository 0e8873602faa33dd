//! Lazy traversal of the source tree.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Iterator over every file under `root` whose name ends with one of the
/// configured extensions.
///
/// Traversal errors are yielded as `Err` items rather than skipped; the caller
/// decides whether to stop.
pub struct SourceWalker {
    inner: walkdir::IntoIter,
    extensions: Vec<String>,
}

impl SourceWalker {
    pub fn new<S: AsRef<str>>(root: &Path, extensions: &[S]) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Self {
            inner,
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
        }
    }

    /// Anything that is not a directory, seen through symlinks, is a file.
    /// A dangling link counts, so its read failure gets reported per file.
    fn is_candidate(&self, entry: &DirEntry) -> bool {
        let is_dir = entry.file_type().is_dir()
            || (entry.path_is_symlink() && entry.path().is_dir());
        if is_dir {
            return false;
        }

        match entry.file_name().to_str() {
            Some(name) => has_extension(name, &self.extensions),
            None => false,
        }
    }
}

impl Iterator for SourceWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    if self.is_candidate(&entry) {
                        return Some(Ok(entry.into_path()));
                    }
                }
                Err(err) => {
                    let location = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    return Some(
                        Err::<PathBuf, _>(err)
                            .with_context(|| format!("Failed to walk directory: {}", location)),
                    );
                }
            }
        }
    }
}

/// Name-suffix match, so `app.test.js` matches `.js` and `app.js.map` does not.
pub fn has_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_ref()))
}
