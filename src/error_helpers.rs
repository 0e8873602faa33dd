//! Error helper functions for describing per-file I/O failures

use std::io;
use std::path::Path;

/// Check if an IO error is a permission denied error
pub fn is_permission_denied(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::PermissionDenied
}

/// Check if an IO error is a "not found" error
pub fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}

/// Check if an IO error means the bytes were not valid UTF-8
pub fn is_invalid_text(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::InvalidData
}

/// Context message for a failed read. The path is reported by the caller.
pub fn read_failure(err: &io::Error) -> &'static str {
    if is_invalid_text(err) {
        "File is not valid UTF-8 text"
    } else if is_permission_denied(err) {
        "Permission denied when reading file"
    } else if is_not_found(err) {
        "File not found"
    } else {
        "Failed to read file"
    }
}

/// Context message for a failed write-back of `path`.
pub fn write_failure(path: &Path, err: &io::Error) -> String {
    let parent_dir = path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    if is_permission_denied(err) {
        format!("Permission denied when writing into '{}'", parent_dir)
    } else {
        "Failed to write file".to_string()
    }
}
