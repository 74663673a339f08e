//! Directory snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::IoError;

/// List the entries of `dir`, sorted lexicographically by file name.
///
/// The listing is a snapshot: entries created after the call are not
/// included, and entries removed after the call are still returned.
/// Callers re-check existence before using an entry.
///
/// # Errors
/// `NotFound` when `dir` is missing, `System` when it cannot be read.
pub fn sorted_entries<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, IoError> {
    let dir = dir.as_ref();
    let reader = fs::read_dir(dir).map_err(|e| IoError::at(dir, e))?;

    let mut entries = Vec::new();
    for entry in reader {
        entries.push(entry?);
    }
    entries.sort_by_key(fs::DirEntry::file_name);

    Ok(entries.into_iter().map(|e| e.path()).collect())
}
