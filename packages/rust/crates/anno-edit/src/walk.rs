//! Depth-first traversal shared by both engines.
//!
//! Depth 0 is the root. A directory is listed when it is the root or the
//! walk is recursive; files below a non-listed directory are never seen.

use std::path::Path;

use anno_io::sorted_entries;

use crate::artifact::is_source_file;
use crate::error::AnnotateError;

/// Eligible `.py` files under a root, visited in sorted order.
pub(crate) struct SourceWalk {
    recursive: bool,
    vanished: usize,
}

impl SourceWalk {
    pub(crate) fn new(recursive: bool) -> Self {
        Self {
            recursive,
            vanished: 0,
        }
    }

    /// Entries listed but gone by the time they were visited.
    pub(crate) fn vanished(&self) -> usize {
        self.vanished
    }

    /// Call `visit` on every eligible file under `root`.
    ///
    /// # Errors
    /// `PathNotFound` for a missing root, `Read` for an unlistable
    /// directory, and whatever `visit` returns.
    pub(crate) fn run<F>(&mut self, root: &Path, visit: &mut F) -> Result<(), AnnotateError>
    where
        F: FnMut(&Path) -> Result<(), AnnotateError>,
    {
        if !root.exists() {
            return Err(AnnotateError::PathNotFound(root.to_path_buf()));
        }
        self.visit_path(root, 0, visit)
    }

    fn visit_path<F>(&mut self, path: &Path, depth: usize, visit: &mut F) -> Result<(), AnnotateError>
    where
        F: FnMut(&Path) -> Result<(), AnnotateError>,
    {
        if path.is_file() {
            if is_source_file(path) {
                visit(path)?;
            }
            return Ok(());
        }

        if !path.is_dir() || (depth > 0 && !self.recursive) {
            return Ok(());
        }

        let entries = sorted_entries(path).map_err(|source| AnnotateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        for entry in entries {
            if !entry.exists() {
                tracing::debug!(path = %entry.display(), "entry vanished before visit");
                self.vanished += 1;
                continue;
            }
            self.visit_path(&entry, depth + 1, visit)?;
        }

        Ok(())
    }
}
