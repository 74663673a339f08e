//! Artifact naming.
//!
//! An artifact is a sibling of its original named `<tag>.<name>`, with
//! `tag` one of `safe` / `unsafe`.

use std::path::{Path, PathBuf};

use anno_ast::Verdict;

/// Extension of eligible source files.
pub const SOURCE_EXTENSION: &str = "py";

/// True when `path` names a Python source file.
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// True when `name` starts with an artifact tag.
#[must_use]
pub fn is_artifact_name(name: &str) -> bool {
    Verdict::MERGE_ORDER
        .iter()
        .any(|verdict| name.starts_with(&format!("{}.", verdict.tag())))
}

/// Path of the `verdict` artifact of `original`.
///
/// Returns `None` when `original` has no file name.
#[must_use]
pub fn artifact_path(original: &Path, verdict: Verdict) -> Option<PathBuf> {
    let name = original.file_name()?.to_string_lossy();
    Some(original.with_file_name(format!("{}.{name}", verdict.tag())))
}
