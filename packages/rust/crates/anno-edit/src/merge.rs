//! Merge engine: fold artifacts back over their originals.
//!
//! For each eligible original the `unsafe.` artifact is applied first and
//! the `safe.` artifact last, so `safe` wins when both are merged. An
//! applied artifact is deleted. Contents are copied byte for byte and
//! verdicts are never recomputed.

use std::path::Path;

use anno_ast::Verdict;
use anno_io::{read_bytes, remove_file, write_bytes};

use crate::artifact::artifact_path;
use crate::error::AnnotateError;
use crate::types::{MergeConfig, MergeStats, MergedFile};
use crate::walk::SourceWalk;

/// Merge every artifact under `root` into its original.
///
/// # Errors
/// `PathNotFound` when `root` is missing; otherwise the first read,
/// write or remove failure, which ends the run with earlier merges kept.
pub fn merge_tree(root: &Path, config: &MergeConfig) -> Result<MergeStats, AnnotateError> {
    let mut stats = MergeStats::default();
    let mut walk = SourceWalk::new(config.recursive);

    walk.run(root, &mut |path: &Path| {
        stats.files_scanned += 1;
        if let Some(merged) = merge_file(path, config)? {
            stats.merged.push(merged);
        }
        Ok(())
    })?;

    Ok(stats)
}

/// Merge the artifacts of one original.
///
/// Returns `None` when no artifact was applied and the original is
/// untouched.
///
/// # Errors
/// `Read`, `Write` or `Remove` naming the artifact or original involved.
pub fn merge_file(original: &Path, config: &MergeConfig) -> Result<Option<MergedFile>, AnnotateError> {
    let mut applied = Vec::new();

    for verdict in Verdict::MERGE_ORDER {
        if !config.applies(verdict) {
            continue;
        }
        let Some(artifact) = artifact_path(original, verdict) else {
            continue;
        };
        if !artifact.is_file() {
            continue;
        }

        let content = read_bytes(&artifact).map_err(|source| AnnotateError::Read {
            path: artifact.clone(),
            source,
        })?;
        write_bytes(original, &content).map_err(|source| AnnotateError::Write {
            path: original.to_path_buf(),
            source,
        })?;
        remove_file(&artifact).map_err(|source| AnnotateError::Remove {
            path: artifact.clone(),
            source,
        })?;

        tracing::info!(
            path = %original.display(),
            verdict = %verdict,
            "merged artifact"
        );
        applied.push(verdict);
    }

    if applied.is_empty() {
        tracing::debug!(path = %original.display(), "no artifact to merge");
        return Ok(None);
    }

    Ok(Some(MergedFile {
        original: original.to_path_buf(),
        applied,
    }))
}
