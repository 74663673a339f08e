//! Traversal engine: generate, classify, write artifacts.

use std::path::Path;

use anno_ast::classify;
use anno_io::{read_text_safe, write_text};

use crate::artifact::{artifact_path, is_artifact_name};
use crate::error::AnnotateError;
use crate::generator::Generator;
use crate::types::{AnnotateConfig, AnnotateStats, AnnotatedFile, TransformationRequest};
use crate::walk::SourceWalk;

/// Annotate every eligible file under `root`.
///
/// `root` may be a single file. Directories are visited depth-first in
/// sorted order; below the root only when `config.recursive` is set.
/// Binary files and files over `config.max_file_size` are skipped and
/// listed in `AnnotateStats::skipped_unreadable`. Files already written
/// stay written when a later file fails.
///
/// # Errors
/// `PathNotFound` when `root` is missing; otherwise the first other read
/// failure, or generator or write failure, which ends the run.
pub fn annotate_tree<G>(
    root: &Path,
    request: &TransformationRequest,
    config: &AnnotateConfig,
    generator: &G,
) -> Result<AnnotateStats, AnnotateError>
where
    G: Generator + ?Sized,
{
    let mut stats = AnnotateStats::default();
    let mut walk = SourceWalk::new(config.recursive);

    walk.run(root, &mut |path: &Path| {
        let is_artifact = path
            .file_name()
            .is_some_and(|name| is_artifact_name(&name.to_string_lossy()));
        if is_artifact && !config.include_artifacts {
            tracing::debug!(path = %path.display(), "skipping artifact");
            stats.skipped_artifacts += 1;
            return Ok(());
        }

        match annotate_file(path, request, config.max_file_size, generator) {
            Ok(annotated) => stats.files.push(annotated),
            Err(AnnotateError::Read { path, source }) if source.is_rejected_content() => {
                tracing::warn!(path = %path.display(), reason = %source, "skipping file");
                stats.skipped_unreadable.push(path);
            }
            Err(e) => return Err(e),
        }
        Ok(())
    })?;

    stats.vanished = walk.vanished();
    Ok(stats)
}

/// Annotate one file and write its artifact.
///
/// The candidate goes to `safe.<name>` or `unsafe.<name>` next to `path`,
/// replacing an earlier artifact with the same tag. The other tag's
/// artifact, if any, is left alone.
///
/// # Errors
/// `Read` when the original cannot be read within `max_file_size`,
/// `Generator` when the generator fails, `Write` when the artifact
/// cannot be written.
pub fn annotate_file<G>(
    path: &Path,
    request: &TransformationRequest,
    max_file_size: u64,
    generator: &G,
) -> Result<AnnotatedFile, AnnotateError>
where
    G: Generator + ?Sized,
{
    let code = read_text_safe(path, max_file_size).map_err(|source| AnnotateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let candidate = generator
        .generate(&code, request)
        .map_err(|source| AnnotateError::Generator {
            path: path.to_path_buf(),
            source,
        })?;

    let verdict = classify(&code, &candidate);
    let artifact =
        artifact_path(path, verdict).ok_or_else(|| AnnotateError::PathNotFound(path.to_path_buf()))?;

    write_text(&artifact, &candidate).map_err(|source| AnnotateError::Write {
        path: artifact.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        verdict = %verdict,
        artifact = %artifact.display(),
        "annotated"
    );

    Ok(AnnotatedFile {
        original: path.to_path_buf(),
        artifact,
        verdict,
    })
}
