//! Core types for the annotation pipeline.
//!
//! Defines the request handed to a generator and the configuration and
//! statistics of the two engines.

use std::fmt;
use std::path::PathBuf;

use anno_ast::Verdict;
use anno_io::DEFAULT_MAX_FILE_SIZE;
use serde::{Deserialize, Serialize};

/// Which modifications a generator is asked to make.
///
/// `delete` flips `types`, `docs` and `comments` from "add" to "remove";
/// `format` is only honored when adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationRequest {
    /// Type annotations.
    pub types: bool,
    /// Google-style docstrings.
    pub docs: bool,
    /// Inline comments.
    pub comments: bool,
    /// Formatting improvements.
    pub format: bool,
    /// Remove instead of add.
    pub delete: bool,
    /// Free-form extra instruction.
    pub instruction: Option<String>,
}

impl Default for TransformationRequest {
    fn default() -> Self {
        Self {
            types: true,
            docs: true,
            comments: false,
            format: false,
            delete: false,
            instruction: None,
        }
    }
}

/// A single resolved modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedEdit {
    /// Add missing type annotations.
    AddTypes,
    /// Remove all type annotations.
    RemoveTypes,
    /// Add google-style docstrings.
    AddDocs,
    /// Remove all docstrings.
    RemoveDocs,
    /// Add comments where the code is not obvious.
    AddComments,
    /// Remove all comments.
    RemoveComments,
    /// Improve formatting.
    Format,
}

impl RequestedEdit {
    /// Instruction sentence used when describing the edit to a model.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::AddTypes => "add type annotations whenever necessary.",
            Self::RemoveTypes => "remove type annotations whenever possible.",
            Self::AddDocs => "add google style doc-strings whenever necessary.",
            Self::RemoveDocs => "remove doc-strings whenever possible.",
            Self::AddComments => "add comments that explain the code whenever necessary.",
            Self::RemoveComments => "remove comments whenever possible.",
            Self::Format => "improve the formatting of the code whenever necessary.",
        }
    }
}

impl fmt::Display for RequestedEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl TransformationRequest {
    /// Resolve the flags into an ordered edit list.
    ///
    /// Order is types, docs, comments, format.
    #[must_use]
    pub fn requested_edits(&self) -> Vec<RequestedEdit> {
        let mut edits = Vec::new();
        if self.delete {
            if self.types {
                edits.push(RequestedEdit::RemoveTypes);
            }
            if self.docs {
                edits.push(RequestedEdit::RemoveDocs);
            }
            if self.comments {
                edits.push(RequestedEdit::RemoveComments);
            }
        } else {
            if self.types {
                edits.push(RequestedEdit::AddTypes);
            }
            if self.docs {
                edits.push(RequestedEdit::AddDocs);
            }
            if self.comments {
                edits.push(RequestedEdit::AddComments);
            }
            if self.format {
                edits.push(RequestedEdit::Format);
            }
        }
        edits
    }
}

/// Configuration of the traversal engine.
#[derive(Debug, Clone)]
pub struct AnnotateConfig {
    /// Descend below the root's direct children.
    pub recursive: bool,
    /// Treat existing `safe.`/`unsafe.` files as originals.
    pub include_artifacts: bool,
    /// Maximum size of a file handed to the generator. Larger files are
    /// skipped, not failed.
    pub max_file_size: u64,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            include_artifacts: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Configuration of the merge engine.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Descend below the root's direct children.
    pub recursive: bool,
    /// Leave `safe.` artifacts alone.
    pub exclude_safe: bool,
    /// Leave `unsafe.` artifacts alone.
    pub exclude_unsafe: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            exclude_safe: false,
            exclude_unsafe: false,
        }
    }
}

impl MergeConfig {
    /// Whether artifacts with `verdict`'s tag are merged.
    #[must_use]
    pub fn applies(&self, verdict: Verdict) -> bool {
        match verdict {
            Verdict::Safe => !self.exclude_safe,
            Verdict::Unsafe => !self.exclude_unsafe,
        }
    }
}

/// Outcome of one annotated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedFile {
    /// The original.
    pub original: PathBuf,
    /// The artifact written next to it.
    pub artifact: PathBuf,
    /// Verdict of the candidate.
    pub verdict: Verdict,
}

/// Statistics of an `annotate_tree` run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AnnotateStats {
    /// Files handed to the generator, in visit order.
    pub files: Vec<AnnotatedFile>,
    /// Existing artifacts skipped during traversal.
    pub skipped_artifacts: usize,
    /// Originals never sent to the generator: binary, or over
    /// `max_file_size`.
    pub skipped_unreadable: Vec<PathBuf>,
    /// Entries that vanished between listing and visit.
    pub vanished: usize,
}

impl AnnotateStats {
    /// Number of files annotated.
    #[must_use]
    pub fn annotated(&self) -> usize {
        self.files.len()
    }

    /// Number of candidates with the given verdict.
    #[must_use]
    pub fn count(&self, verdict: Verdict) -> usize {
        self.files.iter().filter(|f| f.verdict == verdict).count()
    }
}

/// One original overwritten by the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedFile {
    /// The original.
    pub original: PathBuf,
    /// Tags applied, in application order.
    pub applied: Vec<Verdict>,
}

impl MergedFile {
    /// The tag whose content the original ends up with.
    #[must_use]
    pub fn winner(&self) -> Option<Verdict> {
        self.applied.last().copied()
    }
}

/// Statistics of a `merge_tree` run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MergeStats {
    /// Originals scanned.
    pub files_scanned: usize,
    /// Originals that received at least one artifact.
    pub merged: Vec<MergedFile>,
}
