//! anno-edit - Annotation and merge engines for Python source trees
//!
//! Walks a directory, asks a [`Generator`] for a rewrite of every `.py`
//! file, tags each rewrite `safe` or `unsafe` with the structural
//! comparator of `anno-ast`, and later folds the tagged artifacts back
//! over their originals.
//!
//! # Features
//!
//! - **Annotate**: `annotate_tree` writes `safe.<name>` / `unsafe.<name>` siblings
//! - **Replace**: `merge_tree` applies `unsafe` then `safe` artifacts and deletes them
//! - **Explain**: `explain` shows where two normalized trees differ
//!
//! # Architecture
//!
//! ```text
//! anno-edit/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # AnnotateError, GeneratorError
//! ├── types.rs      # TransformationRequest, configs, stats
//! ├── generator.rs  # Generator trait
//! ├── artifact.rs   # safe./unsafe. naming
//! ├── walk.rs       # Sorted depth-first traversal
//! ├── annotate.rs   # Traversal engine
//! ├── merge.rs      # Merge engine
//! ├── diff.rs       # Unified diffs
//! └── explain.rs    # Verdict explanations
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use anno_edit::{AnnotateConfig, GeneratorError, TransformationRequest, annotate_tree};
//!
//! let echo = |code: &str, _: &TransformationRequest| Ok::<_, GeneratorError>(code.to_string());
//! let stats = annotate_tree(
//!     Path::new("src"),
//!     &TransformationRequest::default(),
//!     &AnnotateConfig { recursive: true, ..Default::default() },
//!     &echo,
//! )?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod annotate;
mod artifact;
mod diff;
mod error;
mod explain;
mod generator;
mod merge;
mod types;
mod walk;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use annotate::{annotate_file, annotate_tree};
pub use artifact::{SOURCE_EXTENSION, artifact_path, is_artifact_name, is_source_file};
pub use error::{AnnotateError, GeneratorError};
pub use explain::{Explanation, explain};
pub use generator::Generator;
pub use merge::{merge_file, merge_tree};
pub use types::{
    AnnotateConfig, AnnotateStats, AnnotatedFile, MergeConfig, MergeStats, MergedFile,
    RequestedEdit, TransformationRequest,
};

// Re-export the diff utility for external use
pub use diff::generate_unified_diff;

// Verdicts are part of this crate's API surface
pub use anno_ast::Verdict;
