//! Error types for the annotation and merge engines.
//!
//! Library crates use `thiserror` for explicit error enums. Every
//! `AnnotateError` names the path it failed on.

use std::error::Error as StdError;
use std::path::PathBuf;

use anno_io::IoError;
use thiserror::Error;

/// Failure reported by a [`Generator`](crate::Generator).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct GeneratorError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl GeneratorError {
    /// Error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Error wrapping an underlying cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The top-level message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error types for `annotate_tree` and `merge_tree`.
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// The root path does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// An original, an artifact or a directory could not be read.
    #[error("Cannot read {}", path.display())]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: IoError,
    },

    /// The generator failed on a file. Aborts the run.
    #[error("Generator failed on {}", path.display())]
    Generator {
        /// File being annotated.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: GeneratorError,
    },

    /// An artifact or a merged original could not be written.
    #[error("Cannot write {}", path.display())]
    Write {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: IoError,
    },

    /// A merged artifact could not be deleted.
    #[error("Cannot remove {}", path.display())]
    Remove {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: IoError,
    },
}

impl AnnotateError {
    /// The path the error is about.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::PathNotFound(path)
            | Self::Read { path, .. }
            | Self::Generator { path, .. }
            | Self::Write { path, .. }
            | Self::Remove { path, .. } => path,
        }
    }
}
