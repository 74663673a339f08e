//! Error type shared by every file operation.

use std::path::Path;

use thiserror::Error;

/// Failure of a file or directory operation.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains NUL bytes and is not source text.
    #[error("Binary file detected")]
    BinaryFile,

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}

impl IoError {
    /// `NotFound` naming `path` for a missing file, `System` otherwise.
    pub(crate) fn at(path: &Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_string_lossy().to_string())
        } else {
            Self::System(error)
        }
    }

    /// The file exists and is readable but is not source text within the
    /// read limit (`TooLarge` or `BinaryFile`).
    #[must_use]
    pub fn is_rejected_content(&self) -> bool {
        matches!(self, Self::TooLarge(..) | Self::BinaryFile)
    }
}
