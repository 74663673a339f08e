//! Synchronous file operations.
//!
//! Text reads are size- and binary-checked; byte reads are not. Writes
//! replace the whole file.

use std::fs as std_fs;
use std::io::Read;
use std::path::Path;

use crate::detect::decode_source;
use crate::error::IoError;

/// Read text from a file with size and binary checks.
///
/// # Arguments
/// * `path` - Path to the file
/// * `max_bytes` - Maximum file size in bytes
///
/// # Errors
/// `NotFound` when the file is missing, `TooLarge` above `max_bytes`,
/// `BinaryFile` when NUL bytes are present, `System` when it cannot be read.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, IoError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path).map_err(|e| IoError::at(path, e))?;

    if metadata.len() > max_bytes {
        return Err(IoError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer)?;

    decode_source(&buffer)
}

/// Replace the whole content of `path` with `content`.
///
/// The file is created when missing and truncated otherwise.
///
/// # Errors
/// Any underlying `std::io::Error` (permissions, disk full, missing parent).
pub fn write_text<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    write_bytes(path, content.as_bytes())
}

/// Read the raw bytes of a file, without limits or decoding.
///
/// # Errors
/// `NotFound` when the file is missing, `System` otherwise.
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, IoError> {
    let path = path.as_ref();
    std_fs::read(path).map_err(|e| IoError::at(path, e))
}

/// Replace the whole content of `path` with `bytes`.
///
/// An existing file keeps its permissions.
///
/// # Errors
/// Any underlying `std::io::Error` (permissions, disk full, missing parent).
pub fn write_bytes<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<(), IoError> {
    let path = path.as_ref();
    std_fs::write(path, bytes)?;
    tracing::trace!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Remove a file.
///
/// # Errors
/// `NotFound` when the file is already gone, `System` otherwise.
pub fn remove_file<P: AsRef<Path>>(path: P) -> Result<(), IoError> {
    let path = path.as_ref();
    std_fs::remove_file(path).map_err(|e| IoError::at(path, e))
}
