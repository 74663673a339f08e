//! Turning raw file bytes into source text.

use memchr::memchr;

use crate::error::IoError;

/// How far into a buffer to look for NUL bytes.
const SNIFF_WINDOW: usize = 8192;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// True when a NUL byte appears in the first 8KB.
///
/// Python source never contains NUL, so such a file is never sent to the
/// generator.
pub(crate) fn is_binary(buffer: &[u8]) -> bool {
    memchr(0, &buffer[..buffer.len().min(SNIFF_WINDOW)]).is_some()
}

/// Decode source bytes.
///
/// A leading UTF-8 byte order mark is dropped, as Python's tokenizer does.
/// Invalid UTF-8 is replaced with U+FFFD.
///
/// # Errors
/// `IoError::BinaryFile` when [`is_binary`] holds.
pub(crate) fn decode_source(buffer: &[u8]) -> Result<String, IoError> {
    if is_binary(buffer) {
        return Err(IoError::BinaryFile);
    }
    let text = buffer.strip_prefix(UTF8_BOM).unwrap_or(buffer);
    Ok(String::from_utf8_lossy(text).into_owned())
}
