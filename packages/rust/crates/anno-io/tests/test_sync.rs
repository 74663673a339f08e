//! Tests for sync module - read, write and remove.

use std::io::Write;
use tempfile::TempDir;

use anno_io::{IoError, read_bytes, read_text_safe, remove_file, write_bytes, write_text};

#[test]
fn test_sync_read() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("module.py");
    std::fs::write(&p, "def f(x):\n    return x\n").unwrap();
    assert_eq!(
        read_text_safe(&p, 1024).unwrap(),
        "def f(x):\n    return x\n"
    );
}

#[test]
fn test_sync_binary() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("compiled.py");
    let mut file = std::fs::File::create(&p).unwrap();
    file.write_all(b"\x00\x01\x02\x03").unwrap();
    assert!(matches!(read_text_safe(&p, 1024), Err(IoError::BinaryFile)));
}

#[test]
fn test_file_too_large() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("large.py");
    std::fs::write(&p, "x = 12345678901234567890").unwrap();
    let err = read_text_safe(&p, 10).unwrap_err();
    assert!(matches!(err, IoError::TooLarge(_, _)));
    assert!(err.is_rejected_content());
}

#[test]
fn test_file_not_found() {
    let result = read_text_safe("/nonexistent/module.py", 1024);
    assert!(matches!(result, Err(IoError::NotFound(_))));
    assert!(!result.unwrap_err().is_rejected_content());
}

#[test]
fn test_write_then_remove() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("safe.module.py");
    write_text(&p, "x = 1\n").unwrap();
    assert!(p.exists());
    remove_file(&p).unwrap();
    assert!(!p.exists());
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("missing").join("module.py");
    assert!(matches!(write_text(&p, "x = 1\n"), Err(IoError::System(_))));
}

#[test]
fn test_bytes_pass_through_unchanged() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("module.py");
    std::fs::write(&p, "old = 1\n").unwrap();

    let raw: &[u8] = b"s = '\xe9'\n\x00";
    write_bytes(&p, raw).unwrap();
    assert_eq!(read_bytes(&p).unwrap(), raw);
}

#[test]
fn test_read_bytes_missing() {
    let result = read_bytes("/nonexistent/safe.module.py");
    assert!(matches!(result, Err(IoError::NotFound(_))));
}

#[test]
fn test_read_drops_bom_and_replaces_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let p = dir.path().join("module.py");
    std::fs::write(&p, b"\xef\xbb\xbfx = 1  # \xff\n").unwrap();
    assert_eq!(read_text_safe(&p, 1024).unwrap(), "x = 1  # \u{fffd}\n");
}
