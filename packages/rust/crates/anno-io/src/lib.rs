#![allow(clippy::doc_markdown)]

//! anno-io - File I/O primitives for code annotation
//!
//! Everything the annotation and merge engines do to the file system goes
//! through this crate.
//!
//! # Features
//!
//! - **Safety**: Binary detection & size limits on every source read
//! - **Whole-file writes**: Artifacts and merged originals are replaced, never patched
//! - **Deterministic listings**: Directory snapshots sorted by file name
//!
//! # Architecture
//!
//! ```text
//! anno-io/src/
//! ├── lib.rs      # Re-exports (this file)
//! ├── error.rs    # IoError enum
//! ├── detect.rs   # NUL sniffing & source decoding
//! ├── sync.rs     # Read / write / remove
//! └── listing.rs  # Sorted directory snapshots
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use anno_io::{read_text_safe, write_text};
//!
//! let code = read_text_safe("module.py", 1024 * 1024)?;
//! write_text("safe.module.py", &code)?;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod detect;
mod error;
mod listing;
mod sync;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use error::IoError;
pub use listing::sorted_entries;
pub use sync::{read_bytes, read_text_safe, remove_file, write_bytes, write_text};

/// Default read limit for source files (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;
