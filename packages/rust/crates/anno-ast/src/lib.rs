//! anno-ast - Python syntax trees for code annotation
//!
//! Decides whether a rewritten Python file is the same program as the
//! original once type annotations, docstrings, comments, imports and
//! formatting are ignored.
//!
//! ## Architecture
//!
//! ```text
//! anno-ast/src/
//! ├── lib.rs        # Re-exports (entry point)
//! ├── error.rs      # ParseError
//! ├── tree.rs       # SyntaxNode sum type
//! ├── literal.rs    # String / number canonicalisation
//! ├── parser.rs     # tree-sitter-python lowering
//! ├── validate.rs   # Rules the grammar leaves to Python
//! ├── normalize.rs  # Normalizer (pure transform)
//! └── compare.rs    # Comparator and Verdict
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use anno_ast::{Verdict, classify};
//!
//! let original = "def f(x: int) -> int:\n    return x\n";
//! let candidate = "def f(x):\n    return x\n";
//! assert_eq!(classify(original, candidate), Verdict::Safe);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod compare;
mod error;
mod literal;
mod normalize;
mod parser;
mod tree;
mod validate;

// ============================================================================
// Re-exports
// ============================================================================

pub use compare::{Comparison, UnsafeReason, Verdict, canonical_dump, classify, compare};
pub use error::ParseError;
pub use normalize::{NormalizedUnit, normalize, normalize_tree};
pub use parser::{PythonParser, parse};
pub use tree::{BLOCK_KIND, Parameter, ParameterKind, StrKind, StrPiece, SyntaxNode};
