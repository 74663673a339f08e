//! Error types for parsing.

use thiserror::Error;

/// Failure to turn source text into a syntax tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The bundled Python grammar could not be loaded.
    #[error("Grammar error: {0}")]
    Grammar(String),

    /// The parser gave up without producing a tree.
    #[error("Parser produced no tree")]
    NoTree,

    /// The source is not valid Python.
    #[error("Syntax error at line {line}, column {column}: {snippet:?}")]
    Syntax {
        /// 1-based line of the first error.
        line: usize,
        /// 1-based column of the first error.
        column: usize,
        /// Source text covered by the error node (truncated).
        snippet: String,
    },

    /// The grammar accepts the source but Python's parser rejects it.
    #[error("Invalid syntax at line {line}, column {column}: {message}")]
    Invalid {
        /// 1-based line of the rejected construct.
        line: usize,
        /// 1-based column of the rejected construct.
        column: usize,
        /// What Python objects to.
        message: String,
    },
}
