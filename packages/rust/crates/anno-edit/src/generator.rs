//! The generator capability.

use crate::error::GeneratorError;
use crate::types::TransformationRequest;

/// Produces a candidate rewrite of Python source.
///
/// Implementations are passed explicitly to the engines. Any closure of
/// the shape `Fn(&str, &TransformationRequest) -> Result<String, GeneratorError>`
/// is a generator, which keeps test fakes short.
pub trait Generator {
    /// Rewrite `code` as asked by `request`.
    ///
    /// # Errors
    /// Any failure to obtain a candidate. The traversal engine aborts on
    /// the first error.
    fn generate(&self, code: &str, request: &TransformationRequest) -> Result<String, GeneratorError>;
}

impl<F> Generator for F
where
    F: Fn(&str, &TransformationRequest) -> Result<String, GeneratorError>,
{
    fn generate(&self, code: &str, request: &TransformationRequest) -> Result<String, GeneratorError> {
        self(code, request)
    }
}

