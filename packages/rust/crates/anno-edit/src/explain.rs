//! Human-readable account of a verdict.

use std::fmt;

use anno_ast::{UnsafeReason, Verdict, canonical_dump, compare, normalize};
use serde::Serialize;

use crate::diff::generate_unified_diff;

/// A verdict with what produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    /// The verdict.
    pub verdict: Verdict,
    /// Why the verdict is `Unsafe`; `None` when `Safe`.
    pub reason: Option<String>,
    /// Diff between the canonical dumps of the normalized trees. Empty
    /// when the trees agree or either side failed to parse.
    pub diff: String,
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verdict)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {reason}")?;
        }
        if !self.diff.is_empty() {
            write!(f, "\n{}", self.diff)?;
        }
        Ok(())
    }
}

/// Compare `original` and `candidate` and explain the outcome.
#[must_use]
pub fn explain(original: &str, candidate: &str) -> Explanation {
    let comparison = compare(original, candidate);
    let diff = match comparison.reason {
        Some(UnsafeReason::StructureDiffers) => dump_diff(original, candidate),
        _ => String::new(),
    };

    Explanation {
        verdict: comparison.verdict,
        reason: comparison.reason.map(|reason| reason.to_string()),
        diff,
    }
}

fn dump_diff(original: &str, candidate: &str) -> String {
    let dump = |source: &str| {
        normalize(source)
            .ok()
            .and_then(|unit| canonical_dump(&unit).ok())
            .unwrap_or_default()
    };
    generate_unified_diff(&dump(original), &dump(candidate))
}
