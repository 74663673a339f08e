//! Structural comparison of an original and a candidate rewrite.
//!
//! A `Safe` verdict means the two sources have identical syntax trees once
//! annotations, docstrings, comments, imports and formatting are ignored.
//! It is a syntactic statement only: it does not prove that the programs
//! behave the same (an import removed by the rewrite is invisible here).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::normalize::{NormalizedUnit, normalize};

/// Safe/unsafe classification of a candidate rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Normalized trees are identical.
    Safe,
    /// Trees differ, or either side failed to parse.
    Unsafe,
}

impl Verdict {
    /// Both verdicts, in merge order (`unsafe` first, `safe` last).
    pub const MERGE_ORDER: [Self; 2] = [Self::Unsafe, Self::Safe];

    /// Artifact tag: `safe` or `unsafe`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Unsafe => "unsafe",
        }
    }

    /// True for `Safe`.
    #[must_use]
    pub fn is_safe(self) -> bool {
        self == Self::Safe
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Why a comparison ended `Unsafe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsafeReason {
    /// The original does not parse.
    OriginalUnparseable(ParseError),
    /// The candidate does not parse.
    CandidateUnparseable(ParseError),
    /// Both parse, normalized trees differ.
    StructureDiffers,
}

impl fmt::Display for UnsafeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OriginalUnparseable(e) => write!(f, "original does not parse: {e}"),
            Self::CandidateUnparseable(e) => write!(f, "candidate does not parse: {e}"),
            Self::StructureDiffers => f.write_str("normalized syntax trees differ"),
        }
    }
}

/// Verdict plus the reason for an `Unsafe` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// The verdict.
    pub verdict: Verdict,
    /// Set exactly when `verdict` is `Unsafe`.
    pub reason: Option<UnsafeReason>,
}

impl Comparison {
    fn safe() -> Self {
        Self {
            verdict: Verdict::Safe,
            reason: None,
        }
    }

    fn unsafe_because(reason: UnsafeReason) -> Self {
        Self {
            verdict: Verdict::Unsafe,
            reason: Some(reason),
        }
    }
}

/// Compare an original and a candidate, keeping the reason.
#[must_use]
pub fn compare(original: &str, candidate: &str) -> Comparison {
    let original = match normalize(original) {
        Ok(unit) => unit,
        Err(e) => return Comparison::unsafe_because(UnsafeReason::OriginalUnparseable(e)),
    };
    let candidate = match normalize(candidate) {
        Ok(unit) => unit,
        Err(e) => return Comparison::unsafe_because(UnsafeReason::CandidateUnparseable(e)),
    };

    if original == candidate {
        Comparison::safe()
    } else {
        Comparison::unsafe_because(UnsafeReason::StructureDiffers)
    }
}

/// Classify a candidate rewrite of `original`.
#[must_use]
pub fn classify(original: &str, candidate: &str) -> Verdict {
    compare(original, candidate).verdict
}

/// Position-free JSON rendering of a normalized tree.
///
/// Used to show where two trees diverge; comparison itself never goes
/// through this text.
///
/// # Errors
/// Propagates `serde_json` serialization failures.
pub fn canonical_dump(unit: &NormalizedUnit) -> serde_json::Result<String> {
    serde_json::to_string_pretty(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_tags() {
        assert_eq!(Verdict::Safe.tag(), "safe");
        assert_eq!(Verdict::Unsafe.to_string(), "unsafe");
        assert_eq!(Verdict::MERGE_ORDER.last(), Some(&Verdict::Safe));
    }

    #[test]
    fn test_reason_only_when_unsafe() {
        assert_eq!(compare("x = 1\n", "x = 1\n").reason, None);
        assert_eq!(
            compare("x = 1\n", "x = 2\n").reason,
            Some(UnsafeReason::StructureDiffers)
        );
    }

    #[test]
    fn test_unparseable_side_is_named() {
        let comparison = compare("x = 1\n", "x = (\n");
        assert!(matches!(
            comparison.reason,
            Some(UnsafeReason::CandidateUnparseable(_))
        ));
    }

    #[test]
    fn test_dump_has_no_positions() {
        let unit = normalize("def f(x: int) -> int:\n    return x\n").unwrap();
        let dump = canonical_dump(&unit).unwrap();
        assert!(dump.contains("\"function_def\""));
        assert!(!dump.contains("line"));
        assert!(!dump.contains("int\""));
    }
}
