//! Tests for verdict explanations.

use anno_edit::{Verdict, explain};

#[test]
fn test_safe_has_no_reason_or_diff() {
    let explanation = explain(
        "def f(x):\n    return x\n",
        "def f(x: int) -> int:\n    \"\"\"Identity.\"\"\"\n    return x\n",
    );
    assert_eq!(explanation.verdict, Verdict::Safe);
    assert!(explanation.reason.is_none());
    assert!(explanation.diff.is_empty());
    assert_eq!(explanation.to_string(), "safe");
}

#[test]
fn test_structural_change_shows_diff() {
    let explanation = explain("x = 1\n", "x = 2\n");
    assert_eq!(explanation.verdict, Verdict::Unsafe);
    assert_eq!(
        explanation.reason.as_deref(),
        Some("normalized syntax trees differ")
    );
    assert!(explanation.diff.contains("-"));
    assert!(explanation.diff.contains("\"1\""));
    assert!(explanation.diff.contains("\"2\""));
}

#[test]
fn test_parse_error_is_reported() {
    let explanation = explain("x = 1\n", "x = (\n");
    assert_eq!(explanation.verdict, Verdict::Unsafe);
    let reason = explanation.reason.expect("reason");
    assert!(reason.starts_with("candidate does not parse"));
    assert!(explanation.diff.is_empty());
}
