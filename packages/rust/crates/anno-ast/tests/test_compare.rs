//! Properties of the Safe/Unsafe comparator.

use anno_ast::{UnsafeReason, Verdict, classify, compare};

const SAMPLES: &[&str] = &[
    "",
    "x = 1\n",
    "def f(x):\n    return x\n",
    "class A:\n    def m(self, *args, **kwargs):\n        return [a for a in args if a]\n",
    "async def run():\n    async with lock:\n        await go()\n",
    "try:\n    pass\nexcept (ValueError, KeyError) as e:\n    raise RuntimeError() from e\n",
    "s = f'{name!r:>10} and {{braces}}'\n",
];

#[test]
fn test_reflexive() {
    for sample in SAMPLES {
        assert_eq!(classify(sample, sample), Verdict::Safe, "sample {sample:?}");
    }
}

#[test]
fn test_adding_types_is_safe() {
    let original = "def f(x):\n    return x\n";
    let candidate = "def f(x: int) -> int:\n    return x\n";
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_removing_types_is_safe() {
    let original = "def f(x: int) -> int:\n    return x\n";
    let candidate = "def f(x):\n    return x\n";
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_adding_docstrings_is_safe() {
    let original = "class A:\n    def m(self):\n        return 1\n";
    let candidate = r#""""Module."""


class A:
    """A thing."""

    def m(self):
        """Return one."""
        return 1
"#;
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_adding_imports_is_safe() {
    let original = "def f(x):\n    return x\n";
    let candidate = "from typing import Any\n\n\ndef f(x: Any) -> Any:\n    return x\n";
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_variable_annotations_are_safe() {
    let original = "count = 0\n";
    let candidate = "count: int = 0\nname: str\n";
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_comments_and_formatting_are_safe() {
    let original = "result = compute(a, b)\n";
    let candidate = "# compute it\nresult = compute(\n    a,\n    b,\n)  # done\n";
    assert_eq!(classify(original, candidate), Verdict::Safe);
}

#[test]
fn test_changed_expression_is_unsafe() {
    let original = "def f(x):\n    return x\n";
    let candidate = "def f(x: int) -> int:\n    return x + 1\n";
    assert_eq!(classify(original, candidate), Verdict::Unsafe);
}

#[test]
fn test_statement_order_matters() {
    let original = "a = 1\nb = 2\n";
    let candidate = "b = 2\na = 1\n";
    assert_eq!(classify(original, candidate), Verdict::Unsafe);
}

#[test]
fn test_renames_are_unsafe() {
    assert_eq!(
        classify("def f(x):\n    return x\n", "def f(y):\n    return y\n"),
        Verdict::Unsafe
    );
    assert_eq!(
        classify("def f(x):\n    return x\n", "def g(x):\n    return x\n"),
        Verdict::Unsafe
    );
}

#[test]
fn test_changed_default_is_unsafe() {
    assert_eq!(
        classify("def f(x=1):\n    pass\n", "def f(x: int = 2):\n    pass\n"),
        Verdict::Unsafe
    );
}

#[test]
fn test_removed_statement_is_unsafe() {
    assert_eq!(
        classify("x = 1\ny = 2\n", "x: int = 1\n"),
        Verdict::Unsafe
    );
}

#[test]
fn test_parse_failure_dominates() {
    let valid = "def f(x):\n    return x\n";
    let broken = "def f(x:\n    return x\n";
    assert_eq!(classify(valid, broken), Verdict::Unsafe);
    assert_eq!(classify(broken, valid), Verdict::Unsafe);
    assert_eq!(classify(broken, broken), Verdict::Unsafe);

    assert!(matches!(
        compare(broken, valid).reason,
        Some(UnsafeReason::OriginalUnparseable(_))
    ));
    assert!(matches!(
        compare(valid, broken).reason,
        Some(UnsafeReason::CandidateUnparseable(_))
    ));
}

#[test]
fn test_generator_output_with_fences_is_unsafe() {
    let original = "x = 1\n";
    let candidate = "```python\nx: int = 1\n```\n";
    assert_eq!(classify(original, candidate), Verdict::Unsafe);
}

fn assert_candidate_rejected(original: &str, candidate: &str) {
    let comparison = compare(original, candidate);
    assert_eq!(comparison.verdict, Verdict::Unsafe, "candidate {candidate:?}");
    assert!(
        matches!(comparison.reason, Some(UnsafeReason::CandidateUnparseable(_))),
        "candidate {candidate:?} gave {:?}",
        comparison.reason
    );
}

#[test]
fn test_annotating_multiple_targets_is_unsafe() {
    assert_candidate_rejected("x, y = 1, 2\n", "x, y: int = 1, 2\n");
    assert_candidate_rejected("(x, y) = 1, 2\n", "(x, y): tuple = 1, 2\n");
    assert_candidate_rejected("[x, y] = 1, 2\n", "[x, y]: list = 1, 2\n");
}

#[test]
fn test_annotating_single_targets_is_safe() {
    assert_eq!(classify("x = 1\n", "(x): int = 1\n"), Verdict::Safe);
    assert_eq!(classify("a.b = 1\n", "a.b: int = 1\n"), Verdict::Safe);
    assert_eq!(classify("a[0] = 1\n", "a[0]: int = 1\n"), Verdict::Safe);
}

#[test]
fn test_parameter_without_default_after_default_is_unsafe() {
    assert_candidate_rejected(
        "def f(a=1, *, b):\n    pass\n",
        "def f(a: int = 1, b: int):\n    pass\n",
    );
    assert_candidate_rejected("f = lambda a=1, *, b: a\n", "f = lambda a=1, b: a\n");
    assert_eq!(
        classify(
            "def f(a=1, *args, b, **kw):\n    pass\n",
            "def f(a: int = 1, *args: int, b: int, **kw: int) -> None:\n    pass\n",
        ),
        Verdict::Safe
    );
}

#[test]
fn test_leading_zero_integer_is_unsafe() {
    assert_candidate_rejected("x = 7\n", "x = 007\n");
    assert_candidate_rejected("x = 7\n", "x = 7L\n");
    assert_eq!(classify("x = 0\n", "x = 00\n"), Verdict::Safe);
}

#[test]
fn test_misordered_call_arguments_are_unsafe() {
    assert_candidate_rejected("f(*a, **k)\n", "f(**k, *a)\n");
    assert_candidate_rejected("f(b, a=1)\n", "f(a=1, b)\n");
    assert_eq!(classify("f(a=1, *b)\n", "f(a=1, *b)\n"), Verdict::Safe);
}

#[test]
fn test_deleting_a_call_is_unsafe() {
    assert_candidate_rejected("del x\n", "del f()\n");
    assert_eq!(classify("del a, b[0]\n", "del (a), b[0]\n"), Verdict::Safe);
}

#[test]
fn test_python2_print_is_unsafe() {
    assert_candidate_rejected("print('x')\n", "print 'x'\n");
}
