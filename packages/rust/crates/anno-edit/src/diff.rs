//! Diff generation utilities.
//!
//! Line diffs with `similar`, used to show where two normalized trees
//! part ways.

use std::fmt::Write as _;

use similar::{ChangeTag, TextDiff};

const CONTEXT_LINES: usize = 3;

/// Generate a unified diff between two strings.
///
/// Each hunk opens with an `@@ -start,len +start,len @@` header and
/// carries three lines of context. Lines are prefixed with `-`, `+` or a
/// space. Identical inputs give an empty string.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    for group in diff.grouped_ops(CONTEXT_LINES) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let old_len = last.old_range().end - old_start;
        let new_len = last.new_range().end - new_start;
        let _ = writeln!(
            output,
            "@@ -{},{old_len} +{},{new_len} @@",
            old_start + 1,
            new_start + 1
        );

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                output.push(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}
