//! Checks for programs the tree-sitter grammar accepts but Python does not.
//!
//! `tree-sitter-python` is a permissive grammar: it recovers Python 2
//! statements and leaves several target and ordering rules to the
//! compiler. Each rule here mirrors a `SyntaxError` raised by Python's own
//! parser, so a rewrite that would no longer import is never `Safe`.

use tree_sitter::Node;

/// A node Python's parser would reject, with the reason.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rejection<'t> {
    pub(crate) node: Node<'t>,
    pub(crate) message: &'static str,
}

/// First rejected node under `root`, in source order.
pub(crate) fn first_rejection<'t>(root: Node<'t>, source: &[u8]) -> Option<Rejection<'t>> {
    if let Some(message) = check_node(root, source) {
        return Some(Rejection {
            node: root,
            message,
        });
    }
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        if let Some(found) = first_rejection(child, source) {
            return Some(found);
        }
    }
    None
}

fn check_node(node: Node<'_>, source: &[u8]) -> Option<&'static str> {
    match node.kind() {
        "print_statement" => Some("print is a function"),
        "exec_statement" => Some("exec is a function"),
        "assignment" => check_annotated_target(node),
        "augmented_assignment" => node
            .child_by_field_name("left")
            .filter(|left| !is_single_target(*left))
            .map(|_| "illegal expression for augmented assignment"),
        "parameters" | "lambda_parameters" => check_parameter_order(node),
        "argument_list" => check_argument_order(node),
        "delete_statement" => named(node)
            .into_iter()
            .any(|target| !is_delete_target(target))
            .then_some("cannot delete expression"),
        "integer" => check_integer(node.utf8_text(source).unwrap_or("")),
        _ => None,
    }
}

fn named(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn has_comma(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|child| child.kind() == ",")
}

/// A name, attribute or subscript, possibly wrapped in parentheses.
fn is_single_target(node: Node<'_>) -> bool {
    match node.kind() {
        "identifier" | "keyword_identifier" | "attribute" | "subscript" => true,
        "parenthesized_expression" | "tuple_pattern" if !has_comma(node) => {
            matches!(named(node).as_slice(), [inner] if is_single_target(*inner))
        }
        _ => false,
    }
}

fn check_annotated_target(node: Node<'_>) -> Option<&'static str> {
    node.child_by_field_name("type")?;
    let left = node.child_by_field_name("left")?;
    (!is_single_target(left)).then_some("only single target can be annotated")
}

fn is_delete_target(node: Node<'_>) -> bool {
    match node.kind() {
        "identifier" | "keyword_identifier" | "attribute" | "subscript" => true,
        "parenthesized_expression" | "tuple" | "list" | "expression_list" => {
            named(node).into_iter().all(is_delete_target)
        }
        _ => false,
    }
}

/// Positional parameters after a defaulted one must have defaults, until
/// the first `*`, `*args` or `**kwargs`.
fn check_parameter_order(node: Node<'_>) -> Option<&'static str> {
    let mut seen_default = false;
    for parameter in named(node) {
        let bound = match parameter.kind() {
            "typed_parameter" => named(parameter)
                .first()
                .map_or("identifier", |inner| inner.kind()),
            kind => kind,
        };
        match bound {
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                return None;
            }
            "tuple_pattern" => return Some("tuple parameters are not supported"),
            "default_parameter" | "typed_default_parameter" => seen_default = true,
            "positional_separator" => {}
            _ if seen_default => return Some("parameter without a default follows parameter with a default"),
            _ => {}
        }
    }
    None
}

/// Call arguments: positional before keyword, no `*x` after `**y`.
fn check_argument_order(node: Node<'_>) -> Option<&'static str> {
    let mut seen_keyword = false;
    let mut seen_double_splat = false;
    for argument in named(node) {
        match argument.kind() {
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => seen_double_splat = true,
            "list_splat" if seen_double_splat => {
                return Some("iterable argument unpacking follows keyword argument unpacking");
            }
            "list_splat" => {}
            _ if seen_double_splat => {
                return Some("positional argument follows keyword argument unpacking");
            }
            _ if seen_keyword => return Some("positional argument follows keyword argument"),
            _ => {}
        }
    }
    None
}

fn check_integer(text: &str) -> Option<&'static str> {
    if text.ends_with(['l', 'L']) {
        return Some("long integer suffix is not supported");
    }
    let digits = text.strip_suffix(['j', 'J']).unwrap_or(text);
    if digits.ends_with('_') {
        return Some("invalid decimal literal");
    }
    let is_prefixed = digits.len() > 1
        && digits.starts_with('0')
        && digits[1..].starts_with(['x', 'X', 'o', 'O', 'b', 'B']);
    // Imaginary literals may have leading zeros.
    if is_prefixed || digits.len() < text.len() {
        return None;
    }
    let leading_zero = digits.starts_with('0') && digits.chars().any(|c| c.is_ascii_digit() && c != '0');
    leading_zero.then_some("leading zeros in decimal integer literals are not permitted")
}
