//! Annotation-insensitive normalization.
//!
//! A pure transform: every function here reads a borrowed tree and builds
//! a fresh one. Removed in every scope:
//!
//! - parameter and return annotations (lambdas included)
//! - the leading docstring of a module, class or function body
//! - `import` / `from ... import` statements, at any depth
//! - annotated assignments without a value
//!
//! Annotated assignments with a value become plain assignments.

use serde::Serialize;

use crate::error::ParseError;
use crate::parser::parse;
use crate::tree::{BLOCK_KIND, Parameter, StrPiece, SyntaxNode};

/// A parsed module with every cosmetic construct stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedUnit {
    root: SyntaxNode,
}

impl NormalizedUnit {
    /// The normalized `Module` node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Consume the unit, returning the normalized `Module` node.
    #[must_use]
    pub fn into_root(self) -> SyntaxNode {
        self.root
    }
}

/// Parse and normalize Python source.
///
/// # Errors
/// The `ParseError` of [`parse`] when `source` is not valid Python.
pub fn normalize(source: &str) -> Result<NormalizedUnit, ParseError> {
    let module = parse(source)?;
    Ok(NormalizedUnit {
        root: strip_node(&module),
    })
}

/// Normalize an already parsed node.
///
/// Returns `None` when the node itself is a construct that normalization
/// removes (an import or a bare annotation).
#[must_use]
pub fn normalize_tree(node: &SyntaxNode) -> Option<SyntaxNode> {
    strip_statement(node)
}

fn strip_statement(node: &SyntaxNode) -> Option<SyntaxNode> {
    match node {
        SyntaxNode::Import { .. }
        | SyntaxNode::ImportFrom { .. }
        | SyntaxNode::AnnAssign { value: None, .. } => None,
        SyntaxNode::AnnAssign {
            target,
            value: Some(value),
            ..
        } => Some(SyntaxNode::Assign {
            targets: vec![strip_node(target)],
            value: Box::new(strip_node(value)),
        }),
        _ => Some(strip_node(node)),
    }
}

fn strip_node(node: &SyntaxNode) -> SyntaxNode {
    match node {
        SyntaxNode::Module { body } => SyntaxNode::Module {
            body: strip_scope(body),
        },
        SyntaxNode::ClassDef {
            decorators,
            name,
            type_params,
            arguments,
            body,
        } => SyntaxNode::ClassDef {
            decorators: decorators.iter().map(strip_node).collect(),
            name: name.clone(),
            type_params: strip_boxed(type_params.as_deref()),
            arguments: strip_boxed(arguments.as_deref()),
            body: strip_scope(body),
        },
        SyntaxNode::FunctionDef {
            is_async,
            decorators,
            name,
            type_params,
            parameters,
            returns: _,
            body,
        } => SyntaxNode::FunctionDef {
            is_async: *is_async,
            decorators: decorators.iter().map(strip_node).collect(),
            name: name.clone(),
            type_params: strip_boxed(type_params.as_deref()),
            parameters: parameters.iter().map(strip_parameter).collect(),
            returns: None,
            body: strip_scope(body),
        },
        SyntaxNode::Lambda { parameters, body } => SyntaxNode::Lambda {
            parameters: parameters.iter().map(strip_parameter).collect(),
            body: Box::new(strip_node(body)),
        },
        SyntaxNode::Assign { targets, value } => SyntaxNode::Assign {
            targets: targets.iter().map(strip_node).collect(),
            value: Box::new(strip_node(value)),
        },
        // Only reachable outside statement position, where nothing is removed.
        SyntaxNode::AnnAssign { .. } | SyntaxNode::Import { .. } | SyntaxNode::ImportFrom { .. } => {
            strip_statement(node).unwrap_or_else(|| node.clone())
        }
        SyntaxNode::Expr { value } => SyntaxNode::Expr {
            value: Box::new(strip_node(value)),
        },
        SyntaxNode::Str { kind, pieces } => SyntaxNode::Str {
            kind: *kind,
            pieces: pieces
                .iter()
                .map(|piece| match piece {
                    StrPiece::Text(text) => StrPiece::Text(text.clone()),
                    StrPiece::Interpolation(expr) => StrPiece::Interpolation(strip_node(expr)),
                })
                .collect(),
        },
        SyntaxNode::Syntax { kind, children } if kind == BLOCK_KIND => SyntaxNode::Syntax {
            kind: kind.clone(),
            children: strip_block(children),
        },
        SyntaxNode::Syntax { kind, children } => SyntaxNode::Syntax {
            kind: kind.clone(),
            children: children.iter().map(strip_node).collect(),
        },
        SyntaxNode::Token { .. } => node.clone(),
    }
}

fn strip_boxed(node: Option<&SyntaxNode>) -> Option<Box<SyntaxNode>> {
    node.map(|n| Box::new(strip_node(n)))
}

fn strip_block(statements: &[SyntaxNode]) -> Vec<SyntaxNode> {
    statements.iter().filter_map(strip_statement).collect()
}

/// Body of a module, class or function: children first, then the
/// docstring of what remains.
fn strip_scope(statements: &[SyntaxNode]) -> Vec<SyntaxNode> {
    let mut body = strip_block(statements);
    if body.first().is_some_and(SyntaxNode::is_docstring) {
        body.remove(0);
    }
    body
}

fn strip_parameter(parameter: &Parameter) -> Parameter {
    Parameter {
        kind: parameter.kind,
        name: parameter.name.clone(),
        annotation: None,
        default: parameter.default.as_ref().map(strip_node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(source: &str) -> SyntaxNode {
        normalize(source).unwrap().into_root()
    }

    #[test]
    fn test_bare_annotation_removed() {
        assert_eq!(normalized("x: int\ny = 1\n"), normalized("y = 1\n"));
    }

    #[test]
    fn test_annotated_assignment_becomes_plain() {
        assert_eq!(normalized("x: int = 1\n"), normalized("x = 1\n"));
    }

    #[test]
    fn test_chained_assignment_not_confused_with_single() {
        assert_ne!(normalized("a = b = 1\n"), normalized("a = 1\n"));
    }

    #[test]
    fn test_normalize_tree_drops_import() {
        let import = SyntaxNode::Import {
            names: vec!["os".to_string()],
        };
        assert_eq!(normalize_tree(&import), None);
    }

    #[test]
    fn test_docstring_after_removed_import() {
        let with_import = "def f():\n    import os\n    'doc'\n    return 1\n";
        let without = "def f():\n    return 1\n";
        assert_eq!(normalized(with_import), normalized(without));
    }

    #[test]
    fn test_second_string_statement_kept() {
        let source = "def f():\n    'doc'\n    'sentinel'\n";
        let SyntaxNode::Module { body } = normalized(source) else {
            panic!("expected module");
        };
        let Some(SyntaxNode::FunctionDef { body, .. }) = body.first() else {
            panic!("expected function");
        };
        assert_eq!(body.len(), 1);
    }
}
