//! Syntax tree model.
//!
//! A closed set of node kinds covering what the normalizer needs to see
//! (scopes, assignments, imports, string literals, parameters). Every
//! other construct is kept as a generic `Syntax` node so that nothing the
//! parser saw is lost. Nodes carry no source positions.

use serde::Serialize;

/// Kind name of generic nodes that hold a statement list.
pub const BLOCK_KIND: &str = "block";

/// A node of a parsed Python module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum SyntaxNode {
    /// Root of a file.
    Module {
        /// Top-level statements in source order.
        body: Vec<SyntaxNode>,
    },
    /// `class` statement, decorators folded in.
    ClassDef {
        /// Decorator expressions, outermost first.
        decorators: Vec<SyntaxNode>,
        /// Class name.
        name: String,
        /// PEP 695 type parameter list.
        type_params: Option<Box<SyntaxNode>>,
        /// Base classes and keywords (`argument_list`).
        arguments: Option<Box<SyntaxNode>>,
        /// Class body.
        body: Vec<SyntaxNode>,
    },
    /// `def` / `async def` statement, decorators folded in.
    FunctionDef {
        /// `async def`.
        is_async: bool,
        /// Decorator expressions, outermost first.
        decorators: Vec<SyntaxNode>,
        /// Function name.
        name: String,
        /// PEP 695 type parameter list.
        type_params: Option<Box<SyntaxNode>>,
        /// Parameter list, separators included.
        parameters: Vec<Parameter>,
        /// Return annotation.
        returns: Option<Box<SyntaxNode>>,
        /// Function body.
        body: Vec<SyntaxNode>,
    },
    /// `lambda` expression.
    Lambda {
        /// Parameter list, separators included.
        parameters: Vec<Parameter>,
        /// Body expression.
        body: Box<SyntaxNode>,
    },
    /// Plain assignment; `a = b = v` has two targets.
    Assign {
        /// Targets, left to right.
        targets: Vec<SyntaxNode>,
        /// Assigned value.
        value: Box<SyntaxNode>,
    },
    /// Annotated assignment `target: annotation [= value]`.
    AnnAssign {
        /// Assignment target.
        target: Box<SyntaxNode>,
        /// Annotation expression.
        annotation: Box<SyntaxNode>,
        /// Optional value.
        value: Option<Box<SyntaxNode>>,
    },
    /// `import a.b as c, d`.
    Import {
        /// Imported names with their aliases, as written.
        names: Vec<String>,
    },
    /// `from m import a as b` (`from __future__` included).
    ImportFrom {
        /// Source module, leading dots kept.
        module: String,
        /// Imported names with their aliases, `*` for wildcard imports.
        names: Vec<String>,
    },
    /// Expression statement.
    Expr {
        /// The expression.
        value: Box<SyntaxNode>,
    },
    /// String literal with quotes removed and escapes decoded.
    Str {
        /// Literal flavour.
        kind: StrKind,
        /// Text runs and f-string interpolations.
        pieces: Vec<StrPiece>,
    },
    /// Any other construct, children in source order.
    Syntax {
        /// tree-sitter node kind.
        kind: String,
        /// Children, punctuation and comments dropped.
        children: Vec<SyntaxNode>,
    },
    /// Leaf: identifier, number, keyword or operator.
    Token {
        /// tree-sitter node kind.
        kind: String,
        /// Canonical text.
        text: String,
    },
}

/// Flavour of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrKind {
    /// `"..."`, `r"..."`, `u"..."`.
    Text,
    /// `b"..."`.
    Bytes,
    /// `f"..."` and `t"..."`.
    Format,
}

/// Part of a string literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "piece", content = "value", rename_all = "snake_case")]
pub enum StrPiece {
    /// Literal text.
    Text(String),
    /// `{expr!r:spec}` inside an f-string.
    Interpolation(SyntaxNode),
}

/// One entry of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// Position class of the entry.
    pub kind: ParameterKind,
    /// Bound name (empty for separators).
    pub name: String,
    /// Type annotation.
    pub annotation: Option<SyntaxNode>,
    /// Default value.
    pub default: Option<SyntaxNode>,
}

/// Position class of a parameter list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Named parameter; keyword-only when it follows a `*` entry.
    Positional,
    /// `*args`.
    VarPositional,
    /// `**kwargs`.
    VarKeyword,
    /// Bare `*`.
    KeywordSeparator,
    /// Bare `/`.
    PositionalSeparator,
}

impl Parameter {
    /// Separator entry (`*` or `/`).
    #[must_use]
    pub fn separator(kind: ParameterKind) -> Self {
        Self {
            kind,
            name: String::new(),
            annotation: None,
            default: None,
        }
    }
}

impl SyntaxNode {
    /// Leaf constructor.
    #[must_use]
    pub fn token(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Token {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// Statement list of a scope, if this node opens one.
    #[must_use]
    pub fn body(&self) -> Option<&[SyntaxNode]> {
        match self {
            Self::Module { body } | Self::ClassDef { body, .. } | Self::FunctionDef { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// True for an expression statement holding a plain (non-bytes,
    /// non-f) string literal.
    #[must_use]
    pub fn is_docstring(&self) -> bool {
        match self {
            Self::Expr { value } => matches!(
                value.as_ref(),
                Self::Str {
                    kind: StrKind::Text,
                    ..
                }
            ),
            _ => false,
        }
    }
}
