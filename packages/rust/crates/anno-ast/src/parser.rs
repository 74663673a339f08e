//! Tree-sitter based Python parser.
//!
//! Parses with `tree-sitter-python` and lowers the concrete syntax tree
//! into [`SyntaxNode`]. Lowering keeps what Python's abstract syntax
//! keeps and drops the rest: comments, line continuations, grouping
//! parentheses, brackets and separating commas.

use tree_sitter::{Language, Node, Parser};

use crate::error::ParseError;
use crate::literal::{StrPrefix, canonical_float, canonical_integer};
use crate::tree::{BLOCK_KIND, Parameter, ParameterKind, StrKind, StrPiece, SyntaxNode};
use crate::validate::first_rejection;

/// Anonymous tokens that only delimit or group.
const PUNCTUATION: &[&str] = &["(", ")", "[", "]", "{", "}", ",", "."];

const SNIPPET_LIMIT: usize = 40;

/// Tree-sitter based Python parser.
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new parser.
    ///
    /// # Errors
    /// `ParseError::Grammar` when the bundled grammar is incompatible with
    /// the linked tree-sitter runtime.
    pub fn new() -> Result<Self, ParseError> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source` into a `Module` node.
    ///
    /// # Errors
    /// `ParseError::Syntax` pointing at the first `ERROR` or `MISSING`
    /// node, or `ParseError::Invalid` for a construct the grammar accepts
    /// but Python rejects (`x, y: int = 1, 2`, `def f(a=1, b)`, `007`).
    pub fn parse(&mut self, source: &str) -> Result<SyntaxNode, ParseError> {
        let tree = self.parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            let position = bad.start_position();
            let snippet: String = bad
                .utf8_text(source.as_bytes())
                .unwrap_or("")
                .chars()
                .take(SNIPPET_LIMIT)
                .collect();
            return Err(ParseError::Syntax {
                line: position.row + 1,
                column: position.column + 1,
                snippet,
            });
        }

        if let Some(rejection) = first_rejection(root, source.as_bytes()) {
            let position = rejection.node.start_position();
            return Err(ParseError::Invalid {
                line: position.row + 1,
                column: position.column + 1,
                message: rejection.message.to_string(),
            });
        }

        let lowering = Lowering {
            source: source.as_bytes(),
        };
        Ok(SyntaxNode::Module {
            body: lowering.statements(root),
        })
    }
}

/// Parse Python source into a `Module` node.
///
/// # Errors
/// See [`PythonParser::parse`].
pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    PythonParser::new()?.parse(source)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if (child.is_error() || child.is_missing() || child.has_error())
            && let Some(found) = first_error(child)
        {
            return Some(found);
        }
    }
    None
}

/// Children that carry syntax: no comments, no line continuations.
fn significant_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    significant_children(node)
        .into_iter()
        .filter(Node::is_named)
        .collect()
}

fn has_comma(node: Node<'_>) -> bool {
    significant_children(node)
        .iter()
        .any(|child| child.kind() == ",")
}

struct Lowering<'s> {
    source: &'s [u8],
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    /// Whitespace-collapsed text, for names written across lines.
    fn compact_text(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn statements(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        named_children(node)
            .into_iter()
            .map(|child| self.lower(child))
            .collect()
    }

    fn lower(&self, node: Node<'_>) -> SyntaxNode {
        match node.kind() {
            "function_definition" => self.function(node, Vec::new()),
            "class_definition" => self.class(node, Vec::new()),
            "decorated_definition" => self.decorated(node),
            "expression_statement" => self.expression_statement(node),
            "import_statement" => SyntaxNode::Import {
                names: self.field_texts(node, "name"),
            },
            "import_from_statement" => self.import_from(node),
            "future_import_statement" => SyntaxNode::ImportFrom {
                module: "__future__".to_string(),
                names: self.field_texts(node, "name"),
            },
            BLOCK_KIND => SyntaxNode::Syntax {
                kind: BLOCK_KIND.to_string(),
                children: self.statements(node),
            },
            "lambda" => SyntaxNode::Lambda {
                parameters: node
                    .child_by_field_name("parameters")
                    .map(|p| self.parameters(p))
                    .unwrap_or_default(),
                body: Box::new(
                    node.child_by_field_name("body")
                        .map_or_else(|| self.generic(node), |b| self.lower(b)),
                ),
            },
            "parenthesized_expression" | "type" => self.unwrap_single(node),
            // `(x) = 1` binds `x`, not a one-element tuple.
            "tuple_pattern" if !has_comma(node) && named_children(node).len() == 1 => {
                self.unwrap_single(node)
            }
            "expression_list" | "pattern_list" | "tuple_pattern" => self.renamed(node, "tuple"),
            "list_pattern" => self.renamed(node, "list"),
            "string" | "concatenated_string" => self.string(node),
            "integer" => SyntaxNode::token("integer", canonical_integer(self.text(node))),
            "float" => SyntaxNode::token("float", canonical_float(self.text(node))),
            _ => self.generic(node),
        }
    }

    fn generic(&self, node: Node<'_>) -> SyntaxNode {
        if node.child_count() == 0 {
            return SyntaxNode::token(node.kind(), self.text(node));
        }

        let keep_commas = node.kind() == "subscript";
        let children = significant_children(node)
            .into_iter()
            .filter_map(|child| {
                if child.is_named() {
                    Some(self.lower(child))
                } else if PUNCTUATION.contains(&child.kind()) && !(keep_commas && child.kind() == ",")
                {
                    None
                } else {
                    Some(SyntaxNode::token(child.kind(), child.kind()))
                }
            })
            .collect();

        SyntaxNode::Syntax {
            kind: node.kind().to_string(),
            children,
        }
    }

    fn renamed(&self, node: Node<'_>, kind: &str) -> SyntaxNode {
        match self.generic(node) {
            SyntaxNode::Syntax { children, .. } => SyntaxNode::Syntax {
                kind: kind.to_string(),
                children,
            },
            other => other,
        }
    }

    fn unwrap_single(&self, node: Node<'_>) -> SyntaxNode {
        match named_children(node).as_slice() {
            [inner] => self.lower(*inner),
            _ => self.generic(node),
        }
    }

    fn field_texts(&self, node: Node<'_>, field: &str) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor)
            .map(|child| self.compact_text(child))
            .collect()
    }

    fn import_from(&self, node: Node<'_>) -> SyntaxNode {
        let module = node
            .child_by_field_name("module_name")
            .map(|m| self.compact_text(m))
            .unwrap_or_default();
        let mut names = self.field_texts(node, "name");
        if named_children(node)
            .iter()
            .any(|child| child.kind() == "wildcard_import")
        {
            names.push("*".to_string());
        }
        SyntaxNode::ImportFrom { module, names }
    }

    fn decorated(&self, node: Node<'_>) -> SyntaxNode {
        let decorators: Vec<SyntaxNode> = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .map(|decorator| self.unwrap_single(decorator))
            .collect();

        match node.child_by_field_name("definition") {
            Some(def) if def.kind() == "function_definition" => self.function(def, decorators),
            Some(def) if def.kind() == "class_definition" => self.class(def, decorators),
            _ => self.generic(node),
        }
    }

    fn function(&self, node: Node<'_>, decorators: Vec<SyntaxNode>) -> SyntaxNode {
        let is_async = significant_children(node)
            .iter()
            .any(|child| !child.is_named() && child.kind() == "async");

        SyntaxNode::FunctionDef {
            is_async,
            decorators,
            name: self.field_text(node, "name"),
            type_params: self.boxed_field(node, "type_parameters"),
            parameters: node
                .child_by_field_name("parameters")
                .map(|p| self.parameters(p))
                .unwrap_or_default(),
            returns: self.boxed_field(node, "return_type"),
            body: self.body(node),
        }
    }

    fn class(&self, node: Node<'_>, decorators: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::ClassDef {
            decorators,
            name: self.field_text(node, "name"),
            type_params: self.boxed_field(node, "type_parameters"),
            arguments: self.boxed_field(node, "superclasses"),
            body: self.body(node),
        }
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
            .unwrap_or_default()
    }

    fn boxed_field(&self, node: Node<'_>, field: &str) -> Option<Box<SyntaxNode>> {
        node.child_by_field_name(field)
            .map(|child| Box::new(self.lower(child)))
    }

    fn body(&self, node: Node<'_>) -> Vec<SyntaxNode> {
        node.child_by_field_name("body")
            .map(|block| self.statements(block))
            .unwrap_or_default()
    }

    fn parameters(&self, node: Node<'_>) -> Vec<Parameter> {
        named_children(node)
            .into_iter()
            .map(|child| self.parameter(child))
            .collect()
    }

    fn parameter(&self, node: Node<'_>) -> Parameter {
        match node.kind() {
            "identifier" => self.plain_parameter(ParameterKind::Positional, node),
            "list_splat_pattern" => self.plain_parameter(ParameterKind::VarPositional, node),
            "dictionary_splat_pattern" => self.plain_parameter(ParameterKind::VarKeyword, node),
            "keyword_separator" => Parameter::separator(ParameterKind::KeywordSeparator),
            "positional_separator" => Parameter::separator(ParameterKind::PositionalSeparator),
            "typed_parameter" => {
                // The bound name (or splat) precedes the `type` field.
                let mut parameter = match named_children(node).first() {
                    Some(inner) if inner.kind() != "type" => self.parameter(*inner),
                    _ => self.plain_parameter(ParameterKind::Positional, node),
                };
                parameter.annotation = node.child_by_field_name("type").map(|t| self.lower(t));
                parameter
            }
            "default_parameter" | "typed_default_parameter" => Parameter {
                kind: ParameterKind::Positional,
                name: self.field_text(node, "name"),
                annotation: node.child_by_field_name("type").map(|t| self.lower(t)),
                default: node.child_by_field_name("value").map(|v| self.lower(v)),
            },
            _ => self.plain_parameter(ParameterKind::Positional, node),
        }
    }

    fn plain_parameter(&self, kind: ParameterKind, node: Node<'_>) -> Parameter {
        let name = match kind {
            ParameterKind::VarPositional | ParameterKind::VarKeyword => named_children(node)
                .first()
                .map_or_else(|| self.compact_text(node), |inner| self.compact_text(*inner)),
            _ => self.compact_text(node),
        };
        Parameter {
            kind,
            name,
            annotation: None,
            default: None,
        }
    }

    fn expression_statement(&self, node: Node<'_>) -> SyntaxNode {
        let children = named_children(node);
        match children.as_slice() {
            [single] if single.kind() == "assignment" => self.assignment(*single),
            [single] => SyntaxNode::Expr {
                value: Box::new(self.lower(*single)),
            },
            _ => SyntaxNode::Expr {
                value: Box::new(SyntaxNode::Syntax {
                    kind: "tuple".to_string(),
                    children: children.into_iter().map(|c| self.lower(c)).collect(),
                }),
            },
        }
    }

    fn assignment(&self, node: Node<'_>) -> SyntaxNode {
        let Some(left) = node.child_by_field_name("left") else {
            return self.generic(node);
        };

        if let Some(annotation) = node.child_by_field_name("type") {
            return SyntaxNode::AnnAssign {
                target: Box::new(self.lower(left)),
                annotation: Box::new(self.lower(annotation)),
                value: self.boxed_field(node, "right"),
            };
        }

        let mut targets = vec![self.lower(left)];
        let mut value = node.child_by_field_name("right");
        while let Some(chained) = value
            .filter(|v| v.kind() == "assignment" && v.child_by_field_name("type").is_none())
        {
            if let Some(target) = chained.child_by_field_name("left") {
                targets.push(self.lower(target));
            }
            value = chained.child_by_field_name("right");
        }

        match value {
            Some(value) => SyntaxNode::Assign {
                targets,
                value: Box::new(self.lower(value)),
            },
            None => self.generic(node),
        }
    }

    fn string(&self, node: Node<'_>) -> SyntaxNode {
        let mut kind = StrKind::Text;
        let mut pieces = Vec::new();

        let parts = if node.kind() == "concatenated_string" {
            named_children(node)
        } else {
            vec![node]
        };

        for (index, part) in parts.into_iter().enumerate() {
            let mut prefix = StrPrefix::default();
            for child in significant_children(part) {
                match child.kind() {
                    "string_start" => {
                        prefix = StrPrefix::from_delimiter(self.text(child));
                        if index == 0 || prefix.kind() == StrKind::Format {
                            kind = prefix.kind();
                        }
                    }
                    "string_end" => {}
                    "interpolation" => {
                        pieces.push(StrPiece::Interpolation(self.generic(child)));
                    }
                    _ => push_text(&mut pieces, prefix.decode(self.text(child))),
                }
            }
        }

        SyntaxNode::Str { kind, pieces }
    }
}

/// Append text, merging with a preceding text run.
fn push_text(pieces: &mut Vec<StrPiece>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(StrPiece::Text(last)) = pieces.last_mut() {
        last.push_str(&text);
    } else {
        pieces.push(StrPiece::Text(text));
    }
}
