// Copyright (C) Brian G. Milnes 2025

//! Helpers shared by expression-rewriting recipes

use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    ancestors, annotation_name, annotations, body_members, children, find_nodes,
    find_nodes_where, has_modifier, is_in_header, is_primary, named_children, node_text,
    TYPE_DECLARATION_KINDS,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::types::types::{TypeContext, TypeMatcher};

pub const PREC_LAMBDA: u8 = 0;
pub const PREC_TERNARY: u8 = 1;
pub const PREC_UNARY: u8 = 13;
pub const PREC_PRIMARY: u8 = 14;

/// Binding strength of a binary operator, higher binds tighter
pub fn operator_precedence(operator: &str) -> u8 {
    match operator {
        "||" => 2,
        "&&" => 3,
        "|" => 4,
        "^" => 5,
        "&" => 6,
        "==" | "!=" => 7,
        "<" | "<=" | ">" | ">=" | "instanceof" => 8,
        "<<" | ">>" | ">>>" => 9,
        "+" | "-" => 10,
        "*" | "/" | "%" => 11,
        _ => PREC_LAMBDA,
    }
}

pub fn expression_precedence(expr: Node, source: &str) -> u8 {
    match expr.kind() {
        "binary_expression" => expr
            .child_by_field_name("operator")
            .map(|op| operator_precedence(node_text(op, source)))
            .unwrap_or(PREC_LAMBDA),
        "instanceof_expression" => 8,
        "unary_expression" | "cast_expression" | "update_expression" => PREC_UNARY,
        "ternary_expression" => PREC_TERNARY,
        "assignment_expression" | "lambda_expression" => PREC_LAMBDA,
        _ if is_primary(expr) => PREC_PRIMARY,
        _ => PREC_LAMBDA,
    }
}

fn is_field(parent: Node, field: &str, child: Node) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == child.id())
}

/// The weakest expression that can stand where `target` stands without parentheses
pub fn required_precedence(target: Node, source: &str) -> u8 {
    let Some(parent) = target.parent() else {
        return PREC_LAMBDA;
    };
    match parent.kind() {
        "binary_expression" => {
            let p = parent
                .child_by_field_name("operator")
                .map(|op| operator_precedence(node_text(op, source)))
                .unwrap_or(PREC_PRIMARY);
            if is_field(parent, "left", target) {
                p
            } else {
                p + 1
            }
        }
        "instanceof_expression" => 8,
        "unary_expression" | "cast_expression" | "update_expression" => PREC_UNARY,
        "ternary_expression" => {
            if is_field(parent, "condition", target) {
                PREC_TERNARY + 1
            } else {
                PREC_TERNARY
            }
        }
        "method_invocation" | "field_access" | "array_access" | "method_reference" => {
            if is_field(parent, "object", target) || is_field(parent, "array", target) {
                PREC_PRIMARY
            } else {
                PREC_LAMBDA
            }
        }
        _ => PREC_LAMBDA,
    }
}

/// Text to put in place of `target`, parenthesized when the slot needs it
pub fn fit(target: Node, precedence: u8, text: String, source: &str) -> String {
    if precedence < required_precedence(target, source) {
        format!("({text})")
    } else {
        text
    }
}

/// Replacement text taken from an existing expression node
pub fn fit_node(target: Node, replacement: Node, source: &str) -> String {
    fit(
        target,
        expression_precedence(replacement, source),
        node_text(replacement, source).to_string(),
        source,
    )
}

/// `!expr`, parenthesizing the operand when needed
pub fn negate(expr: Node, source: &str) -> String {
    let text = node_text(expr, source);
    if expression_precedence(expr, source) >= PREC_UNARY {
        format!("!{text}")
    } else {
        format!("!({text})")
    }
}

/// Annotation packages whose processors generate code that reads members
const CODEGEN_ANNOTATIONS: &[&str] = &["lombok..*"];

/// A method in the type's own body is `native`
pub fn has_native_method(type_decl: Node) -> bool {
    let Some(body) = type_decl.child_by_field_name("body") else {
        return false;
    };
    body_members(body)
        .into_iter()
        .any(|m| m.kind() == "method_declaration" && has_modifier(m, "native"))
}

/// The type or one of its enclosing types carries a code-generation annotation
pub fn is_generated_type(type_decl: Node, types: &TypeContext, source: &str) -> bool {
    let matchers: Vec<TypeMatcher> = CODEGEN_ANNOTATIONS
        .iter()
        .filter_map(|p| TypeMatcher::new(p).ok())
        .collect();
    let lombok_wildcard = types.wildcard_imports().iter().any(|w| w.starts_with("lombok"));

    std::iter::once(type_decl)
        .chain(ancestors(type_decl))
        .filter(|n| TYPE_DECLARATION_KINDS.contains(&n.kind()))
        .flat_map(annotations)
        .any(|ann| {
            let Some(name) = annotation_name(ann, source) else {
                return false;
            };
            match types.resolve(name) {
                Some(fqn) => matchers.iter().any(|m| m.matches(&fqn)),
                None => lombok_wildcard,
            }
        })
}

/// Import lines for `simple_names` that nothing outside `removed` refers to anymore
pub fn dead_imports(
    unit: &CompilationUnit,
    simple_names: &[String],
    removed: &[(usize, usize)],
) -> Vec<(usize, usize)> {
    let source = unit.source();
    let root = unit.root();
    let outside_removed = |n: Node| {
        !removed
            .iter()
            .any(|(s, e)| *s <= n.start_byte() && n.end_byte() <= *e)
    };

    let mut dead = Vec::new();
    for import in named_children(root)
        .into_iter()
        .filter(|n| n.kind() == "import_declaration")
    {
        let kids = children(import);
        if kids.iter().any(|k| matches!(k.kind(), "static" | "asterisk")) {
            continue;
        }
        let Some(path) = kids
            .iter()
            .find(|k| matches!(k.kind(), "identifier" | "scoped_identifier"))
        else {
            continue;
        };
        let simple = node_text(*path, source).rsplit('.').next().unwrap_or_default();
        if !simple_names.iter().any(|n| n == simple) {
            continue;
        }

        let still_used = find_nodes_where(root, |n| {
            matches!(n.kind(), "type_identifier" | "identifier") && node_text(n, source) == simple
        })
        .into_iter()
        .any(|n| !is_in_header(n) && outside_removed(n));

        if !still_used {
            dead.push((import.start_byte(), import.end_byte()));
        }
    }
    dead
}

/// Simple type names mentioned inside a declaration
pub fn type_names_in(decl: Node, source: &str) -> Vec<String> {
    let mut names: Vec<String> = find_nodes(decl, "type_identifier")
        .into_iter()
        .map(|n| node_text(n, source).to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Remove a single token along with the spaces that separate it from its neighbour
pub fn delete_token(token: Node, source: &str) -> TextEdit {
    let after = source[token.end_byte()..]
        .find(|c: char| c != ' ' && c != '\t')
        .map(|p| token.end_byte() + p)
        .unwrap_or(source.len());
    if after < source.len() && !source[after..].starts_with('\n') {
        return TextEdit::delete(token.start_byte(), after);
    }
    let before = source[..token.start_byte()].trim_end_matches([' ', '\t']).len();
    TextEdit::delete(before, token.end_byte())
}

/// Leading whitespace one level deeper than `indent`
pub fn nested_indent(indent: &str) -> String {
    if indent.contains('\t') {
        format!("{indent}\t")
    } else {
        format!("{indent}    ")
    }
}
