// Copyright (C) Brian G. Milnes 2025

//! Convert `try`/`finally { r.close(); }` into try-with-resources
//!
//! A resource qualifies when it is a single-variable local declaration
//! directly before the `try`, its type is attributed as `AutoCloseable`,
//! and the `finally` closes it with a direct (optionally null-guarded)
//! `close()` call. The declaration moves into the resource list and the
//! close call goes away. Anything that would change behavior or scope
//! declines the conversion:
//!
//! - the variable is reassigned, or stored through an assignment
//! - the variable is used after the `try`, in a `catch`, or elsewhere in the `finally`
//! - it is closed through a helper method or accessor instead of `r.close()`
//! - several resources are not closed in reverse declaration order

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    child_of_kind, children, children_of_kind, contains, field_children, find_nodes,
    has_comment_inside, named_children, node_text, unwrap_parens,
};
use crate::edit::edit::{delete_lines, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::scope::scope::{later_case_groups, refers_to, DeclKind, Declared};
use crate::types::types::{TypeContext, AUTO_CLOSEABLE};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.TryWithResources",
    display_name: "Use try-with-resources",
    description: "Moves a closeable local variable that is closed in a `finally` block into a try-with-resources statement.",
    effort_minutes: 15,
    tags: &["RSPEC-S2093"],
    options: &[],
};

pub struct TryWithResources;

impl TryWithResources {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(TryWithResources))
    }
}

/// `name.close();`
fn direct_close<'s>(stmt: Node, source: &'s str) -> Option<&'s str> {
    if stmt.kind() != "expression_statement" {
        return None;
    }
    let call = *named_children(stmt).first()?;
    if call.kind() != "method_invocation" {
        return None;
    }
    let object = call.child_by_field_name("object")?;
    let name = call.child_by_field_name("name")?;
    let arguments = call.child_by_field_name("arguments")?;
    if object.kind() != "identifier"
        || node_text(name, source) != "close"
        || !named_children(arguments).is_empty()
    {
        return None;
    }
    Some(node_text(object, source))
}

/// `name.close();` or `if (name != null) name.close();`, with or without braces
fn close_target<'s>(stmt: Node, source: &'s str) -> Option<&'s str> {
    if let Some(name) = direct_close(stmt, source) {
        return Some(name);
    }
    if stmt.kind() != "if_statement" || stmt.child_by_field_name("alternative").is_some() {
        return None;
    }

    let condition = unwrap_parens(stmt.child_by_field_name("condition")?);
    if condition.kind() != "binary_expression"
        || node_text(condition.child_by_field_name("operator")?, source) != "!="
    {
        return None;
    }
    let left = condition.child_by_field_name("left")?;
    let right = condition.child_by_field_name("right")?;
    let guarded = match (left.kind(), right.kind()) {
        ("identifier", "null_literal") => node_text(left, source),
        ("null_literal", "identifier") => node_text(right, source),
        _ => return None,
    };

    let consequence = stmt.child_by_field_name("consequence")?;
    let closed = if consequence.kind() == "block" {
        let inner = named_children(consequence);
        if inner.len() != 1 || has_comment_inside(consequence) {
            return None;
        }
        direct_close(inner[0], source)?
    } else {
        direct_close(consequence, source)?
    };

    (closed == guarded).then_some(closed)
}

struct Candidate<'t> {
    declaration: Node<'t>,
    declarator: Node<'t>,
    name: String,
}

/// A resource-shaped local: one declarator, non-null initializer, closeable type
fn candidate<'t>(decl: Node<'t>, types: &TypeContext, source: &str) -> Option<Candidate<'t>> {
    if decl.kind() != "local_variable_declaration" {
        return None;
    }
    let declarators = field_children(decl, "declarator");
    let [declarator] = declarators.as_slice() else {
        return None;
    };
    let value = declarator.child_by_field_name("value")?;
    if value.kind() == "null_literal" || declarator.child_by_field_name("dimensions").is_some() {
        return None;
    }
    let name = declarator.child_by_field_name("name")?;

    let declared = Declared {
        kind: DeclKind::Local,
        declaration: decl,
        declarator: *declarator,
        type_node: decl.child_by_field_name("type"),
        value: Some(value),
    };
    let fqn = types.declared_type(&declared, source)?;
    if !types.is_known_subtype(&fqn, AUTO_CLOSEABLE) {
        return None;
    }

    Some(Candidate {
        declaration: decl,
        declarator: *declarator,
        name: node_text(name, source).to_string(),
    })
}

/// References to the candidate's variable within `scope`
fn references<'t>(scope: Node<'t>, candidate: &Candidate, source: &str) -> Vec<Node<'t>> {
    find_nodes(scope, "identifier")
        .into_iter()
        .filter(|ident| node_text(*ident, source) == candidate.name)
        .filter(|ident| refers_to(*ident, candidate.declarator, source))
        .collect()
}

/// Assigned to, or assigned somewhere else
fn escapes_or_reassigned(reference: Node) -> bool {
    let Some(parent) = reference.parent() else {
        return false;
    };
    parent.kind() == "assignment_expression"
}

fn convert<'t>(try_stmt: Node<'t>, types: &TypeContext, source: &str) -> Option<Vec<TextEdit>> {
    let finally = child_of_kind(try_stmt, "finally_clause")?;
    let finally_block = child_of_kind(finally, "block")?;
    let body = try_stmt.child_by_field_name("body")?;
    let parent = try_stmt.parent()?;
    if !matches!(parent.kind(), "block" | "constructor_body" | "switch_block_statement_group") {
        return None;
    }

    let siblings = named_children(parent);
    let index = siblings.iter().position(|s| s.id() == try_stmt.id())?;
    let later = if parent.kind() == "switch_block_statement_group" {
        later_case_groups(parent)
    } else {
        Vec::new()
    };

    let finally_statements = named_children(finally_block);
    let closes: Vec<(Node, &str)> = finally_statements
        .iter()
        .filter_map(|s| close_target(*s, source).map(|name| (*s, name)))
        .collect();
    if closes.is_empty() {
        return None;
    }

    let catches = children_of_kind(try_stmt, "catch_clause");

    // Closest declarations first; stop at the first that does not qualify
    let mut resources: Vec<(Candidate, Node)> = Vec::new();
    for decl in siblings[..index].iter().rev() {
        let Some(candidate) = candidate(*decl, types, source) else {
            break;
        };
        let matching: Vec<Node> = closes
            .iter()
            .filter(|(_, name)| *name == candidate.name)
            .map(|(stmt, _)| *stmt)
            .collect();
        let [close] = matching.as_slice() else {
            break;
        };

        let in_body = references(body, &candidate, source);
        if in_body.iter().any(|r| escapes_or_reassigned(*r)) {
            return None;
        }
        let in_handlers = catches
            .iter()
            .any(|c| !references(*c, &candidate, source).is_empty());
        let in_finally = references(finally_block, &candidate, source)
            .iter()
            .any(|r| !contains(*close, *r));
        let after = siblings[index + 1..]
            .iter()
            .chain(later.iter())
            .any(|s| !references(*s, &candidate, source).is_empty());
        if in_handlers || in_finally || after {
            return None;
        }

        resources.push((candidate, *close));
    }
    if resources.is_empty() {
        return None;
    }
    resources.reverse();

    // Closed in reverse declaration order, like try-with-resources does
    let close_positions: Vec<usize> = resources
        .iter()
        .filter_map(|(_, close)| finally_statements.iter().position(|s| s.id() == close.id()))
        .collect();
    if close_positions.windows(2).any(|w| w[0] < w[1]) {
        return None;
    }

    let mut edits = Vec::new();

    let first = resources.first()?.0.declaration;
    let last = resources.last()?.0.declaration;
    edits.push(delete_lines(source, first.start_byte(), last.end_byte()));

    let specs: Vec<String> = resources
        .iter()
        .map(|(c, _)| {
            let decl = c.declaration;
            let end = children(decl)
                .last()
                .filter(|semi| semi.kind() == ";")
                .map(|semi| semi.start_byte())
                .unwrap_or(decl.end_byte());
            source[decl.start_byte()..end].trim_end().to_string()
        })
        .collect();
    let try_keyword = children(try_stmt).into_iter().find(|c| c.kind() == "try")?;
    edits.push(TextEdit::replace(try_keyword, format!("try ({})", specs.join("; "))));

    let removes_everything = finally_statements.len() == resources.len()
        && !has_comment_inside(finally_block);
    if removes_everything {
        let before = finally.prev_sibling()?;
        edits.push(TextEdit::delete(before.end_byte(), finally.end_byte()));
    } else {
        for (_, close) in &resources {
            edits.push(delete_lines(source, close.start_byte(), close.end_byte()));
        }
    }

    Some(edits)
}

impl Recipe for TryWithResources {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let types = unit.types();
        let source = unit.source();
        let mut accepted: Vec<TextEdit> = Vec::new();

        // A conversion is applied whole or not at all; a clash waits for the next cycle
        for try_stmt in find_nodes(unit.root(), "try_statement") {
            let Some(edits) = convert(try_stmt, &types, source) else {
                continue;
            };
            let clashes = edits.iter().any(|e| {
                accepted
                    .iter()
                    .any(|a| e.start < a.end.max(a.start + 1) && a.start < e.end.max(e.start + 1))
            });
            if !clashes {
                accepted.extend(edits);
            }
        }
        Ok(accepted)
    }
}
