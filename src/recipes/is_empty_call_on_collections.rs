// Copyright (C) Brian G. Milnes 2025

//! `c.size() == 0` becomes `c.isEmpty()`

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, has_comment_inside, named_children, node_text, unwrap_parens};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{fit, PREC_PRIMARY, PREC_UNARY};
use crate::types::types::{TypeContext, COLLECTION};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.IsEmptyCallOnCollections",
    display_name: "Use `isEmpty()` to test for emptiness",
    description: "Replaces `size() == 0` and `size() > 0` comparisons on collections and maps with `isEmpty()`.",
    effort_minutes: 2,
    tags: &["RSPEC-S1155"],
    options: &[],
};

const MAP: &str = "java.util.Map";

pub struct IsEmptyCallOnCollections;

impl IsEmptyCallOnCollections {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(IsEmptyCallOnCollections))
    }
}

/// The receiver of `receiver.size()` when it is a known collection or map
fn sized_collection<'t>(call: Node<'t>, types: &TypeContext, source: &str) -> Option<Node<'t>> {
    let call = unwrap_parens(call);
    if call.kind() != "method_invocation"
        || node_text(call.child_by_field_name("name")?, source) != "size"
        || !named_children(call.child_by_field_name("arguments")?).is_empty()
    {
        return None;
    }
    let receiver = call.child_by_field_name("object")?;
    let fqn = types.type_of(receiver, source)?;
    (types.is_known_subtype(&fqn, COLLECTION) || types.is_known_subtype(&fqn, MAP)).then_some(receiver)
}

/// `Some(true)` for an emptiness test, `Some(false)` for a non-emptiness test
fn tests_empty(operator: &str, literal: &str, size_on_left: bool) -> Option<bool> {
    // Normalize to `size() <op> literal`
    let operator = if size_on_left {
        operator
    } else {
        match operator {
            "<" => ">",
            ">" => "<",
            "<=" => ">=",
            ">=" => "<=",
            other => other,
        }
    };
    match (operator, literal) {
        ("==", "0") | ("<", "1") | ("<=", "0") => Some(true),
        ("!=", "0") | (">", "0") | (">=", "1") => Some(false),
        _ => None,
    }
}

fn rewrite(comparison: Node, types: &TypeContext, source: &str) -> Option<TextEdit> {
    if has_comment_inside(comparison) {
        return None;
    }
    let operator = node_text(comparison.child_by_field_name("operator")?, source);
    let left = comparison.child_by_field_name("left")?;
    let right = comparison.child_by_field_name("right")?;

    let (receiver, literal, size_on_left) = match sized_collection(left, types, source) {
        Some(receiver) => (receiver, right, true),
        None => (sized_collection(right, types, source)?, left, false),
    };
    if literal.kind() != "decimal_integer_literal" {
        return None;
    }

    let call = format!("{}.isEmpty()", node_text(receiver, source));
    let text = if tests_empty(operator, node_text(literal, source), size_on_left)? {
        fit(comparison, PREC_PRIMARY, call, source)
    } else {
        fit(comparison, PREC_UNARY, format!("!{call}"), source)
    };
    Some(TextEdit::replace(comparison, text))
}

impl Recipe for IsEmptyCallOnCollections {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let types = unit.types();
        let source = unit.source();
        Ok(find_nodes(unit.root(), "binary_expression")
            .into_iter()
            .filter_map(|comparison| rewrite(comparison, &types, source))
            .collect())
    }
}
