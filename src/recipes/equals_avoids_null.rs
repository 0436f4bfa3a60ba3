// Copyright (C) Brian G. Milnes 2025

//! `s.equals("x")` becomes `"x".equals(s)`, which cannot throw on a null `s`.
//! A preceding `s != null &&` guard is dropped along the way.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    find_nodes, has_comment_inside, named_children, node_text, semantically_equal, unwrap_parens,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{fit, PREC_PRIMARY};
use crate::types::types::{TypeContext, STRING};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.EqualsAvoidsNull",
    display_name: "String comparisons put the literal first",
    description: "Calls `equals` and `equalsIgnoreCase` on the string literal instead of the variable, so a null variable compares false instead of throwing.",
    effort_minutes: 2,
    tags: &["RSPEC-S1132"],
    options: &[],
};

const EQUALS_METHODS: &[&str] = &["equals", "equalsIgnoreCase"];

pub struct EqualsAvoidsNull;

impl EqualsAvoidsNull {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(EqualsAvoidsNull))
    }
}

/// The call's receiver and the flipped call text
fn flipped<'t>(call: Node<'t>, types: &TypeContext, source: &str) -> Option<(Node<'t>, String)> {
    let name = node_text(call.child_by_field_name("name")?, source);
    if !EQUALS_METHODS.contains(&name) || has_comment_inside(call) {
        return None;
    }
    let receiver = call.child_by_field_name("object")?;
    if matches!(receiver.kind(), "string_literal" | "text_block" | "super") {
        return None;
    }
    let args = named_children(call.child_by_field_name("arguments")?);
    let [literal] = args.as_slice() else {
        return None;
    };
    if literal.kind() != "string_literal" {
        return None;
    }
    if types.type_of(receiver, source).as_deref() != Some(STRING) {
        return None;
    }
    Some((
        receiver,
        format!(
            "{}.{}({})",
            node_text(*literal, source),
            name,
            node_text(receiver, source)
        ),
    ))
}

/// `x != null` or `null != x`, returning `x`
fn null_guarded<'t>(check: Node<'t>, source: &str) -> Option<Node<'t>> {
    let check = unwrap_parens(check);
    if check.kind() != "binary_expression"
        || node_text(check.child_by_field_name("operator")?, source) != "!="
    {
        return None;
    }
    let left = check.child_by_field_name("left")?;
    let right = check.child_by_field_name("right")?;
    match (left.kind(), right.kind()) {
        (_, "null_literal") => Some(left),
        ("null_literal", _) => Some(right),
        _ => None,
    }
}

/// `s != null && s.equals("x")` collapses to the flipped call
fn without_guard(and: Node, types: &TypeContext, source: &str) -> Option<TextEdit> {
    if node_text(and.child_by_field_name("operator")?, source) != "&&" || has_comment_inside(and) {
        return None;
    }
    let guarded = null_guarded(and.child_by_field_name("left")?, source)?;
    let call = unwrap_parens(and.child_by_field_name("right")?);
    if call.kind() != "method_invocation" {
        return None;
    }
    let (receiver, text) = flipped(call, types, source)?;
    if !semantically_equal(receiver, guarded, source) {
        return None;
    }
    Some(TextEdit::replace(and, fit(and, PREC_PRIMARY, text, source)))
}

impl Recipe for EqualsAvoidsNull {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let types = unit.types();
        let source = unit.source();
        let root = unit.root();

        let mut edits: Vec<TextEdit> = find_nodes(root, "binary_expression")
            .into_iter()
            .filter_map(|and| without_guard(and, &types, source))
            .collect();
        edits.extend(
            find_nodes(root, "method_invocation")
                .into_iter()
                .filter_map(|call| {
                    flipped(call, &types, source).map(|(_, text)| TextEdit::replace(call, text))
                }),
        );
        Ok(edits)
    }
}
