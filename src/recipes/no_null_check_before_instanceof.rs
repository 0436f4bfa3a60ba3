// Copyright (C) Brian G. Milnes 2025

//! `instanceof` is already false for null

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    find_nodes, has_comment_inside, is_side_effect_free, node_text, semantically_equal,
    unwrap_parens,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::fit_node;

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.NoNullCheckBeforeInstanceof",
    display_name: "No null check before `instanceof`",
    description: "Removes `x != null &&` before `x instanceof T`, and `x == null ||` before `!(x instanceof T)`.",
    effort_minutes: 1,
    tags: &["RSPEC-S1697"],
    options: &[],
};

pub struct NoNullCheckBeforeInstanceof;

impl NoNullCheckBeforeInstanceof {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(NoNullCheckBeforeInstanceof))
    }
}

/// The operand of `x <operator> null` or `null <operator> x`
fn null_compared<'t>(check: Node<'t>, operator: &str, source: &str) -> Option<Node<'t>> {
    let check = unwrap_parens(check);
    if check.kind() != "binary_expression"
        || node_text(check.child_by_field_name("operator")?, source) != operator
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

/// The value tested by `x instanceof T`, or by `!(x instanceof T)` when `negated`
fn tested_value<'t>(expr: Node<'t>, negated: bool, source: &str) -> Option<Node<'t>> {
    let mut expr = unwrap_parens(expr);
    if negated {
        if expr.kind() != "unary_expression"
            || node_text(expr.child_by_field_name("operator")?, source) != "!"
        {
            return None;
        }
        expr = unwrap_parens(expr.child_by_field_name("operand")?);
    }
    if expr.kind() != "instanceof_expression" {
        return None;
    }
    expr.child_by_field_name("left")
}

fn rewrite(logical: Node, source: &str) -> Option<TextEdit> {
    let (null_operator, negated) = match node_text(logical.child_by_field_name("operator")?, source) {
        "&&" => ("!=", false),
        "||" => ("==", true),
        _ => return None,
    };
    if has_comment_inside(logical) {
        return None;
    }
    let checked = null_compared(logical.child_by_field_name("left")?, null_operator, source)?;
    let right = logical.child_by_field_name("right")?;
    let tested = tested_value(right, negated, source)?;
    if !is_side_effect_free(checked) || !semantically_equal(checked, tested, source) {
        return None;
    }
    Some(TextEdit::replace(logical, fit_node(logical, right, source)))
}

impl Recipe for NoNullCheckBeforeInstanceof {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "binary_expression")
            .into_iter()
            .filter_map(|logical| rewrite(logical, source))
            .collect())
    }
}
