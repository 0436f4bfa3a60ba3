// Copyright (C) Brian G. Milnes 2025

//! Simplify boolean expressions: double negation, comparisons with boolean
//! literals, literal operands of `&&` and `||`, and duplicated operands.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    find_nodes_where, has_comment_inside, is_side_effect_free, node_text, semantically_equal,
    unwrap_parens,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{fit, fit_node, negate, PREC_PRIMARY, PREC_UNARY};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.SimplifyBooleanExpression",
    display_name: "Simplify boolean expression",
    description: "Removes double negation, comparisons against `true`/`false`, and boolean literal operands that do not change the result.",
    effort_minutes: 5,
    tags: &["RSPEC-S1125", "RSPEC-S2761"],
    options: &[],
};

pub struct SimplifyBooleanExpression;

impl SimplifyBooleanExpression {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(SimplifyBooleanExpression))
    }
}

fn bool_literal(node: Node) -> Option<bool> {
    match unwrap_parens(node).kind() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn literal_text(target: Node, value: bool, source: &str) -> String {
    fit(target, PREC_PRIMARY, value.to_string(), source)
}

fn simplify_unary(expr: Node, source: &str) -> Option<TextEdit> {
    let operator = expr.child_by_field_name("operator")?;
    if node_text(operator, source) != "!" {
        return None;
    }
    let operand = expr.child_by_field_name("operand")?;
    let inner = unwrap_parens(operand);

    if let Some(value) = bool_literal(inner) {
        return Some(TextEdit::replace(expr, literal_text(expr, !value, source)));
    }

    if inner.kind() == "unary_expression"
        && inner
            .child_by_field_name("operator")
            .is_some_and(|op| node_text(op, source) == "!")
    {
        let negated = inner.child_by_field_name("operand")?;
        return Some(TextEdit::replace(expr, fit_node(expr, negated, source)));
    }

    None
}

fn simplify_binary(expr: Node, source: &str) -> Option<TextEdit> {
    let operator = expr.child_by_field_name("operator")?;
    let left = expr.child_by_field_name("left")?;
    let right = expr.child_by_field_name("right")?;
    let op = node_text(operator, source);

    let keep = |side: Node| Some(TextEdit::replace(expr, fit_node(expr, side, source)));
    let negated = |side: Node| {
        Some(TextEdit::replace(
            expr,
            fit(expr, PREC_UNARY, negate(side, source), source),
        ))
    };
    let constant = |value: bool| Some(TextEdit::replace(expr, literal_text(expr, value, source)));

    match (op, bool_literal(left), bool_literal(right)) {
        // Both literal: fold
        ("==", Some(a), Some(b)) => constant(a == b),
        ("!=", Some(a), Some(b)) => constant(a != b),
        ("&&", Some(a), Some(b)) => constant(a && b),
        ("||", Some(a), Some(b)) => constant(a || b),

        ("==", _, Some(true)) | ("!=", _, Some(false)) => keep(left),
        ("==", Some(true), _) | ("!=", Some(false), _) => keep(right),
        ("==", _, Some(false)) | ("!=", _, Some(true)) => negated(left),
        ("==", Some(false), _) | ("!=", Some(true), _) => negated(right),

        ("&&", Some(true), _) => keep(right),
        ("&&", _, Some(true)) => keep(left),
        ("||", Some(false), _) => keep(right),
        ("||", _, Some(false)) => keep(left),

        // Short circuit: the right side never runs
        ("&&", Some(false), _) => constant(false),
        ("||", Some(true), _) => constant(true),

        // The left side runs first, so it must be free of side effects to drop
        ("&&", _, Some(false)) if is_side_effect_free(left) => constant(false),
        ("||", _, Some(true)) if is_side_effect_free(left) => constant(true),

        ("&&", None, None) | ("||", None, None)
            if is_side_effect_free(left) && semantically_equal(left, right, source) =>
        {
            keep(left)
        }

        _ => None,
    }
}

impl Recipe for SimplifyBooleanExpression {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let candidates = find_nodes_where(unit.root(), |n| {
            matches!(n.kind(), "unary_expression" | "binary_expression")
        });

        Ok(candidates
            .into_iter()
            .filter(|n| !has_comment_inside(*n))
            .filter_map(|n| match n.kind() {
                "unary_expression" => simplify_unary(n, source),
                _ => simplify_binary(n, source),
            })
            .collect())
    }
}
