// Copyright (C) Brian G. Milnes 2025

//! `!(a == b)` becomes `a != b`
//!
//! Relational comparisons are only flipped when both sides are integral:
//! `!(x < y)` and `x >= y` disagree when either side is NaN.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, has_comment_inside, named_children, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{fit, operator_precedence};
use crate::types::types::{is_integral, TypeContext};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.BooleanChecksNotInverted",
    display_name: "Boolean checks should not be inverted",
    description: "Replaces a negated comparison such as `!(a == b)` with the opposite comparison `a != b`.",
    effort_minutes: 2,
    tags: &["RSPEC-S1940"],
    options: &[],
};

pub struct BooleanChecksNotInverted;

impl BooleanChecksNotInverted {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(BooleanChecksNotInverted))
    }
}

fn inverse(operator: &str) -> Option<&'static str> {
    match operator {
        "==" => Some("!="),
        "!=" => Some("=="),
        "<" => Some(">="),
        "<=" => Some(">"),
        ">" => Some("<="),
        ">=" => Some("<"),
        _ => None,
    }
}

fn is_relational(operator: &str) -> bool {
    matches!(operator, "<" | "<=" | ">" | ">=")
}

fn invert(not: Node, types: &TypeContext, source: &str) -> Option<TextEdit> {
    let operator = not.child_by_field_name("operator")?;
    if node_text(operator, source) != "!" {
        return None;
    }
    let operand = not.child_by_field_name("operand")?;
    if operand.kind() != "parenthesized_expression" || has_comment_inside(operand) {
        return None;
    }
    let comparison = *named_children(operand).first()?;
    if comparison.kind() != "binary_expression" {
        return None;
    }

    let op = comparison.child_by_field_name("operator")?;
    let op_text = node_text(op, source);
    let flipped = inverse(op_text)?;

    if is_relational(op_text) {
        let left = comparison.child_by_field_name("left")?;
        let right = comparison.child_by_field_name("right")?;
        let integral = |side: Node| {
            types
                .type_of(side, source)
                .is_some_and(|t| is_integral(&t))
        };
        if !integral(left) || !integral(right) {
            return None;
        }
    }

    let rewritten = format!(
        "{}{}{}",
        &source[comparison.start_byte()..op.start_byte()],
        flipped,
        &source[op.end_byte()..comparison.end_byte()]
    );
    let rewritten = fit(not, operator_precedence(flipped), rewritten, source);
    Some(TextEdit::replace(not, rewritten))
}

impl Recipe for BooleanChecksNotInverted {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let types = unit.types();
        let source = unit.source();
        Ok(find_nodes(unit.root(), "unary_expression")
            .into_iter()
            .filter_map(|not| invert(not, &types, source))
            .collect())
    }
}
