// Copyright (C) Brian G. Milnes 2025

//! `s == "x"` compares references; use `"x".equals(s)` instead

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, has_comment_inside, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{fit, PREC_PRIMARY, PREC_UNARY};
use crate::types::types::{TypeContext, STRING};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.StringLiteralEquality",
    display_name: "Compare strings with `equals`",
    description: "Replaces `==` and `!=` between a string and a string literal with a call to `equals` on the literal.",
    effort_minutes: 5,
    tags: &["RSPEC-S4973"],
    options: &[],
};

pub struct StringLiteralEquality;

impl StringLiteralEquality {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(StringLiteralEquality))
    }
}

fn is_string_literal(node: Node) -> bool {
    matches!(node.kind(), "string_literal" | "text_block")
}

fn rewrite(comparison: Node, types: &TypeContext, source: &str) -> Option<TextEdit> {
    let operator = node_text(comparison.child_by_field_name("operator")?, source);
    if !matches!(operator, "==" | "!=") || has_comment_inside(comparison) {
        return None;
    }
    let left = comparison.child_by_field_name("left")?;
    let right = comparison.child_by_field_name("right")?;
    let (literal, other) = match (is_string_literal(left), is_string_literal(right)) {
        (true, false) => (left, right),
        (false, true) => (right, left),
        _ => return None,
    };
    if types.type_of(other, source).as_deref() != Some(STRING) {
        return None;
    }

    let call = format!("{}.equals({})", node_text(literal, source), node_text(other, source));
    let text = if operator == "==" {
        fit(comparison, PREC_PRIMARY, call, source)
    } else {
        fit(comparison, PREC_UNARY, format!("!{call}"), source)
    };
    Some(TextEdit::replace(comparison, text))
}

impl Recipe for StringLiteralEquality {
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
