// Copyright (C) Brian G. Milnes 2025

//! Remove parentheses that do not change how an expression parses
//!
//! Parentheses go when they wrap a primary expression, wrap another pair of
//! parentheses, or fill a slot that accepts any expression: `return`,
//! initializers, arguments, the right side of `=`, and lambda bodies.
//! Conditions of `if`, `while` and friends are part of the statement syntax
//! and are never touched.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    find_nodes, has_comment_inside, is_primary, named_children, node_text,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.UnnecessaryParentheses",
    display_name: "Remove unnecessary parentheses",
    description: "Removes redundant parentheses around identifiers, literals, calls, returned values, initializers, arguments and assigned values.",
    effort_minutes: 1,
    tags: &["RSPEC-S1110", "RSPEC-S1611"],
    options: &[],
};

/// Statements whose parenthesized condition is grammar, not grouping
const CONDITION_OWNERS: &[&str] = &[
    "if_statement",
    "while_statement",
    "do_statement",
    "switch_expression",
    "switch_statement",
    "synchronized_statement",
];

pub struct UnnecessaryParentheses;

impl UnnecessaryParentheses {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(UnnecessaryParentheses))
    }
}

fn is_field(parent: Node, field: &str, child: Node) -> bool {
    parent
        .child_by_field_name(field)
        .is_some_and(|n| n.id() == child.id())
}

/// Whether `parens` sits where any expression can stand unparenthesized
fn in_open_slot(parens: Node, parent: Node) -> bool {
    match parent.kind() {
        "return_statement" | "argument_list" | "parenthesized_expression" => true,
        "variable_declarator" => is_field(parent, "value", parens),
        "assignment_expression" => is_field(parent, "right", parens),
        "lambda_expression" => is_field(parent, "body", parens),
        _ => false,
    }
}

fn rewrite(parens: Node, source: &str) -> Option<TextEdit> {
    let parent = parens.parent()?;
    if CONDITION_OWNERS.contains(&parent.kind()) || has_comment_inside(parens) {
        return None;
    }
    let inner = *named_children(parens).first()?;
    if !is_primary(inner) && !in_open_slot(parens, parent) {
        return None;
    }
    Some(TextEdit::replace(parens, node_text(inner, source)))
}

impl Recipe for UnnecessaryParentheses {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "parenthesized_expression")
            .into_iter()
            .filter_map(|parens| rewrite(parens, source))
            .collect())
    }
}
