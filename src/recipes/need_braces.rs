// Copyright (C) Brian G. Milnes 2025

//! Wrap single-statement bodies of `if`, `else`, `for`, `while` and `do` in braces

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes_where, is_comment, node_text};
use crate::edit::edit::{indentation, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::nested_indent;

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.NeedBraces",
    display_name: "Control statement bodies need braces",
    description: "Adds braces around single statements used as the body of `if`, `else`, `for`, `while` and `do`.",
    effort_minutes: 2,
    tags: &["RSPEC-121"],
    options: &[],
};

pub struct NeedBraces;

impl NeedBraces {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(NeedBraces))
    }
}

/// Bodies of a control statement that are not blocks
fn unbraced_bodies(statement: Node) -> Vec<Node> {
    let fields: &[&str] = match statement.kind() {
        "if_statement" => &["consequence", "alternative"],
        _ => &["body"],
    };
    fields
        .iter()
        .filter_map(|field| statement.child_by_field_name(field).map(|body| (*field, body)))
        .filter(|(field, body)| match body.kind() {
            "block" | ";" => false,
            "if_statement" => *field != "alternative",
            _ => true,
        })
        .map(|(_, body)| body)
        .collect()
}

fn wrap(statement: Node, body: Node, source: &str) -> Option<TextEdit> {
    let before = body.prev_sibling()?;
    if is_comment(before) {
        return None;
    }
    let indent = indentation(source, before.start_byte());
    let statement_indent = if before.kind() == "else" {
        indent
    } else {
        indentation(source, statement.start_byte())
    };
    let gap = &source[before.end_byte()..body.start_byte()];
    let text = node_text(body, source);

    let replacement = if gap.contains('\n') {
        format!(" {{{gap}{text}\n{statement_indent}}}")
    } else {
        format!(" {{\n{}{text}\n{statement_indent}}}", nested_indent(statement_indent))
    };
    Some(TextEdit::replace_range(before.end_byte(), body.end_byte(), replacement))
}

impl Recipe for NeedBraces {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let statements = find_nodes_where(unit.root(), |n| {
            matches!(
                n.kind(),
                "if_statement" | "for_statement" | "enhanced_for_statement" | "while_statement" | "do_statement"
            )
        });
        Ok(statements
            .into_iter()
            .flat_map(|statement| {
                unbraced_bodies(statement)
                    .into_iter()
                    .filter_map(move |body| wrap(statement, body, source))
            })
            .collect())
    }
}
