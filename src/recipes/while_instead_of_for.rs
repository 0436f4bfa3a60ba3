// Copyright (C) Brian G. Milnes 2025

//! `for (; c; )` is a `while (c)` loop

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{children, find_nodes, field_children, is_comment, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.WhileInsteadOfFor",
    display_name: "Prefer `while` over `for` without init or update",
    description: "Rewrites `for` loops that have only a condition as `while` loops.",
    effort_minutes: 2,
    tags: &["RSPEC-S1264"],
    options: &[],
};

pub struct WhileInsteadOfFor;

impl WhileInsteadOfFor {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(WhileInsteadOfFor))
    }
}

fn rewrite(for_loop: Node, source: &str) -> Option<TextEdit> {
    if !field_children(for_loop, "init").is_empty() || !field_children(for_loop, "update").is_empty() {
        return None;
    }
    let condition = for_loop.child_by_field_name("condition")?;
    let body = for_loop.child_by_field_name("body")?;
    let header: Vec<Node> = children(for_loop)
        .into_iter()
        .take_while(|c| c.id() != body.id())
        .collect();
    if header.iter().any(|c| is_comment(*c)) {
        return None;
    }
    let close = header.iter().rev().find(|c| c.kind() == ")")?;
    Some(TextEdit::replace_range(
        for_loop.start_byte(),
        close.end_byte(),
        format!("while ({})", node_text(condition, source)),
    ))
}

impl Recipe for WhileInsteadOfFor {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "for_statement")
            .into_iter()
            .filter_map(|for_loop| rewrite(for_loop, source))
            .collect())
    }
}
