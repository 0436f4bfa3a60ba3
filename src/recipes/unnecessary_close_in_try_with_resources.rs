// Copyright (C) Brian G. Milnes 2025

//! Resources of a try-with-resources statement are closed for you

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, named_children, node_text};
use crate::edit::edit::{delete_lines, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::scope::scope::{find_declaration, DeclKind};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.UnnecessaryCloseInTryWithResources",
    display_name: "No explicit `close()` of try-with-resources resources",
    description: "Removes `close()` calls on resources that the enclosing try-with-resources statement already closes.",
    effort_minutes: 2,
    tags: &["RSPEC-S4087"],
    options: &[],
};

pub struct UnnecessaryCloseInTryWithResources;

impl UnnecessaryCloseInTryWithResources {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(UnnecessaryCloseInTryWithResources))
    }
}

/// `r.close();` where `r` is a resource of `statement`
fn closes_resource(expression_statement: Node, statement: Node, source: &str) -> bool {
    let Some(call) = named_children(expression_statement).first().copied() else {
        return false;
    };
    // A brace-less `if (c) r.close();` would take the next statement as its body
    let standalone = expression_statement
        .parent()
        .is_some_and(|p| matches!(p.kind(), "block" | "switch_block_statement_group"));
    if call.kind() != "method_invocation" || !standalone {
        return false;
    }
    let is_close = call
        .child_by_field_name("name")
        .is_some_and(|n| node_text(n, source) == "close")
        && call
            .child_by_field_name("arguments")
            .is_some_and(|a| named_children(a).is_empty());
    let Some(receiver) = call.child_by_field_name("object") else {
        return false;
    };
    if !is_close || receiver.kind() != "identifier" {
        return false;
    }
    find_declaration(receiver, node_text(receiver, source), source).is_some_and(|d| {
        d.kind == DeclKind::Resource
            && d.declaration
                .parent()
                .and_then(|spec| spec.parent())
                .is_some_and(|s| s.id() == statement.id())
    })
}

impl Recipe for UnnecessaryCloseInTryWithResources {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let mut edits = Vec::new();
        for statement in find_nodes(unit.root(), "try_with_resources_statement") {
            let Some(body) = statement.child_by_field_name("body") else {
                continue;
            };
            edits.extend(
                find_nodes(body, "expression_statement")
                    .into_iter()
                    .filter(|s| closes_resource(*s, statement, source))
                    .map(|s| delete_lines(source, s.start_byte(), s.end_byte())),
            );
        }
        Ok(edits)
    }
}
