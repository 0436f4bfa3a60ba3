// Copyright (C) Brian G. Milnes 2025

//! Remove local variables that are never read

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    annotations, field_children, find_nodes, is_side_effect_free, node_text,
};
use crate::edit::edit::{declaration_span, delete_spans, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{
    OptionDescriptor, OptionKind, Recipe, RecipeDescriptor, RecipeOptions,
};
use crate::scope::scope::{later_case_groups, refers_to};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.RemoveUnusedLocalVariables",
    display_name: "Remove unused local variables",
    description: "Removes local variables that are never referenced and whose initializer has no side effects.",
    effort_minutes: 5,
    tags: &["RSPEC-S1481"],
    options: &[OptionDescriptor {
        name: "ignoreVariablesNamed",
        display_name: "Ignore matching variables",
        description: "Comma-separated variable names to leave alone.",
        example: "unused,ignored",
        kind: OptionKind::String,
        required: false,
    }],
};

pub struct RemoveUnusedLocalVariables {
    ignored: Vec<String>,
}

impl RemoveUnusedLocalVariables {
    pub fn create(options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        let ignored = options
            .get_str("ignoreVariablesNamed")
            .map(|names| {
                names
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Box::new(RemoveUnusedLocalVariables { ignored }))
    }

    fn removable(&self, decl: Node, source: &str) -> bool {
        let Some(block) = decl.parent() else {
            return false;
        };
        if !matches!(block.kind(), "block" | "constructor_body" | "switch_block_statement_group")
            || !annotations(decl).is_empty()
        {
            return false;
        }
        let declarators = field_children(decl, "declarator");
        let [declarator] = declarators.as_slice() else {
            return false;
        };
        let Some(name) = declarator.child_by_field_name("name").map(|n| node_text(n, source)) else {
            return false;
        };
        if name == "_" || self.ignored.iter().any(|i| i == name) {
            return false;
        }
        if let Some(value) = declarator.child_by_field_name("value") {
            if !is_side_effect_free(value) {
                return false;
            }
        }

        let mut scopes = vec![block];
        if block.kind() == "switch_block_statement_group" {
            scopes.extend(later_case_groups(block));
        }
        !scopes.into_iter().flat_map(|s| find_nodes(s, "identifier")).any(|ident| {
            ident.start_byte() >= decl.end_byte()
                && node_text(ident, source) == name
                && refers_to(ident, *declarator, source)
        })
    }
}

impl Recipe for RemoveUnusedLocalVariables {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let spans: Vec<(usize, usize)> = find_nodes(unit.root(), "local_variable_declaration")
            .into_iter()
            .filter(|decl| self.removable(*decl, source))
            .map(|decl| declaration_span(decl, source))
            .collect();
        if spans.is_empty() {
            return Ok(Vec::new());
        }
        Ok(delete_spans(source, spans))
    }
}
