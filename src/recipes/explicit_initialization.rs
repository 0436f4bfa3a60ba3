// Copyright (C) Brian G. Milnes 2025

//! Fields initialized to the value the JVM gives them anyway

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    body_members, field_children, find_nodes_where, has_comment_inside, has_modifier, node_text,
    unwrap_parens,
};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::is_generated_type;
use crate::types::types::{erase, is_primitive};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.ExplicitInitialization",
    display_name: "Don't initialize fields to their default value",
    description: "Removes explicit initialization of non-final fields to `null`, `0`, `false` or the null character.",
    effort_minutes: 2,
    tags: &["RSPEC-S3052"],
    options: &[],
};

pub struct ExplicitInitialization;

impl ExplicitInitialization {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(ExplicitInitialization))
    }
}

fn is_zero_number(text: &str) -> bool {
    let digits = text
        .trim_end_matches(['l', 'L', 'f', 'F', 'd', 'D'])
        .replace('_', "");
    !digits.is_empty() && digits.chars().all(|c| c == '0' || c == '.')
}

/// Whether `value` is the default of a field declared as `type_text`
fn is_default_value(type_text: &str, is_array: bool, value: Node, source: &str) -> bool {
    let value = unwrap_parens(value);
    let text = node_text(value, source);
    let erased = erase(type_text);

    if is_array || !is_primitive(&erased) || type_text.ends_with("[]") {
        return value.kind() == "null_literal";
    }
    match erased.as_str() {
        "boolean" => value.kind() == "false",
        "char" => value.kind() == "character_literal" && matches!(text, "'\\0'" | "'\\u0000'"),
        "float" | "double" => {
            matches!(value.kind(), "decimal_floating_point_literal" | "decimal_integer_literal")
                && is_zero_number(text)
        }
        _ => value.kind() == "decimal_integer_literal" && is_zero_number(text),
    }
}

fn type_body_fields(unit: &CompilationUnit) -> Vec<Node<'_>> {
    let source = unit.source();
    let types = unit.types();
    find_nodes_where(unit.root(), |n| {
        matches!(n.kind(), "class_declaration" | "enum_declaration")
    })
    .into_iter()
    .filter(|decl| !is_generated_type(*decl, &types, source))
    .filter_map(|decl| decl.child_by_field_name("body"))
    .flat_map(body_members)
    .filter(|m| m.kind() == "field_declaration" && !has_modifier(*m, "final"))
    .collect()
}

impl Recipe for ExplicitInitialization {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let mut edits = Vec::new();

        for field in type_body_fields(unit) {
            let Some(type_node) = field.child_by_field_name("type") else {
                continue;
            };
            let type_text = node_text(type_node, source);

            for declarator in field_children(field, "declarator") {
                let Some(value) = declarator.child_by_field_name("value") else {
                    continue;
                };
                if has_comment_inside(declarator) {
                    continue;
                }
                let dimensions = declarator.child_by_field_name("dimensions");
                if !is_default_value(type_text, dimensions.is_some(), value, source) {
                    continue;
                }
                let Some(name_end) = dimensions
                    .or_else(|| declarator.child_by_field_name("name"))
                    .map(|n| n.end_byte())
                else {
                    continue;
                };
                edits.push(TextEdit::delete(name_end, value.end_byte()));
            }
        }
        Ok(edits)
    }
}
