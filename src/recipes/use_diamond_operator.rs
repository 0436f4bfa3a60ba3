// Copyright (C) Brian G. Milnes 2025

//! `List<String> l = new ArrayList<String>()` becomes `new ArrayList<>()`

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{child_of_kind, find_nodes, has_comment_inside, named_children, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.UseDiamondOperator",
    display_name: "Use the diamond operator",
    description: "Drops constructor type arguments the compiler can infer from the declared type of a variable or field.",
    effort_minutes: 1,
    tags: &["RSPEC-S2293"],
    options: &[],
};

pub struct UseDiamondOperator;

impl UseDiamondOperator {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(UseDiamondOperator))
    }
}

fn rewrite(creation: Node, source: &str) -> Option<TextEdit> {
    // Anonymous classes only accept `<>` from Java 9 on
    if child_of_kind(creation, "class_body").is_some() {
        return None;
    }
    let created = creation.child_by_field_name("type")?;
    if created.kind() != "generic_type" {
        return None;
    }
    let arguments = child_of_kind(created, "type_arguments")?;
    if named_children(arguments).is_empty() || has_comment_inside(arguments) {
        return None;
    }

    let declarator = creation.parent().filter(|p| p.kind() == "variable_declarator")?;
    let is_value = declarator
        .child_by_field_name("value")
        .is_some_and(|v| v.id() == creation.id());
    if !is_value {
        return None;
    }
    let declaration = declarator
        .parent()
        .filter(|d| matches!(d.kind(), "local_variable_declaration" | "field_declaration"))?;
    let declared = declaration.child_by_field_name("type")?;
    let declared_text = node_text(declared, source);
    if declared.kind() != "generic_type" || declared_text.contains('?') {
        return None;
    }

    Some(TextEdit::replace(arguments, "<>"))
}

impl Recipe for UseDiamondOperator {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "object_creation_expression")
            .into_iter()
            .filter_map(|creation| rewrite(creation, source))
            .collect())
    }
}
