// Copyright (C) Brian G. Milnes 2025

//! Drop `toString()` calls on values that are already strings

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, has_comment_inside, named_children, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::fit_node;
use crate::types::types::{TypeContext, STRING};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.NoToStringOnStringType",
    display_name: "No `toString()` on a `String`",
    description: "Removes `toString()` calls whose receiver is already a `String`.",
    effort_minutes: 2,
    tags: &["RSPEC-S1858"],
    options: &[],
};

pub struct NoToStringOnStringType;

impl NoToStringOnStringType {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(NoToStringOnStringType))
    }
}

fn rewrite(call: Node, types: &TypeContext, source: &str) -> Option<TextEdit> {
    if node_text(call.child_by_field_name("name")?, source) != "toString"
        || !named_children(call.child_by_field_name("arguments")?).is_empty()
        || has_comment_inside(call)
    {
        return None;
    }
    // `s.toString();` as a statement would become `s;`
    if call.parent().is_some_and(|p| p.kind() == "expression_statement") {
        return None;
    }
    let receiver = call.child_by_field_name("object")?;
    if types.type_of(receiver, source).as_deref() != Some(STRING) {
        return None;
    }
    Some(TextEdit::replace(call, fit_node(call, receiver, source)))
}

impl Recipe for NoToStringOnStringType {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let types = unit.types();
        let source = unit.source();
        Ok(find_nodes(unit.root(), "method_invocation")
            .into_iter()
            .filter_map(|call| rewrite(call, &types, source))
            .collect())
    }
}
