// Copyright (C) Brian G. Milnes 2025

//! Remove private methods that are never called

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    annotations, body_members, contains, find_nodes, has_modifier, node_text, top_level_type,
};
use crate::edit::edit::{declaration_span, delete_spans, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{dead_imports, has_native_method, is_generated_type, type_names_in};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.RemoveUnusedPrivateMethods",
    display_name: "Remove unused private methods",
    description: "Removes private methods that are never invoked or referenced in the enclosing top-level type.",
    effort_minutes: 5,
    tags: &["RSPEC-S1144"],
    options: &[],
};

/// Called reflectively by Java serialization
const SERIALIZATION_HOOKS: &[&str] = &[
    "writeObject",
    "readObject",
    "readObjectNoData",
    "writeReplace",
    "readResolve",
];

pub struct RemoveUnusedPrivateMethods;

impl RemoveUnusedPrivateMethods {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(RemoveUnusedPrivateMethods))
    }
}

/// Calls or method references naming `name`, outside the method itself
fn is_called(method: Node, name: &str, scope: Node, source: &str) -> bool {
    let calls = find_nodes(scope, "method_invocation").into_iter().filter(|call| {
        call.child_by_field_name("name")
            .is_some_and(|n| node_text(n, source) == name)
    });
    let references = find_nodes(scope, "method_reference").into_iter().filter(|r| {
        r.named_child(r.named_child_count().saturating_sub(1))
            .is_some_and(|n| node_text(n, source) == name)
    });
    calls
        .chain(references)
        .any(|site| !contains(method, site))
}

impl Recipe for RemoveUnusedPrivateMethods {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let types = unit.types();
        let mut removed: Vec<Node> = Vec::new();

        for type_decl in find_nodes(unit.root(), "class_declaration")
            .into_iter()
            .chain(find_nodes(unit.root(), "enum_declaration"))
        {
            if has_native_method(type_decl) || is_generated_type(type_decl, &types, source) {
                continue;
            }
            let (Some(body), Some(scope)) = (type_decl.child_by_field_name("body"), top_level_type(type_decl)) else {
                continue;
            };

            for member in body_members(body) {
                if member.kind() != "method_declaration"
                    || !has_modifier(member, "private")
                    || !annotations(member).is_empty()
                {
                    continue;
                }
                let Some(name) = member.child_by_field_name("name").map(|n| node_text(n, source)) else {
                    continue;
                };
                if SERIALIZATION_HOOKS.contains(&name) || is_called(member, name, scope, source) {
                    continue;
                }
                removed.push(member);
            }
        }

        if removed.is_empty() {
            return Ok(Vec::new());
        }

        let spans: Vec<(usize, usize)> = removed.iter().map(|d| declaration_span(*d, source)).collect();
        let mut type_names: Vec<String> = removed.iter().flat_map(|d| type_names_in(*d, source)).collect();
        type_names.sort();
        type_names.dedup();

        let mut all_spans = spans.clone();
        all_spans.extend(dead_imports(unit, &type_names, &spans));
        Ok(delete_spans(source, all_spans))
    }
}
