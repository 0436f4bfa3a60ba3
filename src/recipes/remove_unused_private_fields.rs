// Copyright (C) Brian G. Milnes 2025

//! Remove private fields nothing reads or writes
//!
//! References are searched through the whole top-level type, inner and
//! anonymous classes included, since they can all see the field. A same-named
//! local, parameter, or inner-class field that shadows it is not a
//! reference. Removal repeats to a fixed point: a field used only by the
//! initializer of another removed field goes too.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{
    annotations, body_members, contains, field_children, find_nodes, has_modifier,
    is_declaration_name, is_in_header, is_invoked_method_name, is_selected_field, node_text,
    top_level_type,
};
use crate::edit::edit::{declaration_span, delete_spans, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::{dead_imports, has_native_method, is_generated_type, type_names_in};
use crate::scope::scope::find_declaration;
use crate::types::types::{TypeContext, SERIALIZABLE};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.RemoveUnusedPrivateFields",
    display_name: "Remove unused private fields",
    description: "Removes private fields that are never referenced, along with imports and comments only they used.",
    effort_minutes: 5,
    tags: &["RSPEC-S1068"],
    options: &[],
};

const SERIAL_VERSION_UID: &str = "serialVersionUID";

pub struct RemoveUnusedPrivateFields;

impl RemoveUnusedPrivateFields {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(RemoveUnusedPrivateFields))
    }
}

struct FieldCandidate<'t> {
    declaration: Node<'t>,
    declarators: Vec<Node<'t>>,
    scope: Node<'t>,
}

/// Unknown supertypes count as possibly serializable
fn may_be_serializable(type_decl: Node, types: &TypeContext, source: &str) -> bool {
    if type_decl.kind() == "enum_declaration" {
        return true;
    }
    let mut supertypes = Vec::new();
    for field in ["superclass", "interfaces"] {
        if let Some(clause) = type_decl.child_by_field_name(field) {
            supertypes.extend(find_nodes(clause, "type_identifier"));
            supertypes.extend(find_nodes(clause, "scoped_type_identifier"));
        }
    }
    supertypes.iter().any(|ty| match types.resolve(node_text(*ty, source)) {
        Some(fqn) => types.is_assignable_to(&fqn, SERIALIZABLE) != Some(false),
        None => true,
    })
}

fn candidates<'t>(unit: &'t CompilationUnit, types: &TypeContext) -> Vec<FieldCandidate<'t>> {
    let source = unit.source();
    let mut found = Vec::new();

    let type_decls = find_nodes(unit.root(), "class_declaration")
        .into_iter()
        .chain(find_nodes(unit.root(), "enum_declaration"));

    for type_decl in type_decls {
        if has_native_method(type_decl) || is_generated_type(type_decl, types, source) {
            continue;
        }
        let (Some(body), Some(scope)) = (type_decl.child_by_field_name("body"), top_level_type(type_decl)) else {
            continue;
        };
        let serializable = may_be_serializable(type_decl, types, source);

        for member in body_members(body) {
            if member.kind() != "field_declaration"
                || !has_modifier(member, "private")
                || !annotations(member).is_empty()
            {
                continue;
            }
            let declarators = field_children(member, "declarator");
            let is_uid = declarators.iter().any(|d| {
                d.child_by_field_name("name")
                    .is_some_and(|n| node_text(n, source) == SERIAL_VERSION_UID)
            });
            if is_uid && serializable {
                continue;
            }
            found.push(FieldCandidate {
                declaration: member,
                declarators,
                scope,
            });
        }
    }
    found
}

/// Any identifier in scope that means this declarator, ignoring removed code
fn is_referenced(declarator: Node, scope: Node, removed: &[Node], source: &str) -> bool {
    let Some(name_node) = declarator.child_by_field_name("name") else {
        return true;
    };
    let name = node_text(name_node, source);

    find_nodes(scope, "identifier").into_iter().any(|ident| {
        if ident.id() == name_node.id() || node_text(ident, source) != name {
            return false;
        }
        if is_declaration_name(ident) || is_invoked_method_name(ident) || is_in_header(ident) {
            return false;
        }
        if removed.iter().any(|r| contains(*r, ident)) {
            return false;
        }
        // obj.name may reach this field on another instance
        if is_selected_field(ident) {
            return true;
        }
        match find_declaration(ident, name, source) {
            Some(declared) => declared.declarator.id() == declarator.id(),
            None => true,
        }
    })
}

impl Recipe for RemoveUnusedPrivateFields {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let types = unit.types();
        let candidates = candidates(unit, &types);

        let mut removed: Vec<Node> = Vec::new();
        loop {
            let newly: Vec<Node> = candidates
                .iter()
                .filter(|c| !removed.iter().any(|r| r.id() == c.declaration.id()))
                .filter(|c| {
                    !c.declarators
                        .iter()
                        .any(|d| is_referenced(*d, c.scope, &removed, source))
                })
                .map(|c| c.declaration)
                .collect();
            if newly.is_empty() {
                break;
            }
            removed.extend(newly);
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
