// Copyright (C) Brian G. Milnes 2025

//! Remove annotations whose resolved type matches a pattern

use anyhow::{Context, Result};

use crate::ast_utils::ast_utils::{annotation_name, find_nodes_where, has_comment_inside};
use crate::edit::edit::{delete_spans, TextEdit};
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{
    OptionDescriptor, OptionKind, Recipe, RecipeDescriptor, RecipeOptions,
};
use crate::recipes::support::dead_imports;
use crate::types::types::TypeMatcher;

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.RemoveAnnotation",
    display_name: "Remove annotation",
    description: "Removes every annotation whose type matches the given pattern, and imports left unused.",
    effort_minutes: 1,
    tags: &[],
    options: &[OptionDescriptor {
        name: "annotationPattern",
        display_name: "Annotation pattern",
        description: "Type pattern of the annotations to remove; `*` matches within a name segment, `..` across packages.",
        example: "@java.lang.SuppressWarnings",
        kind: OptionKind::String,
        required: true,
    }],
};

pub struct RemoveAnnotation {
    matcher: TypeMatcher,
}

impl RemoveAnnotation {
    pub fn create(options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        let pattern = options
            .get_str("annotationPattern")
            .context("RemoveAnnotation requires annotationPattern")?;
        let matcher = TypeMatcher::new(pattern)?;
        Ok(Box::new(RemoveAnnotation { matcher }))
    }
}

impl Recipe for RemoveAnnotation {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        let types = unit.types();

        let mut removed_names = Vec::new();
        let mut spans = Vec::new();
        for annotation in find_nodes_where(unit.root(), |n| {
            matches!(n.kind(), "annotation" | "marker_annotation")
        }) {
            let Some(name) = annotation_name(annotation, source) else {
                continue;
            };
            let Some(fqn) = types.resolve(name) else {
                continue;
            };
            if !self.matcher.matches(&fqn) || has_comment_inside(annotation) {
                continue;
            }
            if let Some(simple) = name.rsplit('.').next() {
                removed_names.push(simple.to_string());
            }
            spans.push((annotation.start_byte(), annotation.end_byte()));
        }

        if spans.is_empty() {
            return Ok(Vec::new());
        }
        removed_names.sort();
        removed_names.dedup();
        let imports = dead_imports(unit, &removed_names, &spans);
        spans.extend(imports);
        Ok(delete_spans(source, spans))
    }
}
