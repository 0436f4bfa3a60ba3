// Copyright (C) Brian G. Milnes 2025

//! Put modifier keywords in the order the Java Language Specification lists them
//!
//! Keywords are permuted in place. Annotations keep their positions.

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{children, find_nodes, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.ModifierOrder",
    display_name: "Modifiers in standard order",
    description: "Reorders modifiers such as `static public final` to `public static final`.",
    effort_minutes: 2,
    tags: &["RSPEC-S1124"],
    options: &[],
};

const ORDER: &[&str] = &[
    "public",
    "protected",
    "private",
    "abstract",
    "default",
    "static",
    "sealed",
    "non-sealed",
    "final",
    "transient",
    "volatile",
    "synchronized",
    "native",
    "strictfp",
];

fn rank(keyword: &str) -> Option<usize> {
    ORDER.iter().position(|k| *k == keyword)
}

pub struct ModifierOrder;

impl ModifierOrder {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(ModifierOrder))
    }
}

fn reorder(modifiers: Node, source: &str) -> Vec<TextEdit> {
    let keywords: Vec<Node> = children(modifiers)
        .into_iter()
        .filter(|c| rank(node_text(*c, source)).is_some())
        .collect();

    let mut sorted: Vec<&str> = keywords.iter().map(|k| node_text(*k, source)).collect();
    sorted.sort_by_key(|k| rank(k));

    keywords
        .iter()
        .zip(sorted)
        .filter(|(token, wanted)| node_text(**token, source) != *wanted)
        .map(|(token, wanted)| TextEdit::replace(*token, wanted))
        .collect()
}

impl Recipe for ModifierOrder {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "modifiers")
            .into_iter()
            .flat_map(|m| reorder(m, source))
            .collect())
    }
}
