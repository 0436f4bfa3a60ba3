// Copyright (C) Brian G. Milnes 2025

//! `10l` reads like `101`; write `10L`

use anyhow::Result;

use crate::ast_utils::ast_utils::{find_nodes_where, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.UpperCaseLongLiterals",
    display_name: "Long literal suffixes are upper case",
    description: "Replaces the lower case `l` suffix of long literals with `L`.",
    effort_minutes: 1,
    tags: &["RSPEC-S818"],
    options: &[],
};

pub struct UpperCaseLongLiterals;

impl UpperCaseLongLiterals {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(UpperCaseLongLiterals))
    }
}

impl Recipe for UpperCaseLongLiterals {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes_where(unit.root(), |n| {
            matches!(
                n.kind(),
                "decimal_integer_literal"
                    | "hex_integer_literal"
                    | "octal_integer_literal"
                    | "binary_integer_literal"
            ) && node_text(n, source).ends_with('l')
        })
        .into_iter()
        .map(|literal| TextEdit::replace_range(literal.end_byte() - 1, literal.end_byte(), "L"))
        .collect())
    }
}
