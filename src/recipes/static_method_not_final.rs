// Copyright (C) Brian G. Milnes 2025

//! Static methods cannot be overridden, so `final` on them is noise

use anyhow::Result;

use crate::ast_utils::ast_utils::{children, find_nodes, has_modifier, modifiers};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};
use crate::recipes::support::delete_token;

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.StaticMethodNotFinal",
    display_name: "Static methods need not be final",
    description: "Removes the `final` modifier from `static` methods.",
    effort_minutes: 1,
    tags: &["RSPEC-S2333"],
    options: &[],
};

pub struct StaticMethodNotFinal;

impl StaticMethodNotFinal {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(StaticMethodNotFinal))
    }
}

impl Recipe for StaticMethodNotFinal {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "method_declaration")
            .into_iter()
            .filter(|method| has_modifier(*method, "static"))
            .filter_map(modifiers)
            .filter_map(|mods| children(mods).into_iter().find(|c| c.kind() == "final"))
            .map(|token| delete_token(token, source))
            .collect())
    }
}
