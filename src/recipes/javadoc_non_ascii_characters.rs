// Copyright (C) Brian G. Milnes 2025

//! Escape non-ASCII characters in Javadoc as HTML entities

use anyhow::Result;

use crate::ast_utils::ast_utils::{find_nodes_where, is_javadoc, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.JavadocNonAsciiCharacters",
    display_name: "Escape non-ASCII characters in Javadoc",
    description: "Replaces non-ASCII characters in Javadoc comments with HTML numeric character references so generated documentation does not depend on source encoding.",
    effort_minutes: 1,
    tags: &["javadoc"],
    options: &[],
};

pub struct JavadocNonAsciiCharacters;

impl JavadocNonAsciiCharacters {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(JavadocNonAsciiCharacters))
    }
}

/// `é` -> `&#233;`
pub fn escape_non_ascii(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            escaped.push(c);
        } else {
            escaped.push_str(&format!("&#{};", c as u32));
        }
    }
    escaped
}

impl Recipe for JavadocNonAsciiCharacters {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes_where(unit.root(), |n| is_javadoc(n, source))
            .into_iter()
            .filter(|comment| !node_text(*comment, source).is_ascii())
            .map(|comment| TextEdit::replace(comment, escape_non_ascii(node_text(comment, source))))
            .collect())
    }
}
