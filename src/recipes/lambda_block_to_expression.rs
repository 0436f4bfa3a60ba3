// Copyright (C) Brian G. Milnes 2025

//! `x -> { return e; }` becomes `x -> e`

use anyhow::Result;
use tree_sitter::Node;

use crate::ast_utils::ast_utils::{find_nodes, has_comment_inside, named_children, node_text};
use crate::edit::edit::TextEdit;
use crate::parser::parser::CompilationUnit;
use crate::recipe::recipe::{Recipe, RecipeDescriptor, RecipeOptions};

pub static DESCRIPTOR: RecipeDescriptor = RecipeDescriptor {
    name: "staticfix.java.LambdaBlockToExpression",
    display_name: "Simplify lambda blocks to expressions",
    description: "Replaces a lambda body consisting of a single `return` statement with the returned expression.",
    effort_minutes: 2,
    tags: &["RSPEC-S1602"],
    options: &[],
};

/// Expressions that are also valid statements
const STATEMENT_EXPRESSIONS: &[&str] = &[
    "method_invocation",
    "object_creation_expression",
    "assignment_expression",
    "update_expression",
];

pub struct LambdaBlockToExpression;

impl LambdaBlockToExpression {
    pub fn create(_options: &RecipeOptions) -> Result<Box<dyn Recipe>> {
        Ok(Box::new(LambdaBlockToExpression))
    }
}

fn rewrite(lambda: Node, source: &str) -> Option<TextEdit> {
    let body = lambda.child_by_field_name("body")?;
    if body.kind() != "block" || has_comment_inside(body) {
        return None;
    }
    let statements = named_children(body);
    let [statement] = statements.as_slice() else {
        return None;
    };
    if statement.kind() != "return_statement" {
        return None;
    }
    let returned = *named_children(*statement).first()?;

    // As an argument, `() -> call()` also fits void overloads the block form ruled out
    let is_argument = lambda.parent().is_some_and(|p| p.kind() == "argument_list");
    if is_argument && STATEMENT_EXPRESSIONS.contains(&returned.kind()) {
        return None;
    }
    Some(TextEdit::replace(body, node_text(returned, source)))
}

impl Recipe for LambdaBlockToExpression {
    fn descriptor(&self) -> &'static RecipeDescriptor {
        &DESCRIPTOR
    }

    fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>> {
        let source = unit.source();
        Ok(find_nodes(unit.root(), "lambda_expression")
            .into_iter()
            .filter_map(|lambda| rewrite(lambda, source))
            .collect())
    }
}
