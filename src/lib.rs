// Copyright (C) Brian G. Milnes 2025

//! Staticfix - a catalog of automated fixes for common static analysis
//! findings in Java source trees
//!
//! Sources are parsed with tree-sitter, recipes propose text edits against the
//! syntax tree, and the runner applies them to a fixed point, re-parsing after
//! every step so no rewrite can leave a file that no longer parses.

pub mod parser;
pub mod ast_utils;
pub mod edit;
pub mod types;
pub mod scope;
pub mod recipe;
pub mod registry;
pub mod runner;
pub mod analyzer;
pub mod catalog;
pub mod args;
pub mod logging;
pub mod tool_runner;
pub mod recipes;

use anyhow::Result;
use std::path::Path;

pub use parser::parser::{parse_file, CompilationUnit, SourceLanguage};
pub use analyzer::analyzer::{analyze, Finding};
pub use edit::edit::{apply_edits, TextEdit};
pub use recipe::recipe::{OptionKind, OptionValue, Recipe, RecipeDescriptor, RecipeOptions};
pub use registry::registry::{RecipeList, RecipeRegistry};
pub use runner::runner::{RecipeRunner, RunResult, DEFAULT_MAX_CYCLES};
pub use args::args::{StandardArgs, format_number, find_java_files, find_source_files};

/// Run one recipe (or recipe list) over Java source text
pub fn fix_source(registry: &RecipeRegistry, recipe: &str, options: &RecipeOptions, source: &str) -> Result<String> {
    let runner = RecipeRunner::new(registry.instantiate(recipe, options)?);
    let result = runner.run_source(Path::new("Snippet.java"), source)?;
    Ok(result.after)
}

/// Findings for one file without changing it
pub fn review_file(file: &Path, recipes: &[Box<dyn Recipe>]) -> Result<Vec<Finding>> {
    let unit = CompilationUnit::read(file)?;
    analyze(&unit, recipes)
}

/// The syntax tree of a Java file as an S-expression
pub fn parse(file: &Path) -> Result<String> {
    let unit = CompilationUnit::read(file)?;
    Ok(unit.root().to_sexp())
}
