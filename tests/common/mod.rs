// Copyright (C) Brian G. Milnes 2025

//! Common test utilities for recipe and binary tests

#![allow(dead_code)]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use staticfix::{CompilationUnit, RecipeOptions, RecipeRegistry, RecipeRunner, RunResult};

/// Java source written flush-left in a raw string, minus the leading newline
pub fn java(text: &str) -> String {
    text.strip_prefix('\n').unwrap_or(text).to_string()
}

pub fn run_with(recipe: &str, options: &RecipeOptions, source: &str) -> Result<RunResult> {
    let registry = RecipeRegistry::builtin()?;
    let runner = RecipeRunner::new(registry.instantiate(recipe, options)?);
    runner.run_source(Path::new("Test.java"), source)
}

/// Run `recipe` on `before`, expect `after`, and check the result is stable and parses
pub fn rewrite_run_with(recipe: &str, options: &RecipeOptions, before: &str, after: &str) -> Result<()> {
    let before = java(before);
    let after = java(after);

    let result = run_with(recipe, options, &before)?;
    assert_eq!(result.after, after, "{recipe} produced unexpected output");
    assert!(result.rejected.is_empty(), "{recipe} had edits rejected: {:?}", result.rejected);

    let unit = CompilationUnit::from_source(&result.after)?;
    assert!(!unit.has_syntax_errors(), "{recipe} output does not parse:\n{}", result.after);

    let again = run_with(recipe, options, &result.after)?;
    assert_eq!(again.after, result.after, "{recipe} is not idempotent");
    Ok(())
}

pub fn rewrite_run(recipe: &str, before: &str, after: &str) -> Result<()> {
    rewrite_run_with(recipe, &RecipeOptions::new(), before, after)
}

/// The recipe must leave `source` untouched
pub fn no_change(recipe: &str, source: &str) -> Result<()> {
    let source = java(source);
    let result = run_with(recipe, &RecipeOptions::new(), &source)?;
    assert_eq!(result.after, source, "{recipe} should not have changed the source");
    assert!(result.changed_by.is_empty());
    Ok(())
}

/// Parse numbers with commas: "1,234" -> 1234
pub fn parse_number(s: &str) -> Result<usize> {
    s.replace(',', "")
        .parse::<usize>()
        .with_context(|| format!("Failed to parse number: {s}"))
}

/// A fresh scratch directory under the system temp dir
pub fn scratch_dir(name: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("staticfix-test-{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir)?;
    }
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
