// Copyright (C) Brian G. Milnes 2025

//! Fixed-point recipe runner
//!
//! Each cycle runs every recipe once, in order, over the unit produced by
//! the previous recipe. Cycles repeat until one changes nothing or the
//! cycle limit is hit.

pub mod runner {
    use anyhow::{Context, Result};
    use rayon::prelude::*;
    use serde::Serialize;
    use std::path::{Path, PathBuf};

    use crate::edit::edit::apply_edits;
    use crate::parser::parser::CompilationUnit;
    use crate::recipe::recipe::Recipe;

    pub const DEFAULT_MAX_CYCLES: usize = 3;

    /// Outcome of running a recipe sequence over one source file
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RunResult {
        pub path: PathBuf,
        #[serde(skip)]
        pub before: String,
        #[serde(skip)]
        pub after: String,
        /// Recipes that changed the file, in first-change order
        pub changed_by: Vec<String>,
        pub cycles: usize,
        /// Still changing when the cycle limit stopped the run
        pub cycle_limit_reached: bool,
        /// Recipes whose edits broke the syntax and were discarded
        pub rejected: Vec<String>,
        /// Why the file was not processed at all
        pub skipped: Option<String>,
    }

    impl RunResult {
        fn unchanged(path: &Path, source: &str, skipped: Option<String>) -> Self {
            RunResult {
                path: path.to_path_buf(),
                before: source.to_string(),
                after: source.to_string(),
                changed_by: Vec::new(),
                cycles: 0,
                cycle_limit_reached: false,
                rejected: Vec::new(),
                skipped,
            }
        }

        pub fn is_changed(&self) -> bool {
            self.before != self.after
        }

        /// Write the rewritten source back to its file; false when unchanged
        pub fn write_back(&self) -> Result<bool> {
            if !self.is_changed() {
                return Ok(false);
            }
            std::fs::write(&self.path, &self.after)
                .with_context(|| format!("Failed to write {}", self.path.display()))?;
            Ok(true)
        }
    }

    pub struct RecipeRunner {
        recipes: Vec<Box<dyn Recipe>>,
        max_cycles: usize,
    }

    impl RecipeRunner {
        pub fn new(recipes: Vec<Box<dyn Recipe>>) -> Self {
            RecipeRunner {
                recipes,
                max_cycles: DEFAULT_MAX_CYCLES,
            }
        }

        pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
            self.max_cycles = max_cycles.max(1);
            self
        }

        pub fn recipes(&self) -> &[Box<dyn Recipe>] {
            &self.recipes
        }

        /// Apply one recipe to a unit; `None` when it matched nothing
        fn step(&self, recipe: &dyn Recipe, unit: &CompilationUnit) -> Result<Option<CompilationUnit>> {
            let edits = recipe
                .visit(unit)
                .with_context(|| format!("{} failed on {}", recipe.name(), unit.path().display()))?;
            if edits.is_empty() {
                return Ok(None);
            }
            let rewritten = apply_edits(unit.source(), edits);
            if rewritten == unit.source() {
                return Ok(None);
            }
            Ok(Some(CompilationUnit::parse(unit.path(), rewritten)?))
        }

        pub fn run_source(&self, path: &Path, source: &str) -> Result<RunResult> {
            let mut unit = CompilationUnit::parse(path, source)?;
            if unit.has_syntax_errors() {
                return Ok(RunResult::unchanged(
                    path,
                    source,
                    Some("source has syntax errors".to_string()),
                ));
            }

            let mut result = RunResult::unchanged(path, source, None);
            loop {
                result.cycles += 1;
                let mut changed = false;

                for recipe in &self.recipes {
                    let Some(next) = self.step(recipe.as_ref(), &unit)? else {
                        continue;
                    };
                    if next.has_syntax_errors() {
                        if !result.rejected.iter().any(|r| r == recipe.name()) {
                            result.rejected.push(recipe.name().to_string());
                        }
                        continue;
                    }
                    unit = next;
                    changed = true;
                    if !result.changed_by.iter().any(|r| r == recipe.name()) {
                        result.changed_by.push(recipe.name().to_string());
                    }
                }

                if !changed {
                    break;
                }
                if result.cycles >= self.max_cycles {
                    result.cycle_limit_reached = self.would_change(&unit)?;
                    break;
                }
            }

            result.after = unit.source().to_string();
            Ok(result)
        }

        /// Whether any recipe still has a valid edit to make
        fn would_change(&self, unit: &CompilationUnit) -> Result<bool> {
            for recipe in &self.recipes {
                if let Some(next) = self.step(recipe.as_ref(), unit)? {
                    if !next.has_syntax_errors() {
                        return Ok(true);
                    }
                }
            }
            Ok(false)
        }

        pub fn run_file(&self, path: &Path) -> Result<RunResult> {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            self.run_source(path, &source)
        }

        /// Run over many files in parallel; failures stay per file
        pub fn run_files(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<RunResult>)> {
            paths
                .par_iter()
                .map(|path| (path.clone(), self.run_file(path)))
                .collect()
        }
    }
}
