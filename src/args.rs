// Copyright (C) Brian G. Milnes 2025

//! Command line arguments shared by the staticfix tools
//!
//! Paths can be given positionally or with `-f`/`-d`; with none, the current
//! directory is searched. Recipes are chosen with `-r` (repeatable) and default
//! to `staticfix.CommonStaticAnalysis`.

pub mod args {
    use anyhow::{bail, Context, Result};
    use clap::Args;
    use std::path::{Path, PathBuf};
    use walkdir::{DirEntry, WalkDir};

    use crate::parser::parser::SourceLanguage;
    use crate::recipe::recipe::{Recipe, RecipeOptions};
    use crate::registry::registry::RecipeRegistry;
    use crate::runner::runner::DEFAULT_MAX_CYCLES;

    pub const DEFAULT_RECIPE: &str = "staticfix.CommonStaticAnalysis";

    /// Directories never worth descending into
    const SKIPPED_DIRS: &[&str] = &["target", "build", "out", "node_modules", ".git", ".gradle", ".idea"];

    #[derive(Args, Debug, Clone, Default)]
    pub struct StandardArgs {
        /// Files or directories to process
        pub paths: Vec<PathBuf>,

        /// A single file to process (repeatable)
        #[arg(short = 'f', long = "file")]
        pub files: Vec<PathBuf>,

        /// A directory to search for sources (repeatable)
        #[arg(short = 'd', long = "dir")]
        pub dirs: Vec<PathBuf>,

        /// Recipe or recipe list to run, full or simple name (repeatable)
        #[arg(short = 'r', long = "recipe")]
        pub recipes: Vec<String>,

        /// Recipe option as key=value; needs exactly one -r
        #[arg(short = 'o', long = "option")]
        pub options: Vec<String>,

        /// Extra YAML recipe list file (repeatable)
        #[arg(long = "config")]
        pub configs: Vec<PathBuf>,

        /// Upper bound on fixed-point cycles per file
        #[arg(long, default_value_t = DEFAULT_MAX_CYCLES)]
        pub max_cycles: usize,

        /// Also write a run log under logs/<tool>/
        #[arg(long)]
        pub log: bool,
    }

    impl StandardArgs {
        pub fn base_dir(&self) -> PathBuf {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }

        /// Everything named on the command line, or the current directory
        pub fn get_search_dirs(&self) -> Vec<PathBuf> {
            let mut dirs: Vec<PathBuf> = self
                .paths
                .iter()
                .chain(&self.files)
                .chain(&self.dirs)
                .cloned()
                .collect();
            if dirs.is_empty() {
                dirs.push(self.base_dir());
            }
            dirs
        }

        /// Built-in recipes plus any `--config` lists, validated
        pub fn registry(&self) -> Result<RecipeRegistry> {
            let mut registry = RecipeRegistry::builtin()?;
            for config in &self.configs {
                registry.load_yaml_file(config)?;
            }
            registry.validate()?;
            Ok(registry)
        }

        /// The fully qualified names to run
        pub fn recipe_names(&self) -> Vec<String> {
            if self.recipes.is_empty() {
                vec![DEFAULT_RECIPE.to_string()]
            } else {
                self.recipes.clone()
            }
        }

        /// Instantiate the selected recipes in command line order
        pub fn selected_recipes(&self, registry: &RecipeRegistry) -> Result<Vec<Box<dyn Recipe>>> {
            let options = RecipeOptions::from_pairs(&self.options)?;
            if !options.is_empty() && self.recipes.len() != 1 {
                bail!("--option needs exactly one --recipe to apply to");
            }

            let mut selected = Vec::new();
            for name in self.recipe_names() {
                selected.extend(
                    registry
                        .instantiate(&name, &options)
                        .with_context(|| format!("Cannot run recipe '{name}'"))?,
                );
            }
            Ok(selected)
        }
    }

    fn is_skipped_dir(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| SKIPPED_DIRS.contains(&name))
    }

    /// Every file with a recognized source extension under the given paths
    pub fn find_source_files(paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                if SourceLanguage::from_path(path).is_some() {
                    files.push(path.clone());
                }
                continue;
            }
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| !is_skipped_dir(e))
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && SourceLanguage::from_path(entry.path()).is_some() {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
        files.sort();
        files.dedup();
        files
    }

    /// Java sources under the given paths
    pub fn find_java_files(paths: &[PathBuf]) -> Vec<PathBuf> {
        find_source_files(paths)
            .into_iter()
            .filter(|p| SourceLanguage::from_path(p) == Some(SourceLanguage::Java))
            .collect()
    }

    /// Recognized sources in languages without a grammar
    pub fn unsupported_files(files: &[PathBuf]) -> Vec<&Path> {
        files
            .iter()
            .filter(|p| SourceLanguage::from_path(p).is_some_and(|l| !l.is_supported()))
            .map(|p| p.as_path())
            .collect()
    }

    /// `1234567` -> `1,234,567`
    pub fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}
