// Copyright (C) Brian G. Milnes 2025

//! Review mode: report what recipes would change without writing anything

pub mod analyzer {
    use anyhow::Result;
    use serde::Serialize;
    use std::path::PathBuf;

    use crate::edit::edit::non_overlapping;
    use crate::parser::parser::CompilationUnit;
    use crate::recipe::recipe::Recipe;

    /// One place a recipe would rewrite
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Finding {
        pub recipe: String,
        pub file: PathBuf,
        pub line: usize,
        pub message: String,
        pub original: String,
        pub replacement: String,
        pub tags: Vec<String>,
    }

    impl std::fmt::Display for Finding {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "{}:{}: [{}] {}",
                self.file.display(),
                self.line,
                self.recipe.rsplit('.').next().unwrap_or(&self.recipe),
                self.message
            )
        }
    }

    /// Findings of every recipe against the unit as it is now
    pub fn analyze(unit: &CompilationUnit, recipes: &[Box<dyn Recipe>]) -> Result<Vec<Finding>> {
        if unit.has_syntax_errors() {
            return Ok(Vec::new());
        }

        let source = unit.source();
        let mut findings = Vec::new();

        for recipe in recipes {
            let descriptor = recipe.descriptor();
            for edit in non_overlapping(recipe.visit(unit)?) {
                let original = &source[edit.start..edit.end];
                if original == edit.replacement {
                    continue;
                }
                let line = source[..edit.start].matches('\n').count() + 1;
                findings.push(Finding {
                    recipe: descriptor.name.to_string(),
                    file: unit.path().to_path_buf(),
                    line,
                    message: descriptor.display_name.to_string(),
                    original: original.to_string(),
                    replacement: edit.replacement.clone(),
                    tags: descriptor.tags.iter().map(|t| t.to_string()).collect(),
                });
            }
        }

        findings.sort_by(|a, b| a.line.cmp(&b.line).then(a.recipe.cmp(&b.recipe)));
        Ok(findings)
    }
}
