// Copyright (C) Brian G. Milnes 2025

//! Recipe registry and declarative recipe lists
//!
//! The registry is an ordinary value built once by the caller and passed by
//! reference. Recipe lists are multi-document YAML:
//!
//! ```yaml
//! type: specs.staticfix.dev/v1/recipe
//! name: staticfix.CodeCleanup
//! displayName: Code cleanup
//! recipeList:
//!   - staticfix.java.ModifierOrder
//!   - staticfix.java.RemoveAnnotation:
//!       annotationPattern: "@java.lang.Deprecated"
//! ```

pub mod registry {
    use anyhow::{anyhow, bail, Context, Result};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::path::Path;

    use crate::recipe::recipe::{OptionValue, Recipe, RecipeDescriptor, RecipeFactory, RecipeOptions};
    use crate::recipes;

    pub const RECIPE_LIST_TYPE: &str = "specs.staticfix.dev/v1/recipe";

    const BUILTIN_LISTS: &[(&str, &str)] = &[
        ("code-cleanup.yml", include_str!("../resources/code-cleanup.yml")),
        ("common-static-analysis.yml", include_str!("../resources/common-static-analysis.yml")),
    ];

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    struct RecipeListDocument {
        #[serde(rename = "type")]
        kind: String,
        name: String,
        display_name: Option<String>,
        description: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
        recipe_list: Vec<RecipeListEntry>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum RecipeListEntry {
        Name(String),
        Configured(BTreeMap<String, BTreeMap<String, OptionValue>>),
    }

    /// One step of a recipe list: a recipe or list name with fixed options
    #[derive(Debug, Clone, Serialize)]
    pub struct RecipeListItem {
        pub name: String,
        pub options: RecipeOptions,
    }

    /// A named bundle of recipes
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecipeList {
        pub name: String,
        pub display_name: String,
        pub description: String,
        pub tags: Vec<String>,
        pub recipe_list: Vec<RecipeListItem>,
    }

    #[derive(Clone)]
    struct RegisteredRecipe {
        descriptor: &'static RecipeDescriptor,
        factory: RecipeFactory,
    }

    #[derive(Clone, Default)]
    pub struct RecipeRegistry {
        recipes: BTreeMap<String, RegisteredRecipe>,
        lists: BTreeMap<String, RecipeList>,
    }

    impl RecipeRegistry {
        pub fn new() -> Self {
            Self::default()
        }

        /// All built-in recipes and recipe lists
        pub fn builtin() -> Result<Self> {
            let mut registry = RecipeRegistry::new();
            for (descriptor, factory) in recipes::all() {
                registry.register(descriptor, factory)?;
            }
            for (file, text) in BUILTIN_LISTS {
                registry
                    .load_yaml(text)
                    .with_context(|| format!("Built-in recipe list {file}"))?;
            }
            registry.validate()?;
            Ok(registry)
        }

        pub fn register(&mut self, descriptor: &'static RecipeDescriptor, factory: RecipeFactory) -> Result<()> {
            if self.recipes.contains_key(descriptor.name) || self.lists.contains_key(descriptor.name) {
                bail!("Recipe {} is already registered", descriptor.name);
            }
            self.recipes
                .insert(descriptor.name.to_string(), RegisteredRecipe { descriptor, factory });
            Ok(())
        }

        /// Load recipe lists from YAML text; returns how many were added
        pub fn load_yaml(&mut self, text: &str) -> Result<usize> {
            let mut added = 0;
            for document in serde_yaml::Deserializer::from_str(text) {
                let document = RecipeListDocument::deserialize(document)
                    .context("Malformed recipe list document")?;
                let list = Self::list_from_document(document)?;
                if self.recipes.contains_key(&list.name) || self.lists.contains_key(&list.name) {
                    bail!("Recipe list {} is already defined", list.name);
                }
                self.lists.insert(list.name.clone(), list);
                added += 1;
            }
            Ok(added)
        }

        pub fn load_yaml_file(&mut self, path: &Path) -> Result<usize> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            self.load_yaml(&text)
                .with_context(|| format!("Failed to load recipe lists from {}", path.display()))
        }

        fn list_from_document(document: RecipeListDocument) -> Result<RecipeList> {
            if document.kind != RECIPE_LIST_TYPE {
                bail!(
                    "Recipe list {} has type '{}', expected '{}'",
                    document.name,
                    document.kind,
                    RECIPE_LIST_TYPE
                );
            }

            let mut items = Vec::with_capacity(document.recipe_list.len());
            for entry in document.recipe_list {
                match entry {
                    RecipeListEntry::Name(name) => items.push(RecipeListItem {
                        name,
                        options: RecipeOptions::new(),
                    }),
                    RecipeListEntry::Configured(map) => {
                        if map.len() != 1 {
                            bail!(
                                "Recipe list {}: a configured entry must name exactly one recipe",
                                document.name
                            );
                        }
                        for (name, options) in map {
                            items.push(RecipeListItem {
                                name,
                                options: RecipeOptions::from_map(options),
                            });
                        }
                    }
                }
            }

            Ok(RecipeList {
                display_name: document.display_name.unwrap_or_else(|| document.name.clone()),
                description: document.description.unwrap_or_default(),
                name: document.name,
                tags: document.tags,
                recipe_list: items,
            })
        }

        /// Fully qualified name for a full or unique simple name
        pub fn resolve_name(&self, name: &str) -> Result<String> {
            if self.recipes.contains_key(name) || self.lists.contains_key(name) {
                return Ok(name.to_string());
            }
            let suffix = format!(".{name}");
            let matches: Vec<&String> = self
                .recipes
                .keys()
                .chain(self.lists.keys())
                .filter(|full| full.ends_with(&suffix))
                .collect();
            match matches.as_slice() {
                [only] => Ok((*only).clone()),
                [] => Err(anyhow!("Unknown recipe '{name}'")),
                _ => Err(anyhow!(
                    "Recipe name '{name}' is ambiguous: {}",
                    matches.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ")
                )),
            }
        }

        /// Build the flat, ordered recipe sequence a name stands for
        pub fn instantiate(&self, name: &str, options: &RecipeOptions) -> Result<Vec<Box<dyn Recipe>>> {
            let mut stack = Vec::new();
            let mut out = Vec::new();
            self.instantiate_into(name, options, &mut stack, &mut out)?;
            Ok(out)
        }

        fn instantiate_into(
            &self,
            name: &str,
            options: &RecipeOptions,
            stack: &mut Vec<String>,
            out: &mut Vec<Box<dyn Recipe>>,
        ) -> Result<()> {
            let full = self.resolve_name(name)?;

            if let Some(registered) = self.recipes.get(&full) {
                let validated = options.validated(registered.descriptor)?;
                out.push((registered.factory)(&validated)?);
                return Ok(());
            }

            let list = self
                .lists
                .get(&full)
                .ok_or_else(|| anyhow!("Unknown recipe '{full}'"))?;
            if !options.is_empty() {
                bail!("Recipe list {full} does not take options");
            }
            if stack.contains(&full) {
                stack.push(full);
                bail!("Recipe lists form a cycle: {}", stack.join(" -> "));
            }

            stack.push(full.clone());
            for item in &list.recipe_list {
                self.instantiate_into(&item.name, &item.options, stack, out)
                    .with_context(|| format!("In recipe list {full}"))?;
            }
            stack.pop();
            Ok(())
        }

        /// Instantiate every list once so bad names, options, and cycles surface early
        pub fn validate(&self) -> Result<()> {
            for name in self.lists.keys() {
                self.instantiate(name, &RecipeOptions::new())?;
            }
            Ok(())
        }

        pub fn descriptor(&self, name: &str) -> Option<&'static RecipeDescriptor> {
            let full = self.resolve_name(name).ok()?;
            self.recipes.get(&full).map(|r| r.descriptor)
        }

        pub fn list(&self, name: &str) -> Option<&RecipeList> {
            let full = self.resolve_name(name).ok()?;
            self.lists.get(&full)
        }

        pub fn descriptors(&self) -> impl Iterator<Item = &'static RecipeDescriptor> + '_ {
            self.recipes.values().map(|r| r.descriptor)
        }

        pub fn lists(&self) -> impl Iterator<Item = &RecipeList> {
            self.lists.values()
        }
    }
}
