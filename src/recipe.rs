// Copyright (C) Brian G. Milnes 2025

//! The recipe contract: metadata, options, and the visitor entry point

pub mod recipe {
    use anyhow::{bail, Result};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;
    use std::fmt;

    use crate::edit::edit::TextEdit;
    use crate::parser::parser::CompilationUnit;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub enum OptionKind {
        String,
        Boolean,
        Integer,
    }

    /// A named, typed option a recipe accepts
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OptionDescriptor {
        pub name: &'static str,
        pub display_name: &'static str,
        pub description: &'static str,
        pub example: &'static str,
        pub kind: OptionKind,
        pub required: bool,
    }

    /// Catalog metadata for one recipe
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RecipeDescriptor {
        /// Fully qualified name, e.g. `staticfix.java.TryWithResources`
        pub name: &'static str,
        pub display_name: &'static str,
        pub description: &'static str,
        /// Estimated remediation effort per occurrence, in minutes
        pub effort_minutes: u32,
        pub tags: &'static [&'static str],
        pub options: &'static [OptionDescriptor],
    }

    impl RecipeDescriptor {
        pub fn option(&self, name: &str) -> Option<&'static OptionDescriptor> {
            self.options.iter().find(|o| o.name == name)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum OptionValue {
        Boolean(bool),
        Integer(i64),
        String(String),
    }

    impl fmt::Display for OptionValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                OptionValue::Boolean(b) => write!(f, "{b}"),
                OptionValue::Integer(i) => write!(f, "{i}"),
                OptionValue::String(s) => write!(f, "{s}"),
            }
        }
    }

    impl OptionValue {
        /// Convert to the declared kind, accepting strings from the command line
        fn coerce(&self, kind: OptionKind) -> Option<OptionValue> {
            match (kind, self) {
                (OptionKind::String, OptionValue::String(_)) => Some(self.clone()),
                (OptionKind::String, other) => Some(OptionValue::String(other.to_string())),
                (OptionKind::Boolean, OptionValue::Boolean(_)) => Some(self.clone()),
                (OptionKind::Boolean, OptionValue::String(s)) => match s.as_str() {
                    "true" => Some(OptionValue::Boolean(true)),
                    "false" => Some(OptionValue::Boolean(false)),
                    _ => None,
                },
                (OptionKind::Integer, OptionValue::Integer(_)) => Some(self.clone()),
                (OptionKind::Integer, OptionValue::String(s)) => {
                    s.parse().ok().map(OptionValue::Integer)
                }
                _ => None,
            }
        }
    }

    /// Option values for one recipe instance
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RecipeOptions {
        values: BTreeMap<String, OptionValue>,
    }

    impl RecipeOptions {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn from_map(values: BTreeMap<String, OptionValue>) -> Self {
            RecipeOptions { values }
        }

        pub fn with(mut self, name: &str, value: OptionValue) -> Self {
            self.values.insert(name.to_string(), value);
            self
        }

        /// Parse `key=value` pairs from the command line
        pub fn from_pairs(pairs: &[String]) -> Result<Self> {
            let mut options = RecipeOptions::new();
            for pair in pairs {
                let Some((key, value)) = pair.split_once('=') else {
                    bail!("Option '{pair}' is not of the form key=value");
                };
                options
                    .values
                    .insert(key.trim().to_string(), OptionValue::String(value.to_string()));
            }
            Ok(options)
        }

        pub fn is_empty(&self) -> bool {
            self.values.is_empty()
        }

        pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
            self.values.iter()
        }

        /// Check against a descriptor: no unknown names, required present, kinds match
        pub fn validated(&self, descriptor: &RecipeDescriptor) -> Result<RecipeOptions> {
            let mut checked = BTreeMap::new();

            for (name, value) in &self.values {
                let Some(option) = descriptor.option(name) else {
                    bail!("Recipe {} has no option '{}'", descriptor.name, name);
                };
                let Some(coerced) = value.coerce(option.kind) else {
                    bail!(
                        "Option '{}' of {} expects {:?}, got '{}'",
                        name,
                        descriptor.name,
                        option.kind,
                        value
                    );
                };
                checked.insert(name.clone(), coerced);
            }

            for option in descriptor.options.iter().filter(|o| o.required) {
                if !checked.contains_key(option.name) {
                    bail!(
                        "Recipe {} requires option '{}' (e.g. {})",
                        descriptor.name,
                        option.name,
                        option.example
                    );
                }
            }

            Ok(RecipeOptions { values: checked })
        }

        pub fn get_str(&self, name: &str) -> Option<&str> {
            match self.values.get(name) {
                Some(OptionValue::String(s)) => Some(s),
                _ => None,
            }
        }

        pub fn get_bool(&self, name: &str) -> Option<bool> {
            match self.values.get(name) {
                Some(OptionValue::Boolean(b)) => Some(*b),
                _ => None,
            }
        }

        pub fn get_int(&self, name: &str) -> Option<i64> {
            match self.values.get(name) {
                Some(OptionValue::Integer(i)) => Some(*i),
                _ => None,
            }
        }
    }

    /// A rule that inspects one compilation unit and proposes edits
    ///
    /// Returning no edits means "no match". Recipes must decline rather than
    /// guess when a rewrite cannot be shown to preserve behavior.
    pub trait Recipe: Send + Sync {
        fn descriptor(&self) -> &'static RecipeDescriptor;

        fn visit(&self, unit: &CompilationUnit) -> Result<Vec<TextEdit>>;

        fn name(&self) -> &'static str {
            self.descriptor().name
        }
    }

    /// Builds a recipe from already validated options
    pub type RecipeFactory = fn(&RecipeOptions) -> Result<Box<dyn Recipe>>;
}
