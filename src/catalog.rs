// Copyright (C) Brian G. Milnes 2025

//! Catalog of recipes and recipe lists for documentation

pub mod catalog {
    use anyhow::Result;
    use serde::Serialize;

    use crate::recipe::recipe::RecipeDescriptor;
    use crate::registry::registry::{RecipeList, RecipeRegistry};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Catalog<'a> {
        recipes: Vec<&'static RecipeDescriptor>,
        recipe_lists: Vec<&'a RecipeList>,
    }

    pub fn to_json(registry: &RecipeRegistry) -> Result<String> {
        let catalog = Catalog {
            recipes: registry.descriptors().collect(),
            recipe_lists: registry.lists().collect(),
        };
        Ok(serde_json::to_string_pretty(&catalog)?)
    }

    fn effort(minutes: u32) -> String {
        if minutes >= 60 && minutes % 60 == 0 {
            format!("{}h", minutes / 60)
        } else {
            format!("{minutes}min")
        }
    }

    pub fn to_markdown(registry: &RecipeRegistry) -> String {
        let mut out = String::new();
        out.push_str("# Recipe catalog\n\n");

        out.push_str("## Recipe lists\n\n");
        for list in registry.lists() {
            out.push_str(&format!("### {}\n\n`{}`\n\n", list.display_name, list.name));
            if !list.description.is_empty() {
                out.push_str(&format!("{}\n\n", list.description.trim()));
            }
            for item in &list.recipe_list {
                if item.options.is_empty() {
                    out.push_str(&format!("- `{}`\n", item.name));
                } else {
                    let options: Vec<String> = item
                        .options
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect();
                    out.push_str(&format!("- `{}` ({})\n", item.name, options.join(", ")));
                }
            }
            out.push('\n');
        }

        out.push_str("## Recipes\n\n");
        out.push_str("| Recipe | Name | Effort | Tags |\n");
        out.push_str("|---|---|---|---|\n");
        for d in registry.descriptors() {
            out.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                d.display_name,
                d.name,
                effort(d.effort_minutes),
                d.tags.join(", ")
            ));
        }
        out.push('\n');

        for d in registry.descriptors() {
            out.push_str(&format!("### {}\n\n{}\n\n", d.display_name, d.description));
            if !d.options.is_empty() {
                out.push_str("| Option | Type | Required | Description | Example |\n");
                out.push_str("|---|---|---|---|---|\n");
                for o in d.options {
                    out.push_str(&format!(
                        "| `{}` | {:?} | {} | {} | `{}` |\n",
                        o.name,
                        o.kind,
                        if o.required { "yes" } else { "no" },
                        o.description,
                        o.example
                    ));
                }
                out.push('\n');
            }
        }

        out
    }
}
