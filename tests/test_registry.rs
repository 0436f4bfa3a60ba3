// Copyright (C) Brian G. Milnes 2025

//! Tests for the recipe registry, YAML recipe lists, and the catalog

use anyhow::Result;
use staticfix::catalog::catalog::{to_json, to_markdown};
use staticfix::recipe::recipe::OptionDescriptor;
use staticfix::{OptionKind, OptionValue, RecipeDescriptor, RecipeOptions, RecipeRegistry};

static TUNABLE: RecipeDescriptor = RecipeDescriptor {
    name: "test.Tunable",
    display_name: "Tunable",
    description: "Takes one option of each kind.",
    effort_minutes: 1,
    tags: &[],
    options: &[
        OptionDescriptor {
            name: "strict",
            display_name: "Strict",
            description: "Be strict.",
            example: "true",
            kind: OptionKind::Boolean,
            required: false,
        },
        OptionDescriptor {
            name: "depth",
            display_name: "Depth",
            description: "How deep to look.",
            example: "3",
            kind: OptionKind::Integer,
            required: true,
        },
    ],
};

fn names(registry: &RecipeRegistry, name: &str) -> Result<Vec<&'static str>> {
    Ok(registry
        .instantiate(name, &RecipeOptions::new())?
        .iter()
        .map(|r| r.name())
        .collect())
}

#[test]
fn test_builtin_registry_has_every_recipe() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;
    assert_eq!(registry.descriptors().count(), 23);
    assert!(registry.list("staticfix.CommonStaticAnalysis").is_some());
    assert!(registry.list("staticfix.CodeCleanup").is_some());

    for descriptor in registry.descriptors() {
        assert!(descriptor.name.starts_with("staticfix.java."), "{}", descriptor.name);
        assert!(!descriptor.display_name.is_empty());
        assert!(!descriptor.description.is_empty());
    }
    Ok(())
}

#[test]
fn test_nested_lists_flatten_in_order() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;
    let common = names(&registry, "staticfix.CommonStaticAnalysis")?;
    let cleanup = names(&registry, "staticfix.CodeCleanup")?;

    assert_eq!(common.len(), 22);
    assert_eq!(common.first(), Some(&"staticfix.java.BooleanChecksNotInverted"));
    assert!(common.ends_with(&cleanup));
    Ok(())
}

#[test]
fn test_simple_names_resolve() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;
    assert_eq!(
        registry.resolve_name("TryWithResources")?,
        "staticfix.java.TryWithResources"
    );
    assert_eq!(registry.resolve_name("CodeCleanup")?, "staticfix.CodeCleanup");
    assert!(registry.resolve_name("NoSuchRecipe").is_err());
    Ok(())
}

#[test]
fn test_ambiguous_simple_name_rejected() -> Result<()> {
    let mut registry = RecipeRegistry::builtin()?;
    registry.load_yaml(
        r#"
type: specs.staticfix.dev/v1/recipe
name: team.NeedBraces
recipeList:
  - staticfix.java.NeedBraces
"#,
    )?;
    let err = registry.resolve_name("NeedBraces").unwrap_err();
    assert!(err.to_string().contains("ambiguous"));
    Ok(())
}

#[test]
fn test_yaml_lists_with_options() -> Result<()> {
    let mut registry = RecipeRegistry::builtin()?;
    let added = registry.load_yaml(
        r#"
type: specs.staticfix.dev/v1/recipe
name: team.Cleanup
displayName: Team cleanup
description: What the team runs before review.
tags: [team]
recipeList:
  - staticfix.java.RemoveAnnotation:
      annotationPattern: "@java.lang.Deprecated"
  - ModifierOrder
---
type: specs.staticfix.dev/v1/recipe
name: team.Everything
recipeList:
  - team.Cleanup
  - staticfix.java.NeedBraces
"#,
    )?;
    assert_eq!(added, 2);
    registry.validate()?;

    assert_eq!(
        names(&registry, "team.Everything")?,
        vec![
            "staticfix.java.RemoveAnnotation",
            "staticfix.java.ModifierOrder",
            "staticfix.java.NeedBraces",
        ]
    );

    let list = registry.list("team.Cleanup").expect("list was loaded");
    assert_eq!(list.display_name, "Team cleanup");
    assert_eq!(list.tags, vec!["team".to_string()]);
    assert_eq!(
        list.recipe_list[0].options,
        RecipeOptions::new().with(
            "annotationPattern",
            OptionValue::String("@java.lang.Deprecated".to_string())
        )
    );
    Ok(())
}

#[test]
fn test_cyclic_lists_rejected() -> Result<()> {
    let mut registry = RecipeRegistry::builtin()?;
    registry.load_yaml(
        r#"
type: specs.staticfix.dev/v1/recipe
name: team.A
recipeList:
  - team.B
---
type: specs.staticfix.dev/v1/recipe
name: team.B
recipeList:
  - team.A
"#,
    )?;
    let err = registry.validate().unwrap_err();
    assert!(format!("{err:#}").contains("cycle"), "{err:#}");
    Ok(())
}

#[test]
fn test_bad_documents_rejected() -> Result<()> {
    let mut registry = RecipeRegistry::builtin()?;

    assert!(registry
        .load_yaml("type: something/else\nname: team.X\nrecipeList: []\n")
        .is_err());
    assert!(registry
        .load_yaml("type: specs.staticfix.dev/v1/recipe\nname: team.X\nrecipes: []\n")
        .is_err());
    assert!(registry
        .load_yaml("type: specs.staticfix.dev/v1/recipe\nname: staticfix.CodeCleanup\nrecipeList: []\n")
        .is_err());
    Ok(())
}

#[test]
fn test_unknown_recipe_in_list_fails_validation() -> Result<()> {
    let mut registry = RecipeRegistry::builtin()?;
    registry.load_yaml(
        "type: specs.staticfix.dev/v1/recipe\nname: team.Broken\nrecipeList:\n  - staticfix.java.DoesNotExist\n",
    )?;
    assert!(registry.validate().is_err());
    Ok(())
}

#[test]
fn test_options_are_validated() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;

    let unknown = RecipeOptions::new().with("color", OptionValue::String("red".to_string()));
    assert!(registry.instantiate("NeedBraces", &unknown).is_err());

    let for_list = RecipeOptions::new().with("annotationPattern", OptionValue::String("x.Y".to_string()));
    let err = registry.instantiate("CodeCleanup", &for_list).err().expect("lists take no options");
    assert!(err.to_string().contains("does not take options"));

    let pairs = RecipeOptions::from_pairs(&["ignoreVariablesNamed=a,b".to_string()])?;
    assert_eq!(registry.instantiate("RemoveUnusedLocalVariables", &pairs)?.len(), 1);
    assert!(RecipeOptions::from_pairs(&["novalue".to_string()]).is_err());
    Ok(())
}

#[test]
fn test_catalog_lists_recipes_and_lists() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;

    let json: serde_json::Value = serde_json::from_str(&to_json(&registry)?)?;
    assert_eq!(json["recipes"].as_array().map(|a| a.len()), Some(23));
    assert_eq!(json["recipeLists"].as_array().map(|a| a.len()), Some(2));

    let markdown = to_markdown(&registry);
    assert!(markdown.contains("# Recipe catalog"));
    assert!(markdown.contains("`staticfix.java.TryWithResources`"));
    assert!(markdown.contains("`annotationPattern`"));
    Ok(())
}

#[test]
fn test_command_line_options_coerced_to_declared_kinds() -> Result<()> {
    let pairs = ["strict=true".to_string(), "depth=3".to_string()];
    let options = RecipeOptions::from_pairs(&pairs)?.validated(&TUNABLE)?;
    assert_eq!(options.get_bool("strict"), Some(true));
    assert_eq!(options.get_int("depth"), Some(3));
    assert_eq!(options.get_str("depth"), None);

    let bad_bool = RecipeOptions::from_pairs(&["strict=maybe".to_string(), "depth=1".to_string()])?;
    assert!(bad_bool.validated(&TUNABLE).is_err());

    let missing = RecipeOptions::from_pairs(&["strict=false".to_string()])?;
    let err = missing.validated(&TUNABLE).unwrap_err();
    assert!(err.to_string().contains("requires option 'depth'"));

    // YAML values arrive typed; strings still work for string options
    let typed = RecipeOptions::new()
        .with("strict", OptionValue::Boolean(false))
        .with("depth", OptionValue::Integer(2));
    assert_eq!(typed.validated(&TUNABLE)?.get_int("depth"), Some(2));
    Ok(())
}
