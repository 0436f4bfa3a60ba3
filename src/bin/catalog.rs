// Copyright (C) Brian G. Milnes 2025

//! Catalog: list every recipe and recipe list with its metadata
//!
//! Usage:
//!   staticfix-catalog                      # Markdown on stdout
//!   staticfix-catalog --format json
//!   staticfix-catalog --config team-recipes.yml
//!
//! Binary: staticfix-catalog

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use staticfix::catalog::catalog::{to_json, to_markdown};
use staticfix::RecipeRegistry;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

#[derive(Parser)]
#[command(name = "staticfix-catalog")]
#[command(about = "List the available recipes and recipe lists", long_about = None)]
struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Extra YAML recipe list file (repeatable)
    #[arg(long = "config")]
    configs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut registry = RecipeRegistry::builtin()?;
    for config in &args.configs {
        registry.load_yaml_file(config)?;
    }
    registry.validate()?;

    match args.format {
        Format::Markdown => print!("{}", to_markdown(&registry)),
        Format::Json => println!("{}", to_json(&registry)?),
    }
    Ok(())
}
