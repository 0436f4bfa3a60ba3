// Copyright (C) Brian G. Milnes 2025

//! Parse and display the syntax tree of a Java file

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use staticfix::CompilationUnit;

#[derive(Parser)]
#[command(name = "staticfix-parse")]
#[command(about = "Parse and display the syntax tree of a Java file", long_about = None)]
struct Args {
    /// Path to the Java file to parse
    path: PathBuf,

    /// Also list the nodes tree-sitter marked as errors
    #[arg(long)]
    errors: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();

    let parent_dir = args.path.parent().unwrap_or_else(|| std::path::Path::new("."));
    println!("Entering directory '{}'", parent_dir.display());
    println!();

    println!("{}", staticfix::parse(&args.path)?);

    if args.errors {
        let unit = CompilationUnit::read(&args.path)?;
        let broken = staticfix::ast_utils::ast_utils::find_nodes_where(unit.root(), |n| {
            n.is_error() || n.is_missing()
        });
        println!();
        println!("{} syntax error(s)", broken.len());
        for node in broken {
            println!(
                "{}:{}: {}",
                args.path.display(),
                node.start_position().row + 1,
                node.kind()
            );
        }
    }

    println!();
    println!("Completed in {}ms", start.elapsed().as_millis());
    Ok(())
}
