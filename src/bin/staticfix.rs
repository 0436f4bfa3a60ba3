// Copyright (C) Brian G. Milnes 2025

//! Staticfix: dispatcher for the staticfix tools
//!
//! Usage: staticfix <tool> [args...]
//!
//! Examples:
//!   staticfix fix -d src/main/java
//!   staticfix review -r TryWithResources Foo.java
//!   staticfix catalog --format markdown
//!
//! Binary: staticfix

use std::env;
use std::process::{exit, Command};

const TOOLS: &[(&str, &str)] = &[
    ("fix", "Apply recipes to Java sources in place"),
    ("review", "Report what recipes would change"),
    ("catalog", "List recipes and recipe lists"),
    ("parse", "Print the syntax tree of a Java file"),
];

fn print_usage() {
    eprintln!("Usage: staticfix <tool> [args...]");
    eprintln!();
    eprintln!("Available tools:");
    for (tool, about) in TOOLS {
        eprintln!("  {tool:<10} - {about}");
    }
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  staticfix fix -d src/main/java");
    eprintln!("  staticfix review -r TryWithResources Foo.java");
    eprintln!("  staticfix catalog --format markdown");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        exit(1);
    }
    let tool = &args[1];
    if tool == "-h" || tool == "--help" {
        print_usage();
        return;
    }
    if !TOOLS.iter().any(|(name, _)| name == tool) {
        eprintln!("Error: Unknown tool '{tool}'");
        eprintln!();
        print_usage();
        exit(1);
    }

    let binary_name = format!("staticfix-{tool}");
    let current_exe = env::current_exe().unwrap_or_else(|_| {
        eprintln!("Error: Could not determine current executable path");
        exit(1);
    });
    let bin_dir = current_exe.parent().unwrap_or_else(|| {
        eprintln!("Error: Could not determine binary directory");
        exit(1);
    });
    let target_binary = bin_dir.join(&binary_name);

    if !target_binary.exists() {
        eprintln!("Error: Tool '{tool}' not found");
        eprintln!("Expected binary: {}", target_binary.display());
        exit(1);
    }

    let status = Command::new(&target_binary)
        .args(&args[2..])
        .status()
        .unwrap_or_else(|e| {
            eprintln!("Error executing {binary_name}: {e}");
            exit(1);
        });

    exit(status.code().unwrap_or(1));
}
