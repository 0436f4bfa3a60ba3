// Copyright (C) Brian G. Milnes 2025

//! Review: report what the selected recipes would change, without writing
//!
//! Exits with status 1 when there are findings, so it can gate a build.
//!
//! Usage:
//!   staticfix-review -d src/main/java
//!   staticfix-review --format json -r staticfix.java.TryWithResources Foo.java
//!
//! Binary: staticfix-review

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rayon::prelude::*;

use staticfix::tool_runner::tool_runner::{run_tool, ToolConfig, ToolReport};
use staticfix::{find_java_files, format_number, review_file, Finding, StandardArgs};

macro_rules! log {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let msg = format!($($arg)*);
        println!("{}", msg);
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("analyses/staticfix-review.log")
        {
            let _ = writeln!(file, "{}", msg);
        }
    }};
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "staticfix-review")]
#[command(about = "Report static analysis findings the fix recipes would resolve", long_about = None)]
struct Args {
    #[command(flatten)]
    standard: StandardArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let standard = &args.standard;
    let base_dir = standard.base_dir();

    let registry = standard.registry()?;
    let recipes = standard.selected_recipes(&registry)?;
    let files = find_java_files(&standard.get_search_dirs());

    let mut outcomes: Vec<_> = files
        .par_iter()
        .map(|path| (path, review_file(path, &recipes)))
        .collect();
    outcomes.sort_by(|a, b| a.0.cmp(b.0));

    let mut findings: Vec<Finding> = Vec::new();
    let mut failures = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(found) => findings.extend(found),
            Err(e) => failures.push(format!("{}: error: {e:#}", path.display())),
        }
    }
    for finding in &mut findings {
        if let Ok(rel) = finding.file.strip_prefix(&base_dir) {
            finding.file = rel.to_path_buf();
        }
    }

    if let Format::Json = args.format {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        for failure in &failures {
            eprintln!("{failure}");
        }
    } else {
        let config = ToolConfig::new("staticfix-review", base_dir.clone()).with_logging(standard.log);
        let report = run_tool(config, |logger| {
            if findings.is_empty() {
                log!("✓ No findings");
            } else {
                log!("✗ Found {} finding(s):", format_number(findings.len()));
                log!("");
                for finding in &findings {
                    logger.log_silent(&finding.to_string());
                    log!("{finding}");
                }
            }
            for failure in &failures {
                log!("{failure}");
            }
            let summary = format!(
                "Summary: {} files checked, {} findings",
                format_number(files.len()),
                format_number(findings.len())
            );
            if findings.is_empty() && failures.is_empty() {
                Ok(ToolReport::clean(summary))
            } else {
                Ok(ToolReport::unclean(summary))
            }
        })?;
        if !report.clean {
            std::process::exit(report.exit_code());
        }
        return Ok(());
    }

    if !findings.is_empty() || !failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
