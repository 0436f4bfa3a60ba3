// Copyright (C) Brian G. Milnes 2025

//! Fix: run recipes over Java sources and write the results back
//!
//! Usage:
//!   staticfix-fix                                   # CommonStaticAnalysis on .
//!   staticfix-fix -d src/main/java -r CodeCleanup
//!   staticfix-fix Foo.java -r RemoveAnnotation -o annotationPattern=@lombok.*
//!   staticfix-fix --dry-run --config team-recipes.yml -r team.Cleanup
//!
//! Binary: staticfix-fix

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use staticfix::args::args::unsupported_files;
use staticfix::tool_runner::tool_runner::{run_tool, ToolConfig, ToolReport};
use staticfix::{find_java_files, find_source_files, format_number, RecipeRunner, StandardArgs};

macro_rules! log {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let msg = format!($($arg)*);
        println!("{}", msg);
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("analyses/staticfix-fix.log")
        {
            let _ = writeln!(file, "{}", msg);
        }
    }};
}

#[derive(Parser)]
#[command(name = "staticfix-fix")]
#[command(about = "Apply static analysis fix recipes to Java sources", long_about = None)]
struct Args {
    #[command(flatten)]
    standard: StandardArgs,

    /// Report changes without writing files
    #[arg(long)]
    dry_run: bool,
}

fn relative<'a>(path: &'a Path, base: &Path) -> std::borrow::Cow<'a, str> {
    path.strip_prefix(base).unwrap_or(path).to_string_lossy()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let standard = &args.standard;
    let base_dir = standard.base_dir();

    let registry = standard.registry()?;
    let recipes = standard.selected_recipes(&registry)?;
    let runner = RecipeRunner::new(recipes).with_max_cycles(standard.max_cycles);

    let config = ToolConfig::new("staticfix-fix", base_dir.clone()).with_logging(standard.log);
    let report = run_tool(config, |logger| {
        let search = standard.get_search_dirs();
        let sources = find_source_files(&search);
        for skipped in unsupported_files(&sources) {
            log!("{}: skipped, no grammar for this language", relative(skipped, &base_dir));
        }

        let files = find_java_files(&search);
        log!(
            "Running {} recipe(s) over {} Java file(s){}",
            format_number(runner.recipes().len()),
            format_number(files.len()),
            if args.dry_run { " (dry run)" } else { "" }
        );
        log!("");

        let mut failures = 0;
        for (path, outcome) in runner.run_files(&files) {
            let shown = relative(&path, &base_dir);
            match outcome {
                Ok(result) => {
                    logger.log_result(&shown, &result);
                    if args.dry_run {
                        continue;
                    }
                    if let Err(e) = result.write_back() {
                        failures += 1;
                        log!("{shown}: error: {e:#}");
                    }
                }
                Err(e) => {
                    failures += 1;
                    log!("{shown}: error: {e:#}");
                }
            }
        }

        let verb = if args.dry_run { "would change" } else { "changed" };
        let mut summary = format!(
            "Summary: {} files checked, {} {verb}",
            format_number(logger.files_seen()),
            format_number(logger.files_changed())
        );
        if failures > 0 {
            summary.push_str(&format!(", {} failed", format_number(failures)));
            return Ok(ToolReport::unclean(summary));
        }
        Ok(ToolReport::clean(summary))
    })?;

    if !report.clean {
        std::process::exit(report.exit_code());
    }
    Ok(())
}
