// Copyright (C) Brian G. Milnes 2025

//! Tests for run logs

use anyhow::Result;
use std::path::Path;

mod common;
use common::{java, scratch_dir};
use staticfix::logging::logging::ToolLogger;
use staticfix::tool_runner::tool_runner::{run_tool, ToolConfig, ToolReport};
use staticfix::{RecipeOptions, RecipeRegistry, RecipeRunner};

#[test]
fn test_log_records_results_and_summary() -> Result<()> {
    let dir = scratch_dir("logging")?;
    let registry = RecipeRegistry::builtin()?;
    let runner = RecipeRunner::new(registry.instantiate("NeedBraces", &RecipeOptions::new())?);

    let changed = runner.run_source(
        Path::new("A.java"),
        &java("\nclass A {\n    void f(boolean b) {\n        if (b) f(false);\n    }\n}\n"),
    )?;
    let broken = runner.run_source(Path::new("B.java"), "class B {")?;

    let mut logger = ToolLogger::in_dir(&dir, "staticfix-fix");
    logger.log_result("A.java", &changed);
    logger.log_result("B.java", &broken);
    assert_eq!(logger.files_seen(), 2);
    assert_eq!(logger.files_changed(), 1);

    logger.finalize("Summary: 2 files checked, 1 changed");
    let path = logger.log_path().expect("log file was created").to_path_buf();
    drop(logger);

    assert!(path.starts_with(dir.join("staticfix-fix")));
    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("A.java: staticfix.java.NeedBraces"));
    assert!(text.contains("B.java: skipped, source has syntax errors"));
    assert!(text.contains("=== Run Summary ==="));
    assert!(text.contains("Summary: 2 files checked, 1 changed"));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_disabled_logger_still_counts() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;
    let runner = RecipeRunner::new(registry.instantiate("NeedBraces", &RecipeOptions::new())?);
    let unchanged = runner.run_source(Path::new("A.java"), "class A {\n}\n")?;

    let mut logger = ToolLogger::new_disabled();
    logger.log_result("A.java", &unchanged);
    assert_eq!(logger.files_seen(), 1);
    assert_eq!(logger.files_changed(), 0);
    assert!(logger.log_path().is_none());
    Ok(())
}

#[test]
fn test_run_tool_logs_summary_and_passes_report_through() -> Result<()> {
    let dir = scratch_dir("tool-runner")?;
    let config = ToolConfig::new("staticfix-review", dir.clone())
        .with_logging(true)
        .with_log_root(dir.clone());

    let report = run_tool(config, |logger| {
        logger.log("A.java:3: [NeedBraces]");
        Ok(ToolReport::unclean("Summary: 1 files checked, 1 findings"))
    })?;
    assert!(!report.clean);
    assert_eq!(report.exit_code(), 1);

    let day = std::fs::read_dir(dir.join("staticfix-review"))?
        .next()
        .expect("a dated log directory")?
        .path();
    let log = std::fs::read_dir(&day)?.next().expect("a run log")?.path();
    let text = std::fs::read_to_string(log)?;
    assert!(text.contains("A.java:3: [NeedBraces]"));
    assert!(text.contains("Completed in"));
    assert!(text.contains("Summary: 1 files checked, 1 findings"));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
