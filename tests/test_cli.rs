// Copyright (C) Brian G. Milnes 2025

//! Tests for the staticfix binaries, run against scratch source trees

use anyhow::Result;
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

mod common;
use common::{java, parse_number, scratch_dir};

fn get_binary_path(binary_name: &str) -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    path.pop(); // Remove 'deps'
    path.push(binary_name);
    path
}

fn run(binary: &str, dir: &Path, args: &[&str]) -> Output {
    Command::new(get_binary_path(binary))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run {binary}: {e}"))
}

const READER: &str = r#"
import java.io.*;

class Reader {
    int read() throws IOException {
        InputStream in = new FileInputStream("f");
        try {
            return in.read();
        } finally {
            in.close();
        }
    }
}
"#;

const BRACELESS: &str = r#"
class Loop {
    void f(int a) {
        while (a > 0) a--;
    }
}
"#;

/// A scratch project with one Java file under src/
fn project(name: &str, file: &str, text: &str) -> Result<PathBuf> {
    let dir = scratch_dir(name)?;
    fs::create_dir_all(dir.join("src"))?;
    fs::write(dir.join("src").join(file), java(text))?;
    Ok(dir)
}

fn summary_count(stdout: &str, label: &str) -> Option<usize> {
    let line = stdout.lines().find(|l| l.starts_with("Summary:"))?;
    let before = line.split(label).next()?;
    parse_number(before.split_whitespace().last()?).ok()
}

#[test]
#[serial]
fn test_fix_rewrites_files() -> Result<()> {
    let dir = project("fix", "Reader.java", READER)?;
    let output = run("staticfix-fix", &dir, &["-r", "TryWithResources", "src"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("Entering directory"));
    assert!(stdout.contains("src/Reader.java: staticfix.java.TryWithResources"));
    assert_eq!(summary_count(&stdout, "files checked"), Some(1));
    assert_eq!(summary_count(&stdout, "changed"), Some(1));

    let fixed = fs::read_to_string(dir.join("src/Reader.java"))?;
    assert!(fixed.contains("try (InputStream in = new FileInputStream(\"f\")) {"));
    assert!(!fixed.contains("finally"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_fix_dry_run_leaves_files() -> Result<()> {
    let dir = project("dry-run", "Loop.java", BRACELESS)?;
    let output = run("staticfix-fix", &dir, &["--dry-run", "-r", "CodeCleanup"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("1 would change"));
    assert_eq!(fs::read_to_string(dir.join("src/Loop.java"))?, java(BRACELESS));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_fix_reports_unsupported_languages() -> Result<()> {
    let dir = project("kotlin", "Loop.java", BRACELESS)?;
    fs::write(dir.join("src/App.kt"), "fun main() {}\n")?;
    let output = run("staticfix-fix", &dir, &["--dry-run", "src"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("App.kt: skipped, no grammar for this language"));
    assert_eq!(summary_count(&stdout, "files checked"), Some(1));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_fix_options_need_one_recipe() -> Result<()> {
    let dir = project("options", "Loop.java", BRACELESS)?;
    let output = run(
        "staticfix-fix",
        &dir,
        &["-r", "NeedBraces", "-r", "ModifierOrder", "-o", "annotationPattern=x.Y"],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exactly one --recipe"), "{stderr}");

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_review_exits_nonzero_on_findings() -> Result<()> {
    let dir = project("review", "Loop.java", BRACELESS)?;
    let output = run("staticfix-review", &dir, &["-r", "NeedBraces"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "{stdout}");
    assert!(stdout.contains("✗ Found 1 finding(s):"));
    assert!(stdout.contains("[NeedBraces]"));
    // Review never writes
    assert_eq!(fs::read_to_string(dir.join("src/Loop.java"))?, java(BRACELESS));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_review_json_output() -> Result<()> {
    let dir = project("review-json", "Loop.java", BRACELESS)?;
    let output = run("staticfix-review", &dir, &["--format", "json", "-r", "NeedBraces", "src"]);
    assert_eq!(output.status.code(), Some(1));

    let findings: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let findings = findings.as_array().expect("findings are a JSON array");
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["recipe"], "staticfix.java.NeedBraces");
    assert_eq!(findings[0]["line"], 3);

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_review_clean_tree_succeeds() -> Result<()> {
    let dir = project("review-clean", "Loop.java", "\nclass Loop {\n}\n")?;
    let output = run("staticfix-review", &dir, &[]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("✓ No findings"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_dispatcher_runs_catalog() -> Result<()> {
    let dir = scratch_dir("catalog")?;
    let output = run("staticfix", &dir, &["catalog", "--format", "json"]);
    assert!(output.status.success());

    let catalog: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(catalog["recipes"].as_array().map(|a| a.len()), Some(23));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_dispatcher_rejects_unknown_tool() -> Result<()> {
    let dir = scratch_dir("dispatcher")?;

    let output = run("staticfix", &dir, &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Available tools:"));

    let output = run("staticfix", &dir, &["polish"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Unknown tool 'polish'"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
#[serial]
fn test_parse_prints_tree() -> Result<()> {
    let dir = project("parse", "Loop.java", BRACELESS)?;
    let output = run("staticfix-parse", &dir, &["src/Loop.java", "--errors"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("(program (class_declaration"));
    assert!(stdout.contains("0 syntax error(s)"));

    fs::remove_dir_all(&dir)?;
    Ok(())
}
