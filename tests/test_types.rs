// Copyright (C) Brian G. Milnes 2025

//! Tests for type name resolution, type patterns, and language detection

use anyhow::Result;
use staticfix::types::types::{erase, TypeMatcher, AUTO_CLOSEABLE, SERIALIZABLE};
use staticfix::{CompilationUnit, SourceLanguage};
use std::path::Path;

const UNIT: &str = r#"package demo;

import java.util.List;
import java.io.*;

class Local extends java.io.InputStream implements Runnable {
    class Inner {
    }
}

class Mystery extends Base {
}
"#;

#[test]
fn test_type_matcher_patterns() -> Result<()> {
    let io = TypeMatcher::new("java.io.*")?;
    assert!(io.matches("java.io.File"));
    assert!(!io.matches("java.io.nested.File"));
    assert!(!io.matches("java.iox.File"));

    let streams = TypeMatcher::new("java..*Stream")?;
    assert!(streams.matches("java.io.InputStream"));
    assert!(streams.matches("java.util.stream.Stream"));
    assert!(!streams.matches("java.io.Reader"));

    let lombok = TypeMatcher::new("@lombok..*")?;
    assert_eq!(lombok.pattern(), "lombok..*");
    assert!(lombok.matches("lombok.Getter"));
    assert!(lombok.matches("lombok.extern.slf4j.Slf4j"));
    assert!(!lombok.matches("org.lombok.Getter"));

    assert!(TypeMatcher::new("  ").is_err());
    Ok(())
}

#[test]
fn test_resolve_through_imports_and_declarations() -> Result<()> {
    let unit = CompilationUnit::from_source(UNIT)?;
    let types = unit.types();

    assert_eq!(types.package(), Some("demo"));
    assert_eq!(types.wildcard_imports(), ["java.io".to_string()]);

    assert_eq!(types.resolve("List<String>").as_deref(), Some("java.util.List"));
    assert_eq!(types.resolve("String").as_deref(), Some("java.lang.String"));
    assert_eq!(types.resolve("FileInputStream").as_deref(), Some("java.io.FileInputStream"));
    assert_eq!(types.resolve("Local").as_deref(), Some("demo.Local"));
    assert_eq!(types.resolve("Inner").as_deref(), Some("demo.Local.Inner"));
    assert_eq!(types.resolve("java.util.Map").as_deref(), Some("java.util.Map"));
    assert_eq!(types.resolve("int").as_deref(), Some("int"));
    assert_eq!(types.resolve("Widget"), None);
    Ok(())
}

#[test]
fn test_assignability_walks_declared_and_known_types() -> Result<()> {
    let unit = CompilationUnit::from_source(UNIT)?;
    let types = unit.types();

    assert!(types.is_known_subtype("demo.Local", AUTO_CLOSEABLE));
    assert!(types.is_known_subtype("java.util.ArrayList", "java.util.Collection"));
    assert_eq!(types.is_assignable_to("java.util.ArrayList", "java.util.Map"), Some(false));

    // Base is unknown, so nothing can be said either way
    assert_eq!(types.is_assignable_to("demo.Mystery", SERIALIZABLE), None);
    assert!(!types.is_known_subtype("demo.Mystery", SERIALIZABLE));
    Ok(())
}

#[test]
fn test_erase_drops_type_arguments_and_arrays() {
    assert_eq!(erase("List<String>[]"), "List");
    assert_eq!(erase("java.util.Map.Entry<K, List<V>>"), "java.util.Map.Entry");
    assert_eq!(erase("String..."), "String");
}

#[test]
fn test_source_language_from_extension() {
    assert_eq!(SourceLanguage::from_path(Path::new("src/A.java")), Some(SourceLanguage::Java));
    assert_eq!(SourceLanguage::from_path(Path::new("build.gradle")), Some(SourceLanguage::Groovy));
    assert_eq!(SourceLanguage::from_path(Path::new("App.kt")), Some(SourceLanguage::Kotlin));
    assert_eq!(SourceLanguage::from_path(Path::new("Program.cs")), Some(SourceLanguage::CSharp));
    assert_eq!(SourceLanguage::from_path(Path::new("README.md")), None);

    assert!(SourceLanguage::Java.is_supported());
    assert!(!SourceLanguage::Kotlin.is_supported());
}

#[test]
fn test_syntax_errors_detected() -> Result<()> {
    assert!(!CompilationUnit::from_source(UNIT)?.has_syntax_errors());
    assert!(CompilationUnit::from_source("class A { void f( }")?.has_syntax_errors());
    Ok(())
}
