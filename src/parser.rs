// Copyright (C) Brian G. Milnes 2025

//! Parsing Java sources into compilation units
//!
//! The syntax tree is a tree-sitter concrete syntax tree over the original
//! text, so printing a unit is returning its source.

pub mod parser {
    use anyhow::{anyhow, Context, Result};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use tree_sitter::{Node, Parser, Tree};

    use crate::types::types::TypeContext;

    thread_local! {
        static JAVA_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
    }

    /// Source languages found in the trees we walk
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum SourceLanguage {
        Java,
        Kotlin,
        Groovy,
        CSharp,
    }

    impl SourceLanguage {
        pub fn from_path(path: &Path) -> Option<Self> {
            match path.extension().and_then(|e| e.to_str())? {
                "java" => Some(SourceLanguage::Java),
                "kt" | "kts" => Some(SourceLanguage::Kotlin),
                "groovy" | "gradle" => Some(SourceLanguage::Groovy),
                "cs" => Some(SourceLanguage::CSharp),
                _ => None,
            }
        }

        /// Only Java has a grammar wired in
        pub fn is_supported(&self) -> bool {
            matches!(self, SourceLanguage::Java)
        }
    }

    /// Parse Java source text with the thread-local parser
    pub fn parse_file(source: &str) -> Result<Tree> {
        JAVA_PARSER.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                let mut parser = Parser::new();
                parser
                    .set_language(&tree_sitter_java::language())
                    .map_err(|e| anyhow!("Failed to set Java language: {e}"))?;
                *slot = Some(parser);
            }
            let parser = slot
                .as_mut()
                .ok_or_else(|| anyhow!("Java parser not initialized"))?;
            parser
                .parse(source, None)
                .ok_or_else(|| anyhow!("Parser returned no tree"))
        })
    }

    /// One parsed source file
    pub struct CompilationUnit {
        path: PathBuf,
        source: String,
        tree: Tree,
    }

    impl CompilationUnit {
        pub fn parse(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self> {
            let path = path.into();
            let source = source.into();
            let tree = parse_file(&source)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(CompilationUnit { path, source, tree })
        }

        /// Parse a snippet that does not come from disk
        pub fn from_source(source: &str) -> Result<Self> {
            Self::parse("Snippet.java", source)
        }

        pub fn read(path: &Path) -> Result<Self> {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::parse(path, source)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn source(&self) -> &str {
            &self.source
        }

        pub fn tree(&self) -> &Tree {
            &self.tree
        }

        pub fn root(&self) -> Node<'_> {
            self.tree.root_node()
        }

        pub fn text(&self, node: Node) -> &str {
            &self.source[node.byte_range()]
        }

        pub fn has_syntax_errors(&self) -> bool {
            self.root().has_error()
        }

        /// Type attribution for this unit
        pub fn types(&self) -> TypeContext {
            TypeContext::new(self)
        }
    }

    impl std::fmt::Debug for CompilationUnit {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "CompilationUnit({})", self.path.display())
        }
    }
}
