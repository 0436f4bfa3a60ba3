// Copyright (C) Brian G. Milnes 2025

//! Type attribution for a single compilation unit
//!
//! Names resolve through the unit's imports, `java.lang`, and the types the
//! unit declares itself. Anything else is unknown, and callers treat unknown
//! as "do not rewrite".

pub mod types {
    use anyhow::{Context, Result};
    use regex::Regex;
    use std::collections::HashMap;
    use tree_sitter::Node;

    use crate::ast_utils::ast_utils::{
        children, find_nodes, named_children, node_text, unwrap_parens,
        TYPE_DECLARATION_KINDS,
    };
    use crate::parser::parser::CompilationUnit;
    use crate::scope::scope::{find_declaration, Declared};

    pub const AUTO_CLOSEABLE: &str = "java.lang.AutoCloseable";
    pub const COLLECTION: &str = "java.util.Collection";
    pub const SERIALIZABLE: &str = "java.io.Serializable";
    pub const STRING: &str = "java.lang.String";

    const PRIMITIVES: &[&str] = &["boolean", "byte", "short", "int", "long", "char", "float", "double"];

    const INTEGRAL: &[&str] = &[
        "byte",
        "short",
        "int",
        "long",
        "char",
        "java.lang.Byte",
        "java.lang.Short",
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Character",
    ];

    /// JDK types we know about, with their direct supertypes
    const KNOWN_TYPES: &[(&str, &[&str])] = &[
        ("java.lang.Object", &[]),
        ("java.lang.String", &["java.lang.CharSequence", "java.lang.Comparable", "java.io.Serializable"]),
        ("java.lang.CharSequence", &[]),
        ("java.lang.Comparable", &[]),
        ("java.lang.StringBuilder", &["java.lang.CharSequence"]),
        ("java.lang.AutoCloseable", &[]),
        ("java.lang.Runnable", &[]),
        ("java.lang.Iterable", &[]),
        ("java.lang.Cloneable", &[]),
        ("java.lang.Number", &["java.io.Serializable"]),
        ("java.lang.Integer", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Long", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Short", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Byte", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Double", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Float", &["java.lang.Number", "java.lang.Comparable"]),
        ("java.lang.Character", &["java.lang.Comparable", "java.io.Serializable"]),
        ("java.lang.Boolean", &["java.lang.Comparable", "java.io.Serializable"]),
        ("java.lang.Throwable", &["java.io.Serializable"]),
        ("java.lang.Exception", &["java.lang.Throwable"]),
        ("java.lang.RuntimeException", &["java.lang.Exception"]),
        ("java.lang.Error", &["java.lang.Throwable"]),
        ("java.lang.Thread", &["java.lang.Runnable"]),
        ("java.lang.Class", &["java.io.Serializable"]),
        ("java.lang.Enum", &["java.lang.Comparable", "java.io.Serializable"]),
        ("java.lang.Record", &[]),
        ("java.lang.System", &[]),
        ("java.lang.Math", &[]),
        ("java.lang.Override", &[]),
        ("java.lang.Deprecated", &[]),
        ("java.lang.SuppressWarnings", &[]),
        ("java.lang.FunctionalInterface", &[]),
        ("java.lang.SafeVarargs", &[]),
        ("java.io.Serializable", &[]),
        ("java.io.Closeable", &["java.lang.AutoCloseable"]),
        ("java.io.Flushable", &[]),
        ("java.io.File", &["java.io.Serializable", "java.lang.Comparable"]),
        ("java.io.InputStream", &["java.io.Closeable"]),
        ("java.io.OutputStream", &["java.io.Closeable", "java.io.Flushable"]),
        ("java.io.FileInputStream", &["java.io.InputStream"]),
        ("java.io.FileOutputStream", &["java.io.OutputStream"]),
        ("java.io.FilterInputStream", &["java.io.InputStream"]),
        ("java.io.FilterOutputStream", &["java.io.OutputStream"]),
        ("java.io.BufferedInputStream", &["java.io.FilterInputStream"]),
        ("java.io.BufferedOutputStream", &["java.io.FilterOutputStream"]),
        ("java.io.DataInputStream", &["java.io.FilterInputStream"]),
        ("java.io.DataOutputStream", &["java.io.FilterOutputStream"]),
        ("java.io.ByteArrayInputStream", &["java.io.InputStream"]),
        ("java.io.ByteArrayOutputStream", &["java.io.OutputStream"]),
        ("java.io.ObjectInputStream", &["java.io.InputStream"]),
        ("java.io.ObjectOutputStream", &["java.io.OutputStream"]),
        ("java.io.PrintStream", &["java.io.FilterOutputStream"]),
        ("java.io.Reader", &["java.io.Closeable"]),
        ("java.io.Writer", &["java.io.Closeable", "java.io.Flushable"]),
        ("java.io.BufferedReader", &["java.io.Reader"]),
        ("java.io.BufferedWriter", &["java.io.Writer"]),
        ("java.io.InputStreamReader", &["java.io.Reader"]),
        ("java.io.OutputStreamWriter", &["java.io.Writer"]),
        ("java.io.FileReader", &["java.io.InputStreamReader"]),
        ("java.io.FileWriter", &["java.io.OutputStreamWriter"]),
        ("java.io.StringReader", &["java.io.Reader"]),
        ("java.io.StringWriter", &["java.io.Writer"]),
        ("java.io.PrintWriter", &["java.io.Writer"]),
        ("java.io.RandomAccessFile", &["java.io.Closeable"]),
        ("java.util.Scanner", &["java.io.Closeable"]),
        ("java.util.zip.ZipFile", &["java.io.Closeable"]),
        ("java.util.zip.ZipInputStream", &["java.io.FilterInputStream"]),
        ("java.util.zip.ZipOutputStream", &["java.io.FilterOutputStream"]),
        ("java.util.zip.GZIPInputStream", &["java.io.FilterInputStream"]),
        ("java.util.zip.GZIPOutputStream", &["java.io.FilterOutputStream"]),
        ("java.util.jar.JarFile", &["java.util.zip.ZipFile"]),
        ("java.util.stream.Stream", &["java.lang.AutoCloseable"]),
        ("java.nio.channels.FileChannel", &["java.io.Closeable"]),
        ("java.net.Socket", &["java.io.Closeable"]),
        ("java.net.ServerSocket", &["java.io.Closeable"]),
        ("java.sql.Connection", &["java.lang.AutoCloseable"]),
        ("java.sql.Statement", &["java.lang.AutoCloseable"]),
        ("java.sql.PreparedStatement", &["java.sql.Statement"]),
        ("java.sql.CallableStatement", &["java.sql.PreparedStatement"]),
        ("java.sql.ResultSet", &["java.lang.AutoCloseable"]),
        ("java.util.Collection", &["java.lang.Iterable"]),
        ("java.util.List", &["java.util.Collection"]),
        ("java.util.Set", &["java.util.Collection"]),
        ("java.util.SortedSet", &["java.util.Set"]),
        ("java.util.NavigableSet", &["java.util.SortedSet"]),
        ("java.util.Queue", &["java.util.Collection"]),
        ("java.util.Deque", &["java.util.Queue"]),
        ("java.util.ArrayList", &["java.util.List", "java.io.Serializable"]),
        ("java.util.LinkedList", &["java.util.List", "java.util.Deque", "java.io.Serializable"]),
        ("java.util.Vector", &["java.util.List", "java.io.Serializable"]),
        ("java.util.Stack", &["java.util.Vector"]),
        ("java.util.HashSet", &["java.util.Set", "java.io.Serializable"]),
        ("java.util.LinkedHashSet", &["java.util.HashSet"]),
        ("java.util.TreeSet", &["java.util.NavigableSet", "java.io.Serializable"]),
        ("java.util.ArrayDeque", &["java.util.Deque", "java.io.Serializable"]),
        ("java.util.PriorityQueue", &["java.util.Queue", "java.io.Serializable"]),
        ("java.util.Map", &[]),
        ("java.util.HashMap", &["java.util.Map", "java.io.Serializable"]),
        ("java.util.LinkedHashMap", &["java.util.HashMap"]),
        ("java.util.TreeMap", &["java.util.Map", "java.io.Serializable"]),
        ("java.util.Optional", &[]),
        ("java.util.Objects", &[]),
        ("java.util.Arrays", &[]),
        ("java.util.Collections", &[]),
    ];

    fn known_supertypes(fqn: &str) -> Option<&'static [&'static str]> {
        KNOWN_TYPES
            .iter()
            .find(|(name, _)| *name == fqn)
            .map(|(_, supers)| *supers)
    }

    /// `List<String>[]` -> `List`, `java.util.Map.Entry<K, V>` -> `java.util.Map.Entry`
    pub fn erase(type_text: &str) -> String {
        let mut depth = 0;
        let mut erased = String::with_capacity(type_text.len());
        for c in type_text.chars() {
            match c {
                '<' => depth += 1,
                '>' => depth -= 1,
                _ if depth == 0 && !c.is_whitespace() => erased.push(c),
                _ => {}
            }
        }
        erased.trim_end_matches("[]").trim_end_matches("...").to_string()
    }

    pub fn is_primitive(name: &str) -> bool {
        PRIMITIVES.contains(&name)
    }

    pub fn is_integral(fqn: &str) -> bool {
        INTEGRAL.contains(&fqn)
    }

    /// A type declared in this unit
    #[derive(Debug, Clone)]
    struct DeclaredType {
        fqn: String,
        supertypes: Vec<String>,
    }

    /// Attribution facts for one compilation unit
    #[derive(Debug, Clone, Default)]
    pub struct TypeContext {
        package: Option<String>,
        single_imports: HashMap<String, String>,
        wildcard_imports: Vec<String>,
        declared: HashMap<String, DeclaredType>,
    }

    impl TypeContext {
        pub fn new(unit: &CompilationUnit) -> Self {
            let source = unit.source();
            let root = unit.root();
            let mut context = TypeContext::default();

            for decl in named_children(root) {
                match decl.kind() {
                    "package_declaration" => {
                        context.package = named_children(decl)
                            .into_iter()
                            .find(|n| matches!(n.kind(), "identifier" | "scoped_identifier"))
                            .map(|n| node_text(n, source).to_string());
                    }
                    "import_declaration" => context.add_import(decl, source),
                    _ => {}
                }
            }

            for kind in TYPE_DECLARATION_KINDS {
                for decl in find_nodes(root, kind) {
                    context.add_declared_type(decl, source);
                }
            }

            context
        }

        fn add_import(&mut self, decl: Node, source: &str) {
            let kids = children(decl);
            if kids.iter().any(|k| k.kind() == "static") {
                return;
            }
            let Some(name) = kids
                .iter()
                .find(|k| matches!(k.kind(), "identifier" | "scoped_identifier"))
            else {
                return;
            };
            let name = node_text(*name, source).to_string();
            if kids.iter().any(|k| k.kind() == "asterisk") {
                self.wildcard_imports.push(name);
            } else if let Some(simple) = name.rsplit('.').next() {
                self.single_imports.insert(simple.to_string(), name.clone());
            }
        }

        fn add_declared_type(&mut self, decl: Node, source: &str) {
            let Some(name) = decl.child_by_field_name("name") else {
                return;
            };
            let mut path = vec![node_text(name, source).to_string()];
            let mut current = decl.parent();
            while let Some(outer) = current {
                if TYPE_DECLARATION_KINDS.contains(&outer.kind()) {
                    if let Some(outer_name) = outer.child_by_field_name("name") {
                        path.insert(0, node_text(outer_name, source).to_string());
                    }
                }
                current = outer.parent();
            }
            let nested = path.join(".");
            let fqn = match &self.package {
                Some(package) => format!("{package}.{nested}"),
                None => nested,
            };

            let mut supertypes = Vec::new();
            for field in ["superclass", "interfaces"] {
                if let Some(clause) = decl.child_by_field_name(field) {
                    supertypes.extend(supertype_names(clause, source));
                }
            }
            // interface Foo extends Bar
            if let Some(extends) = children(decl)
                .into_iter()
                .find(|c| c.kind() == "extends_interfaces")
            {
                supertypes.extend(supertype_names(extends, source));
            }

            let simple = path.last().cloned().unwrap_or_default();
            self.declared.insert(simple, DeclaredType { fqn, supertypes });
        }

        pub fn package(&self) -> Option<&str> {
            self.package.as_deref()
        }

        /// Packages imported with `.*`
        pub fn wildcard_imports(&self) -> &[String] {
            &self.wildcard_imports
        }

        /// Fully qualified name for a type as written, or `None` when unknown
        pub fn resolve(&self, type_text: &str) -> Option<String> {
            let erased = erase(type_text);
            if erased.is_empty() {
                return None;
            }
            if is_primitive(&erased) {
                return Some(erased);
            }

            let (head, tail) = match erased.split_once('.') {
                Some((head, tail)) => (head, Some(tail)),
                None => (erased.as_str(), None),
            };

            let head_fqn = if let Some(declared) = self.declared.get(head) {
                Some(declared.fqn.clone())
            } else if let Some(imported) = self.single_imports.get(head) {
                Some(imported.clone())
            } else if known_supertypes(&format!("java.lang.{head}")).is_some() {
                Some(format!("java.lang.{head}"))
            } else {
                self.wildcard_imports
                    .iter()
                    .map(|package| format!("{package}.{head}"))
                    .find(|candidate| known_supertypes(candidate).is_some())
            };

            match (head_fqn, tail) {
                (Some(fqn), None) => Some(fqn),
                (Some(fqn), Some(tail)) => Some(format!("{fqn}.{tail}")),
                // Already qualified: java.io.File
                (None, Some(_)) if head.chars().next().is_some_and(|c| c.is_lowercase()) => {
                    Some(erased.clone())
                }
                _ => None,
            }
        }

        /// Supertypes of a resolved type; `None` when nothing is known about it
        fn supertypes_of(&self, fqn: &str) -> Option<Vec<String>> {
            if let Some(known) = known_supertypes(fqn) {
                return Some(known.iter().map(|s| s.to_string()).collect());
            }
            let declared = self.declared.values().find(|d| d.fqn == fqn)?;
            declared
                .supertypes
                .iter()
                .map(|s| self.resolve(s))
                .collect::<Option<Vec<_>>>()
        }

        /// Whether `fqn` is `target` or one of its subtypes
        ///
        /// `None` means the hierarchy could not be walked far enough to tell.
        pub fn is_assignable_to(&self, fqn: &str, target: &str) -> Option<bool> {
            let mut pending = vec![fqn.to_string()];
            let mut seen = Vec::new();
            let mut complete = true;

            while let Some(current) = pending.pop() {
                if current == target {
                    return Some(true);
                }
                if seen.contains(&current) {
                    continue;
                }
                match self.supertypes_of(&current) {
                    Some(supers) => pending.extend(supers),
                    None => complete = false,
                }
                seen.push(current);
            }

            if complete {
                Some(false)
            } else {
                None
            }
        }

        pub fn is_known_subtype(&self, fqn: &str, target: &str) -> bool {
            self.is_assignable_to(fqn, target) == Some(true)
        }

        /// Attributed type of an expression
        pub fn type_of(&self, expr: Node, source: &str) -> Option<String> {
            let expr = unwrap_parens(expr);
            match expr.kind() {
                "string_literal" | "text_block" => Some(STRING.to_string()),
                "character_literal" => Some("char".to_string()),
                "true" | "false" => Some("boolean".to_string()),
                "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
                | "binary_integer_literal" => {
                    let text = node_text(expr, source);
                    if text.ends_with('l') || text.ends_with('L') {
                        Some("long".to_string())
                    } else {
                        Some("int".to_string())
                    }
                }
                "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                    let text = node_text(expr, source);
                    if text.ends_with('f') || text.ends_with('F') {
                        Some("float".to_string())
                    } else {
                        Some("double".to_string())
                    }
                }
                "object_creation_expression" => {
                    let ty = expr.child_by_field_name("type")?;
                    self.resolve(node_text(ty, source))
                }
                "cast_expression" => {
                    let ty = expr.child_by_field_name("type")?;
                    self.resolve(node_text(ty, source))
                }
                "identifier" => {
                    let declared = find_declaration(expr, node_text(expr, source), source)?;
                    self.declared_type(&declared, source)
                }
                "field_access" => {
                    let object = expr.child_by_field_name("object")?;
                    if object.kind() != "this" {
                        return None;
                    }
                    let field = expr.child_by_field_name("field")?;
                    let declared = find_declaration(field, node_text(field, source), source)?;
                    if !declared.is_field() {
                        return None;
                    }
                    self.declared_type(&declared, source)
                }
                _ => None,
            }
        }

        /// Resolved type of a declaration, following `var` to its initializer
        pub fn declared_type(&self, declared: &Declared, source: &str) -> Option<String> {
            let type_node = declared.type_node?;
            let text = node_text(type_node, source);
            if text == "var" {
                return self.type_of(declared.value?, source);
            }
            let resolved = self.resolve(text)?;
            if declared.is_array() || text.ends_with("[]") {
                return Some(format!("{resolved}[]"));
            }
            Some(resolved)
        }
    }

    fn supertype_names(clause: Node, source: &str) -> Vec<String> {
        let mut names = Vec::new();
        for child in named_children(clause) {
            if child.kind() == "type_list" {
                for ty in named_children(child) {
                    names.push(erase(node_text(ty, source)));
                }
            } else {
                names.push(erase(node_text(child, source)));
            }
        }
        names
    }

    /// Glob matcher for fully qualified type names
    ///
    /// `*` matches within one name segment, `..` matches any number of
    /// package segments: `java.io.*`, `java..*Stream`, `lombok.*`.
    #[derive(Debug, Clone)]
    pub struct TypeMatcher {
        pattern: String,
        regex: Regex,
    }

    impl TypeMatcher {
        pub fn new(pattern: &str) -> Result<Self> {
            let pattern = pattern.trim().trim_start_matches('@').to_string();
            if pattern.is_empty() {
                anyhow::bail!("Empty type pattern");
            }

            let mut expr = String::from("^");
            let chars: Vec<char> = pattern.chars().collect();
            let mut i = 0;
            while i < chars.len() {
                match chars[i] {
                    '.' if chars.get(i + 1) == Some(&'.') => {
                        expr.push_str(r"\.(?:[^.]+\.)*");
                        i += 2;
                        continue;
                    }
                    '*' => expr.push_str(r"[^.]*"),
                    c => expr.push_str(&regex::escape(&c.to_string())),
                }
                i += 1;
            }
            expr.push('$');

            let regex = Regex::new(&expr)
                .with_context(|| format!("Invalid type pattern '{pattern}'"))?;
            Ok(TypeMatcher { pattern, regex })
        }

        pub fn pattern(&self) -> &str {
            &self.pattern
        }

        pub fn matches(&self, fqn: &str) -> bool {
            self.regex.is_match(fqn)
        }
    }
}
