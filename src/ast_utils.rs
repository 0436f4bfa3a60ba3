// Copyright (C) Brian G. Milnes 2025

//! AST traversal utilities for analyzing Java code
//!
//! Provides common functions for walking and querying the syntax tree

pub mod ast_utils {
    use tree_sitter::Node;

    /// All children, anonymous tokens and comments included
    pub fn children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children(&mut cursor).collect()
    }

    /// Named children without comments
    pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|child| !is_comment(*child))
            .collect()
    }

    /// Get all child nodes of a specific kind
    pub fn children_of_kind<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
        children(node).into_iter().filter(|child| child.kind() == kind).collect()
    }

    pub fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
        children(node).into_iter().find(|child| child.kind() == kind)
    }

    /// All children tagged with a grammar field (e.g. every `declarator`)
    pub fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children_by_field_name(field, &mut cursor).collect()
    }

    pub fn is_comment(node: Node) -> bool {
        matches!(node.kind(), "line_comment" | "block_comment")
    }

    pub fn is_javadoc(node: Node, source: &str) -> bool {
        node.kind() == "block_comment" && source[node.byte_range()].starts_with("/**")
    }

    /// Find all nodes of a specific kind in the syntax tree, in preorder
    pub fn find_nodes<'t>(root: Node<'t>, kind: &str) -> Vec<Node<'t>> {
        find_nodes_where(root, |node| node.kind() == kind)
    }

    /// Find all nodes matching a predicate, in preorder
    pub fn find_nodes_where<'t, F>(root: Node<'t>, predicate: F) -> Vec<Node<'t>>
    where
        F: Fn(Node<'t>) -> bool,
    {
        let mut results = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if predicate(node) {
                results.push(node);
            }
            let mut kids = children(node);
            kids.reverse();
            stack.extend(kids);
        }

        results
    }

    pub fn ancestors<'t>(node: Node<'t>) -> impl Iterator<Item = Node<'t>> {
        std::iter::successors(node.parent(), |n| n.parent())
    }

    pub fn contains(outer: Node, inner: Node) -> bool {
        outer.start_byte() <= inner.start_byte() && inner.end_byte() <= outer.end_byte()
    }

    pub fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
        &source[node.byte_range()]
    }

    /// Strip any number of wrapping parentheses
    pub fn unwrap_parens(node: Node) -> Node {
        let mut current = node;
        while current.kind() == "parenthesized_expression" {
            match named_children(current).first() {
                Some(inner) => current = *inner,
                None => break,
            }
        }
        current
    }

    pub fn has_comment_inside(node: Node) -> bool {
        !find_nodes_where(node, is_comment).is_empty()
    }

    pub fn is_literal(node: Node) -> bool {
        matches!(
            node.kind(),
            "decimal_integer_literal"
                | "hex_integer_literal"
                | "octal_integer_literal"
                | "binary_integer_literal"
                | "decimal_floating_point_literal"
                | "hex_floating_point_literal"
                | "character_literal"
                | "string_literal"
                | "text_block"
                | "true"
                | "false"
                | "null_literal"
        )
    }

    /// Expressions that never need parentheses of their own
    pub fn is_primary(node: Node) -> bool {
        is_literal(node)
            || matches!(
                node.kind(),
                "identifier"
                    | "this"
                    | "field_access"
                    | "method_invocation"
                    | "array_access"
                    | "parenthesized_expression"
                    | "class_literal"
                    | "object_creation_expression"
                    | "method_reference"
            )
    }

    /// No calls, assignments, increments or allocations anywhere inside
    pub fn is_side_effect_free(node: Node) -> bool {
        find_nodes_where(node, |n| {
            matches!(
                n.kind(),
                "method_invocation"
                    | "assignment_expression"
                    | "update_expression"
                    | "object_creation_expression"
                    | "array_creation_expression"
                    | "switch_expression"
                    | "lambda_expression"
            )
        })
        .is_empty()
    }

    /// Structural equality ignoring whitespace, comments and redundant parentheses
    pub fn semantically_equal(a: Node, b: Node, source: &str) -> bool {
        let a = unwrap_parens(a);
        let b = unwrap_parens(b);
        if a.kind() != b.kind() {
            return false;
        }

        let a_kids: Vec<Node> = children(a).into_iter().filter(|n| !is_comment(*n)).collect();
        let b_kids: Vec<Node> = children(b).into_iter().filter(|n| !is_comment(*n)).collect();

        if a_kids.is_empty() && b_kids.is_empty() {
            return node_text(a, source) == node_text(b, source);
        }

        a_kids.len() == b_kids.len()
            && a_kids
                .iter()
                .zip(b_kids.iter())
                .all(|(x, y)| semantically_equal(*x, *y, source))
    }

    /// The `modifiers` child of a declaration
    pub fn modifiers(decl: Node) -> Option<Node> {
        child_of_kind(decl, "modifiers")
    }

    pub fn has_modifier(decl: Node, keyword: &str) -> bool {
        modifiers(decl)
            .map(|m| children(m).iter().any(|c| c.kind() == keyword))
            .unwrap_or(false)
    }

    /// Annotations attached through the declaration's modifiers
    pub fn annotations(decl: Node) -> Vec<Node> {
        modifiers(decl)
            .map(|m| {
                children(m)
                    .into_iter()
                    .filter(|c| matches!(c.kind(), "annotation" | "marker_annotation"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The name of an annotation as written, without the `@`
    pub fn annotation_name<'s>(annotation: Node, source: &'s str) -> Option<&'s str> {
        annotation
            .child_by_field_name("name")
            .map(|name| node_text(name, source))
    }

    /// Class-like declarations whose body holds members
    pub const TYPE_DECLARATION_KINDS: &[&str] = &[
        "class_declaration",
        "enum_declaration",
        "interface_declaration",
        "record_declaration",
        "annotation_type_declaration",
    ];

    pub const TYPE_BODY_KINDS: &[&str] = &[
        "class_body",
        "enum_body_declarations",
        "interface_body",
        "annotation_type_body",
    ];

    /// Member declarations of a type body, flattening enum bodies
    pub fn body_members(body: Node) -> Vec<Node> {
        let mut members = Vec::new();
        for child in named_children(body) {
            if child.kind() == "enum_body_declarations" {
                members.extend(named_children(child));
            } else {
                members.push(child);
            }
        }
        members
    }

    /// The outermost type declaration containing a node
    pub fn top_level_type(node: Node) -> Option<Node> {
        let mut found = None;
        let mut current = Some(node);
        while let Some(n) = current {
            if TYPE_DECLARATION_KINDS.contains(&n.kind()) {
                found = Some(n);
            }
            current = n.parent();
        }
        found
    }

    /// Identifiers naming a declaration rather than referring to one
    pub fn is_declaration_name(ident: Node) -> bool {
        let Some(parent) = ident.parent() else {
            return false;
        };
        let is_name_field = parent
            .child_by_field_name("name")
            .is_some_and(|n| n.id() == ident.id());
        if !is_name_field {
            return false;
        }
        matches!(
            parent.kind(),
            "variable_declarator"
                | "formal_parameter"
                | "spread_parameter"
                | "catch_formal_parameter"
                | "resource"
                | "enhanced_for_statement"
                | "method_declaration"
                | "constructor_declaration"
                | "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | "enum_constant"
                | "annotation_type_element_declaration"
                | "instanceof_expression"
        )
    }

    /// Identifiers that are a method name in a call, not a variable
    pub fn is_invoked_method_name(ident: Node) -> bool {
        ident.parent().is_some_and(|p| {
            p.kind() == "method_invocation"
                && p.child_by_field_name("name").is_some_and(|n| n.id() == ident.id())
        })
    }

    /// `obj.name` where the identifier is the selected member
    pub fn is_selected_field(ident: Node) -> bool {
        ident.parent().is_some_and(|p| {
            p.kind() == "field_access"
                && p.child_by_field_name("field").is_some_and(|n| n.id() == ident.id())
        })
    }

    /// Identifiers inside `import` and `package` lines
    pub fn is_in_header(node: Node) -> bool {
        ancestors(node).any(|a| matches!(a.kind(), "import_declaration" | "package_declaration"))
    }
}
