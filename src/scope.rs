// Copyright (C) Brian G. Milnes 2025

//! Name lookup: which declaration does an identifier refer to

pub mod scope {
    use tree_sitter::Node;

    use crate::ast_utils::ast_utils::{
        children, field_children, named_children, node_text, TYPE_BODY_KINDS,
    };

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DeclKind {
        Local,
        Parameter,
        Resource,
        Field,
    }

    /// The declaration an identifier resolved to
    #[derive(Debug, Clone, Copy)]
    pub struct Declared<'t> {
        pub kind: DeclKind,
        /// The declaring statement (`local_variable_declaration`, `field_declaration`, ...)
        pub declaration: Node<'t>,
        /// The node carrying the name (`variable_declarator`, `formal_parameter`, ...)
        pub declarator: Node<'t>,
        pub type_node: Option<Node<'t>>,
        pub value: Option<Node<'t>>,
    }

    impl<'t> Declared<'t> {
        pub fn is_field(&self) -> bool {
            self.kind == DeclKind::Field
        }

        pub fn is_array(&self) -> bool {
            self.declarator.child_by_field_name("dimensions").is_some()
        }
    }

    fn name_is(node: Node, name: &str, source: &str) -> bool {
        node.child_by_field_name("name")
            .is_some_and(|n| node_text(n, source) == name)
    }

    /// Declarators of a local or field declaration carrying `name`
    fn declared_in<'t>(
        decl: Node<'t>,
        name: &str,
        source: &str,
        kind: DeclKind,
    ) -> Option<Declared<'t>> {
        field_children(decl, "declarator")
            .into_iter()
            .find(|d| name_is(*d, name, source))
            .map(|declarator| Declared {
                kind,
                declaration: decl,
                declarator,
                type_node: decl.child_by_field_name("type"),
                value: declarator.child_by_field_name("value"),
            })
    }

    fn parameter<'t>(param: Node<'t>, name: &str, source: &str) -> Option<Declared<'t>> {
        match param.kind() {
            "formal_parameter" | "catch_formal_parameter" => {
                name_is(param, name, source).then(|| Declared {
                    kind: DeclKind::Parameter,
                    declaration: param,
                    declarator: param,
                    type_node: param
                        .child_by_field_name("type")
                        .or_else(|| children(param).into_iter().find(|c| c.kind() == "catch_type")),
                    value: None,
                })
            }
            "spread_parameter" => {
                let declarator = children(param)
                    .into_iter()
                    .find(|c| c.kind() == "variable_declarator")?;
                name_is(declarator, name, source).then(|| Declared {
                    kind: DeclKind::Parameter,
                    declaration: param,
                    declarator,
                    type_node: None,
                    value: None,
                })
            }
            "identifier" if node_text(param, source) == name => Some(Declared {
                kind: DeclKind::Parameter,
                declaration: param,
                declarator: param,
                type_node: None,
                value: None,
            }),
            _ => None,
        }
    }

    fn in_parameter_list<'t>(params: Node<'t>, name: &str, source: &str) -> Option<Declared<'t>> {
        if params.kind() == "identifier" {
            return parameter(params, name, source);
        }
        named_children(params)
            .into_iter()
            .find_map(|p| parameter(p, name, source))
    }

    /// Fields declared directly in a type body
    pub fn field_in_body<'t>(body: Node<'t>, name: &str, source: &str) -> Option<Declared<'t>> {
        for member in named_children(body) {
            let found = match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    declared_in(member, name, source, DeclKind::Field)
                }
                "enum_body_declarations" => field_in_body(member, name, source),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Declarations visible in `scope` that precede `position`
    fn declared_before<'t>(
        scope: Node<'t>,
        position: usize,
        name: &str,
        source: &str,
    ) -> Option<Declared<'t>> {
        let mut found = None;
        for statement in named_children(scope) {
            if statement.start_byte() >= position {
                break;
            }
            if statement.kind() == "local_variable_declaration" {
                if let Some(d) = declared_in(statement, name, source, DeclKind::Local) {
                    found = Some(d);
                }
            }
        }
        found
    }

    /// Case groups of the same `switch` block on either side of `group`
    ///
    /// A local declared in one group stays in scope for every later group.
    fn sibling_groups(group: Node) -> (Vec<Node>, Vec<Node>) {
        let Some(switch_block) = group.parent() else {
            return (Vec::new(), Vec::new());
        };
        named_children(switch_block)
            .into_iter()
            .filter(|g| g.kind() == "switch_block_statement_group" && g.id() != group.id())
            .partition(|g| g.start_byte() < group.start_byte())
    }

    /// The case groups after `group` that still see its locals
    pub fn later_case_groups(group: Node) -> Vec<Node> {
        sibling_groups(group).1
    }

    /// Find the declaration `name` refers to at `usage`
    ///
    /// Walks outward through blocks, parameter lists, loop headers,
    /// resources, and enclosing type bodies (inner classes see outer fields).
    pub fn find_declaration<'t>(usage: Node<'t>, name: &str, source: &str) -> Option<Declared<'t>> {
        let mut child = usage;
        let mut current = usage.parent();

        while let Some(scope) = current {
            let found = match scope.kind() {
                "block" | "constructor_body" => declared_before(scope, child.start_byte(), name, source),
                "switch_block_statement_group" => {
                    declared_before(scope, child.start_byte(), name, source).or_else(|| {
                        sibling_groups(scope)
                            .0
                            .into_iter()
                            .rev()
                            .find_map(|g| declared_before(g, g.end_byte(), name, source))
                    })
                }
                "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => scope
                    .child_by_field_name("parameters")
                    .and_then(|p| in_parameter_list(p, name, source)),
                "lambda_expression" => scope
                    .child_by_field_name("parameters")
                    .and_then(|p| in_parameter_list(p, name, source)),
                "catch_clause" => children(scope)
                    .into_iter()
                    .find(|c| c.kind() == "catch_formal_parameter")
                    .and_then(|p| parameter(p, name, source)),
                "for_statement" => field_children(scope, "init")
                    .into_iter()
                    .filter(|i| i.kind() == "local_variable_declaration")
                    .find_map(|i| declared_in(i, name, source, DeclKind::Local)),
                "enhanced_for_statement" if name_is(scope, name, source) => Some(Declared {
                    kind: DeclKind::Local,
                    declaration: scope,
                    declarator: scope,
                    type_node: scope.child_by_field_name("type"),
                    value: None,
                }),
                "try_with_resources_statement" => scope
                    .child_by_field_name("resources")
                    .and_then(|spec| {
                        named_children(spec)
                            .into_iter()
                            .filter(|r| r.start_byte() < child.start_byte())
                            .find(|r| name_is(*r, name, source))
                    })
                    .map(|resource| Declared {
                        kind: DeclKind::Resource,
                        declaration: resource,
                        declarator: resource,
                        type_node: resource.child_by_field_name("type"),
                        value: resource.child_by_field_name("value"),
                    }),
                kind if TYPE_BODY_KINDS.contains(&kind) || kind == "enum_body" => {
                    field_in_body(scope, name, source)
                }
                _ => None,
            };

            if found.is_some() {
                return found;
            }
            child = scope;
            current = scope.parent();
        }

        None
    }

    /// Whether `ident` names the given declarator
    pub fn refers_to(ident: Node, declarator: Node, source: &str) -> bool {
        let name = node_text(ident, source);
        find_declaration(ident, name, source).is_some_and(|d| d.declarator.id() == declarator.id())
    }
}
