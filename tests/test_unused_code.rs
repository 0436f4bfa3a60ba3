// Copyright (C) Brian G. Milnes 2025

//! Tests for the unused field, method, and local variable recipes

use anyhow::Result;
mod common;
use common::{no_change, rewrite_run, rewrite_run_with};
use staticfix::{OptionValue, RecipeOptions};

const FIELDS: &str = "staticfix.java.RemoveUnusedPrivateFields";
const METHODS: &str = "staticfix.java.RemoveUnusedPrivateMethods";
const LOCALS: &str = "staticfix.java.RemoveUnusedLocalVariables";

#[test]
fn test_unused_field_and_its_import_removed() -> Result<()> {
    rewrite_run(
        FIELDS,
        r#"
package demo;

import java.util.List;
import java.util.Map;

public class Holder {
    private Map<String, String> notUsed;
    private List<String> names;

    public List<String> getNames() {
        return names;
    }
}
"#,
        r#"
package demo;

import java.util.List;

public class Holder {
    private List<String> names;

    public List<String> getNames() {
        return names;
    }
}
"#,
    )
}

#[test]
fn test_field_written_from_inner_class_kept() -> Result<()> {
    no_change(
        FIELDS,
        r#"
public class Outer {
    private int counter;

    class Inner {
        void bump() {
            counter = 5;
        }
    }
}
"#,
    )
}

#[test]
fn test_fields_only_used_by_removed_fields_removed() -> Result<()> {
    rewrite_run(
        FIELDS,
        r#"
class A {
    private int base = 1;
    private int derived = base + 1;
}
"#,
        r#"
class A {
}
"#,
    )
}

#[test]
fn test_shadowed_field_removed() -> Result<()> {
    rewrite_run(
        FIELDS,
        r#"
class A {
    private int count;

    void f() {
        int count = 2;
        System.out.println(count);
    }
}
"#,
        r#"
class A {
    void f() {
        int count = 2;
        System.out.println(count);
    }
}
"#,
    )
}

#[test]
fn test_serial_version_uid_kept() -> Result<()> {
    no_change(
        FIELDS,
        r#"
import java.io.Serializable;

class A implements Serializable {
    private static final long serialVersionUID = 1L;
}
"#,
    )
}

#[test]
fn test_fields_of_lombok_types_kept() -> Result<()> {
    no_change(
        FIELDS,
        r#"
import lombok.Getter;

@Getter
class A {
    private int value;
}
"#,
    )
}

#[test]
fn test_annotated_fields_kept() -> Result<()> {
    no_change(
        FIELDS,
        r#"
class A {
    @Inject
    private Service service;
}
"#,
    )
}

#[test]
fn test_unused_private_method_removed() -> Result<()> {
    rewrite_run(
        METHODS,
        r#"
class A {
    public void run() {
        used();
    }

    private void used() {
    }

    private void unused() {
    }
}
"#,
        r#"
class A {
    public void run() {
        used();
    }

    private void used() {
    }
}
"#,
    )
}

#[test]
fn test_method_chain_removed_over_cycles() -> Result<()> {
    rewrite_run(
        METHODS,
        r#"
class A {
    public void run() {
    }

    private void unused() {
        helper();
    }

    private void helper() {
    }
}
"#,
        r#"
class A {
    public void run() {
    }
}
"#,
    )
}

#[test]
fn test_method_references_and_serialization_hooks_kept() -> Result<()> {
    no_change(
        METHODS,
        r#"
import java.io.IOException;
import java.io.ObjectOutputStream;
import java.io.Serializable;

class A implements Serializable {
    public Runnable task() {
        return this::work;
    }

    private void work() {
    }

    private void writeObject(ObjectOutputStream out) throws IOException {
    }
}
"#,
    )
}

#[test]
fn test_unused_local_removed() -> Result<()> {
    rewrite_run(
        LOCALS,
        r#"
class A {
    void f() {
        int unused = 1;
        int used = 2;
        System.out.println(used);
    }
}
"#,
        r#"
class A {
    void f() {
        int used = 2;
        System.out.println(used);
    }
}
"#,
    )
}

#[test]
fn test_local_with_side_effecting_initializer_kept() -> Result<()> {
    no_change(
        LOCALS,
        r#"
class A {
    void f() {
        int x = compute();
    }
}
"#,
    )
}

#[test]
fn test_ignored_local_names_kept() -> Result<()> {
    let options = RecipeOptions::new().with(
        "ignoreVariablesNamed",
        OptionValue::String("ignored, other".to_string()),
    );
    rewrite_run_with(
        LOCALS,
        &options,
        r#"
class A {
    void f() {
        int ignored = 0;
        int dropped = 0;
    }
}
"#,
        r#"
class A {
    void f() {
        int ignored = 0;
    }
}
"#,
    )
}

#[test]
fn test_local_used_in_later_case_group_kept() -> Result<()> {
    no_change(
        LOCALS,
        r#"
class A {
    int f(int k) {
        switch (k) {
            case 1:
                int x = 0;
                break;
            default:
                x = 5;
                return x;
        }
        return 0;
    }
}
"#,
    )
}

#[test]
fn test_local_unused_across_case_groups_removed() -> Result<()> {
    rewrite_run(
        LOCALS,
        r#"
class A {
    int f(int k) {
        switch (k) {
            case 1:
                int unused = 0;
                break;
            default:
                return 1;
        }
        return 0;
    }
}
"#,
        r#"
class A {
    int f(int k) {
        switch (k) {
            case 1:
                break;
            default:
                return 1;
        }
        return 0;
    }
}
"#,
    )
}
