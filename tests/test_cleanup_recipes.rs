// Copyright (C) Brian G. Milnes 2025

//! Tests for the code cleanup recipes and RemoveAnnotation

use anyhow::Result;
mod common;
use common::{no_change, rewrite_run, rewrite_run_with};
use staticfix::recipes::javadoc_non_ascii_characters::escape_non_ascii;
use staticfix::{OptionValue, RecipeOptions, RecipeRegistry};

#[test]
fn test_default_field_initializers_removed() -> Result<()> {
    rewrite_run(
        "staticfix.java.ExplicitInitialization",
        r#"
class A {
    private int count = 0;
    private boolean flag = false;
    private String name = null;
    private long big = 0L;
    private final int fixed = 0;
    private Integer boxed = 0;
    private int[] values = null;
    private double ratio = 0.0;
    private int one = 1;
}
"#,
        r#"
class A {
    private int count;
    private boolean flag;
    private String name;
    private long big;
    private final int fixed = 0;
    private Integer boxed = 0;
    private int[] values;
    private double ratio;
    private int one = 1;
}
"#,
    )
}

#[test]
fn test_final_removed_from_static_method() -> Result<()> {
    rewrite_run(
        "staticfix.java.StaticMethodNotFinal",
        r#"
class A {
    public static final void f() {
    }

    public final void g() {
    }
}
"#,
        r#"
class A {
    public static void f() {
    }

    public final void g() {
    }
}
"#,
    )
}

#[test]
fn test_modifiers_put_in_declaration_order() -> Result<()> {
    rewrite_run(
        "staticfix.java.ModifierOrder",
        r#"
class A {
    final static public int X = 1;

    @Deprecated static protected void f() {
    }
}
"#,
        r#"
class A {
    public static final int X = 1;

    @Deprecated protected static void f() {
    }
}
"#,
    )
}

#[test]
fn test_long_literal_suffix_upper_cased() -> Result<()> {
    rewrite_run(
        "staticfix.java.UpperCaseLongLiterals",
        r#"
class A {
    long a = 10l;
    long b = 0x1Fl;
    long c = 5L;
}
"#,
        r#"
class A {
    long a = 10L;
    long b = 0x1FL;
    long c = 5L;
}
"#,
    )
}

#[test]
fn test_single_return_lambda_becomes_expression() -> Result<()> {
    rewrite_run(
        "staticfix.java.LambdaBlockToExpression",
        r#"
import java.util.function.Function;

class A {
    Function<Integer, Integer> f = x -> {
        return x + 1;
    };
}
"#,
        r#"
import java.util.function.Function;

class A {
    Function<Integer, Integer> f = x -> x + 1;
}
"#,
    )
}

#[test]
fn test_lambda_argument_returning_call_kept() -> Result<()> {
    no_change(
        "staticfix.java.LambdaBlockToExpression",
        r#"
class A {
    void f(Executor executor) {
        executor.submit(() -> {
            return compute();
        });
    }
}
"#,
    )
}

#[test]
fn test_condition_only_for_becomes_while() -> Result<()> {
    rewrite_run(
        "staticfix.java.WhileInsteadOfFor",
        r#"
class A {
    void f(boolean c) {
        for (; c; ) {
            c = false;
        }
        for (int i = 0; i < 3; i++) {
        }
    }
}
"#,
        r#"
class A {
    void f(boolean c) {
        while (c) {
            c = false;
        }
        for (int i = 0; i < 3; i++) {
        }
    }
}
"#,
    )
}

#[test]
fn test_diamond_replaces_repeated_type_arguments() -> Result<()> {
    rewrite_run(
        "staticfix.java.UseDiamondOperator",
        r#"
import java.util.*;

class A {
    List<String> names = new ArrayList<String>();
    Map<String, List<Integer>> index = new HashMap<String, List<Integer>>();

    void f() {
        List<String> local = new ArrayList<String>();
        Comparator<String> c = new Comparator<String>() {
            public int compare(String a, String b) {
                return 0;
            }
        };
    }
}
"#,
        r#"
import java.util.*;

class A {
    List<String> names = new ArrayList<>();
    Map<String, List<Integer>> index = new HashMap<>();

    void f() {
        List<String> local = new ArrayList<>();
        Comparator<String> c = new Comparator<String>() {
            public int compare(String a, String b) {
                return 0;
            }
        };
    }
}
"#,
    )
}

#[test]
fn test_wildcard_declared_type_kept() -> Result<()> {
    no_change(
        "staticfix.java.UseDiamondOperator",
        r#"
import java.util.*;

class A {
    List<? extends Number> numbers = new ArrayList<Integer>();
}
"#,
    )
}

#[test]
fn test_braces_added_to_control_bodies() -> Result<()> {
    rewrite_run(
        "staticfix.java.NeedBraces",
        r#"
class A {
    void f(int a) {
        if (a > 0) a--;
        else a++;
        while (a > 10)
            a--;
        for (int i = 0; i < a; i++) a--;
    }
}
"#,
        r#"
class A {
    void f(int a) {
        if (a > 0) {
            a--;
        }
        else {
            a++;
        }
        while (a > 10) {
            a--;
        }
        for (int i = 0; i < a; i++) {
            a--;
        }
    }
}
"#,
    )
}

#[test]
fn test_else_if_chain_kept() -> Result<()> {
    no_change(
        "staticfix.java.NeedBraces",
        r#"
class A {
    void f(int a) {
        if (a > 0) {
            a--;
        } else if (a < 0) {
            a++;
        }
    }
}
"#,
    )
}

#[test]
fn test_javadoc_non_ascii_escaped() -> Result<()> {
    rewrite_run(
        "staticfix.java.JavadocNonAsciiCharacters",
        r#"
/**
 * Café résumé
 */
class A {
    // naïve line comments are left alone
}
"#,
        r#"
/**
 * Caf&#233; r&#233;sum&#233;
 */
class A {
    // naïve line comments are left alone
}
"#,
    )
}

#[test]
fn test_escape_non_ascii_uses_code_points() {
    assert_eq!(escape_non_ascii("a→b"), "a&#8594;b");
    assert_eq!(escape_non_ascii("plain"), "plain");
}

#[test]
fn test_annotations_matching_pattern_removed_with_imports() -> Result<()> {
    let options = RecipeOptions::new().with(
        "annotationPattern",
        OptionValue::String("@lombok.*".to_string()),
    );
    rewrite_run_with(
        "staticfix.java.RemoveAnnotation",
        &options,
        r#"
package demo;

import lombok.Getter;
import lombok.Setter;

@Getter
@Setter
public class A {
    @Deprecated
    private int x;
}
"#,
        r#"
package demo;

public class A {
    @Deprecated
    private int x;
}
"#,
    )
}

#[test]
fn test_java_lang_annotation_removed() -> Result<()> {
    let options = RecipeOptions::new().with(
        "annotationPattern",
        OptionValue::String("java.lang.Deprecated".to_string()),
    );
    rewrite_run_with(
        "staticfix.java.RemoveAnnotation",
        &options,
        r#"
public class A {
    @Deprecated
    private int x;

    @SuppressWarnings("unchecked")
    void f() {
    }
}
"#,
        r#"
public class A {
    private int x;

    @SuppressWarnings("unchecked")
    void f() {
    }
}
"#,
    )
}

#[test]
fn test_remove_annotation_requires_pattern() -> Result<()> {
    let registry = RecipeRegistry::builtin()?;
    let err = registry
        .instantiate("RemoveAnnotation", &RecipeOptions::new())
        .err()
        .expect("missing annotationPattern should be rejected");
    assert!(err.to_string().contains("annotationPattern"));
    Ok(())
}
