// Copyright (C) Brian G. Milnes 2025

//! Tests for text edits and line-aware deletion

use staticfix::edit::edit::{delete_lines, delete_spans, non_overlapping};
use staticfix::{apply_edits, TextEdit};

fn span(source: &str, text: &str) -> (usize, usize) {
    let start = source.find(text).expect("text is in source");
    (start, start + text.len())
}

fn delete(source: &str, text: &str) -> String {
    let (start, end) = span(source, text);
    apply_edits(source, vec![delete_lines(source, start, end)])
}

#[test]
fn test_outer_edit_wins_over_nested() {
    let edits = vec![
        TextEdit::replace_range(2, 3, "Y"),
        TextEdit::replace_range(1, 4, "X"),
        TextEdit::insert(5, "Z"),
    ];
    assert_eq!(non_overlapping(edits.clone()).len(), 2);
    assert_eq!(apply_edits("abcdef", edits), "aXeZf");
}

#[test]
fn test_delete_own_line_collapses_blank_after_brace() {
    let source = "class A {\n    int a;\n\n    int b;\n}\n";
    assert_eq!(delete(source, "int a;"), "class A {\n    int b;\n}\n");
}

#[test]
fn test_delete_own_line_before_closing_brace() {
    let source = "class A {\n    int a;\n\n    int b;\n}\n";
    assert_eq!(delete(source, "int b;"), "class A {\n    int a;\n}\n");
}

#[test]
fn test_delete_shared_line_keeps_neighbour() {
    let source = "int a = 1; int b = 2;\n";
    assert_eq!(delete(source, "int a = 1;"), "int b = 2;\n");
}

#[test]
fn test_trailing_comment_goes_with_line() {
    let source = "class A {\n    int a; // note\n    int b;\n}\n";
    assert_eq!(delete(source, "int a;"), "class A {\n    int b;\n}\n");
}

#[test]
fn test_adjacent_spans_merge() {
    let source = "class A {\n    int a;\n    int b;\n    int c;\n}\n";
    let edits = delete_spans(source, vec![span(source, "int b;"), span(source, "int a;")]);
    assert_eq!(edits.len(), 1);
    assert_eq!(apply_edits(source, edits), "class A {\n    int c;\n}\n");
}
