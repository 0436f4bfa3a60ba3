// Copyright (C) Brian G. Milnes 2025

//! Text edits over a compilation unit's source
//!
//! Recipes never mutate trees. They return byte-range edits; the runner
//! applies them and re-parses, so untouched text keeps its formatting.

pub mod edit {
    use tree_sitter::Node;

    use crate::ast_utils::ast_utils::is_comment;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TextEdit {
        pub start: usize,
        pub end: usize,
        pub replacement: String,
    }

    impl TextEdit {
        pub fn replace_range(start: usize, end: usize, replacement: impl Into<String>) -> Self {
            TextEdit {
                start,
                end,
                replacement: replacement.into(),
            }
        }

        pub fn replace(node: Node, replacement: impl Into<String>) -> Self {
            Self::replace_range(node.start_byte(), node.end_byte(), replacement)
        }

        pub fn delete(start: usize, end: usize) -> Self {
            Self::replace_range(start, end, "")
        }

        pub fn insert(at: usize, text: impl Into<String>) -> Self {
            Self::replace_range(at, at, text)
        }
    }

    /// Drop edits overlapping an earlier one; outer edits win over nested ones
    pub fn non_overlapping(mut edits: Vec<TextEdit>) -> Vec<TextEdit> {
        edits.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
        edits.dedup();

        let mut kept: Vec<TextEdit> = Vec::with_capacity(edits.len());
        let mut last_end = 0;
        for edit in edits {
            if edit.start < last_end {
                continue;
            }
            last_end = last_end.max(edit.end);
            kept.push(edit);
        }
        kept
    }

    /// Apply edits, returning the new text
    pub fn apply_edits(source: &str, edits: Vec<TextEdit>) -> String {
        let mut kept = non_overlapping(edits);
        kept.reverse();

        let mut result = source.to_string();
        for edit in kept {
            result.replace_range(edit.start..edit.end, &edit.replacement);
        }
        result
    }

    /// Offset of the first byte of the line containing `offset`
    pub fn line_start(source: &str, offset: usize) -> usize {
        source[..offset].rfind('\n').map(|p| p + 1).unwrap_or(0)
    }

    /// Offset just past the newline ending the line containing `offset`
    pub fn line_end(source: &str, offset: usize) -> usize {
        source[offset..]
            .find('\n')
            .map(|p| offset + p + 1)
            .unwrap_or(source.len())
    }

    /// Leading whitespace of the line containing `offset`
    pub fn indentation(source: &str, offset: usize) -> &str {
        let start = line_start(source, offset);
        let line = &source[start..];
        let width = line
            .find(|c: char| !c.is_whitespace() || c == '\n')
            .unwrap_or(line.len());
        &line[..width]
    }

    fn is_blank(line: &str) -> bool {
        line.trim().is_empty()
    }

    fn line_at(source: &str, start: usize) -> &str {
        let end = line_end(source, start);
        source[start..end].trim_end_matches('\n')
    }

    fn previous_line(source: &str, start: usize) -> Option<(usize, &str)> {
        if start == 0 {
            return None;
        }
        let prev_start = line_start(source, start - 1);
        Some((prev_start, &source[prev_start..start - 1]))
    }

    /// Delete `start..end`, widening to whole lines when nothing else shares them
    ///
    /// A trailing `//` comment on the last line goes with the deleted text.
    /// Blank lines left doubled, or left hugging a brace, are collapsed.
    pub fn delete_lines(source: &str, start: usize, end: usize) -> TextEdit {
        let first_line = line_start(source, start);
        let own_line_before = is_blank(&source[first_line..start]);
        let last_line_end = line_end(source, end);
        let rest = source[end..last_line_end].trim();
        let own_line_after = rest.is_empty() || rest.starts_with("//");

        if !(own_line_before && own_line_after) {
            let trailing = source[end..]
                .find(|c: char| c != ' ' && c != '\t')
                .map(|p| end + p)
                .unwrap_or(source.len());
            return TextEdit::delete(start, trailing);
        }

        let mut del_start = first_line;
        let mut del_end = last_line_end;

        let next_line = if del_end < source.len() { Some(line_at(source, del_end)) } else { None };
        let prev_line = previous_line(source, del_start);

        let prev_blank = prev_line.is_some_and(|(_, l)| is_blank(l));
        let prev_opens = prev_line.is_some_and(|(_, l)| l.trim_end().ends_with('{'));
        let next_blank = next_line.is_some_and(is_blank);
        let next_closes = next_line.is_some_and(|l| l.trim_start().starts_with('}'));

        if next_blank && (prev_blank || prev_opens || del_start == 0) {
            del_end = line_end(source, del_end);
        } else if prev_blank && next_closes {
            if let Some((prev_start, _)) = prev_line {
                del_start = prev_start;
            }
        }

        TextEdit::delete(del_start, del_end)
    }

    /// Comments directly above a declaration with no blank line in between
    pub fn attached_comments<'t>(decl: Node<'t>, source: &str) -> Vec<Node<'t>> {
        let mut attached = Vec::new();
        let mut boundary = decl.start_byte();
        let mut current = decl.prev_sibling();

        while let Some(prev) = current {
            if !is_comment(prev) {
                break;
            }
            let gap = &source[prev.end_byte()..boundary];
            if gap.matches('\n').count() > 1 || !gap.trim().is_empty() {
                break;
            }
            let before = &source[line_start(source, prev.start_byte())..prev.start_byte()];
            if !before.trim().is_empty() {
                break;
            }
            attached.push(prev);
            boundary = prev.start_byte();
            current = prev.prev_sibling();
        }

        attached.reverse();
        attached
    }

    /// Delete several spans, merging neighbours separated only by whitespace
    pub fn delete_spans(source: &str, mut spans: Vec<(usize, usize)>) -> Vec<TextEdit> {
        spans.sort();
        let mut merged: Vec<(usize, usize)> = Vec::new();
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start <= last.1 || source[last.1..start].trim().is_empty() => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }
        merged
            .into_iter()
            .map(|(start, end)| delete_lines(source, start, end))
            .collect()
    }

    /// Span of a declaration including its attached leading comments
    pub fn declaration_span(decl: Node, source: &str) -> (usize, usize) {
        let start = attached_comments(decl, source)
            .first()
            .map(|c| c.start_byte())
            .unwrap_or(decl.start_byte());
        (start, decl.end_byte())
    }
}
