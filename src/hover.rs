//! Hover payloads - the text shown when a user inspects a symbol
//!
//! A payload is built once per definition and reused verbatim for every use
//! of that definition, so hover text is identical wherever the symbol is
//! inspected.

use crate::position::{Span, slice_columns, slice_from_column};
use serde::Serialize;

/// A structured hover payload: a code excerpt tagged with its language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverContents {
    /// Language tag for syntax highlighting in the consumer
    pub language: String,
    /// The code excerpt, shown verbatim
    pub value: String,
}

impl HoverContents {
    /// Create a hover payload
    pub fn new(language: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            value: value.into(),
        }
    }
}

/// Extract the source excerpt covered by a definition's span.
///
/// A single-line span yields the slice of that line between the span's
/// columns. A multi-line span yields the first line from its start column,
/// every fully covered line, and the last line up to its end column, joined
/// with newlines.
pub fn definition_summary(source_lines: &[&str], span: Span) -> String {
    let start_line = span.start.line as usize;
    let end_line = span.end.line as usize;

    let line_at = |idx: usize| source_lines.get(idx).copied().unwrap_or("");

    if span.is_single_line() {
        return slice_columns(line_at(start_line), span.start.character, span.end.character)
            .to_string();
    }

    let mut parts = Vec::with_capacity(end_line - start_line + 1);
    parts.push(slice_from_column(line_at(start_line), span.start.character));
    for idx in (start_line + 1)..end_line {
        parts.push(line_at(idx));
    }
    parts.push(slice_columns(line_at(end_line), 0, span.end.character));
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_summary() {
        let lines = vec!["def f(): pass", "f()"];
        let span = Span::from_coords(0, 4, 0, 5);
        assert_eq!(definition_summary(&lines, span), "f");
    }

    #[test]
    fn test_full_line_summary() {
        let lines = vec!["x = compute()", ""];
        let span = Span::from_coords(0, 0, 0, 13);
        assert_eq!(definition_summary(&lines, span), "x = compute()");
    }

    #[test]
    fn test_multi_line_summary() {
        let lines = vec!["value = [", "    1,", "    2,", "]"];
        let span = Span::from_coords(0, 0, 3, 1);
        assert_eq!(definition_summary(&lines, span), "value = [\n    1,\n    2,\n]");
    }

    #[test]
    fn test_out_of_range_span_is_empty() {
        let lines = vec!["only line"];
        let span = Span::from_coords(5, 0, 5, 4);
        assert_eq!(definition_summary(&lines, span), "");
    }
}
