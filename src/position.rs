//! Source positions - coordinates for every range in the index graph
//!
//! Positions are zero-based (line 0 = first line, character 0 = first
//! column), matching the LSIF dump format. Character offsets count Unicode
//! scalar values, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single point in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Character offset within the line (0-indexed)
    pub character: u32,
}

impl Position {
    /// Create a new position
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// A half-open span of source text, from `start` (inclusive) to `end`
/// (exclusive in the character dimension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Convenience constructor from raw line/character coordinates
    pub fn from_coords(start_line: u32, start_char: u32, end_line: u32, end_char: u32) -> Self {
        Self {
            start: Position::new(start_line, start_char),
            end: Position::new(end_line, end_char),
        }
    }

    /// Check whether the span starts and ends on the same line
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Slice a line between two character columns.
///
/// Columns are clamped to the line length, so a provider reporting an end
/// column past the end of the line yields the remainder of the line rather
/// than a panic. Multi-byte codepoints are never split.
pub fn slice_columns(line: &str, start: u32, end: u32) -> &str {
    let start = start as usize;
    let end = end as usize;

    let mut byte_start = line.len();
    let mut byte_end = line.len();
    for (chars_seen, (byte_idx, _)) in line.char_indices().enumerate() {
        if chars_seen == start {
            byte_start = byte_idx;
        }
        if chars_seen == end {
            byte_end = byte_idx;
            break;
        }
    }

    if byte_start >= byte_end {
        return "";
    }
    &line[byte_start..byte_end]
}

/// Slice a line from a character column to its end.
pub fn slice_from_column(line: &str, start: u32) -> &str {
    slice_columns(line, start, line.chars().count() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_single_line() {
        let span = Span::from_coords(3, 4, 3, 9);
        assert!(span.is_single_line());
        assert_eq!(span.to_string(), "3:4-3:9");

        let span = Span::from_coords(3, 4, 5, 0);
        assert!(!span.is_single_line());
    }

    #[test]
    fn test_slice_columns() {
        assert_eq!(slice_columns("def f(): pass", 4, 5), "f");
        assert_eq!(slice_columns("def f(): pass", 0, 13), "def f(): pass");
        assert_eq!(slice_columns("short", 2, 100), "ort");
        assert_eq!(slice_columns("short", 7, 9), "");
        assert_eq!(slice_columns("abc", 2, 1), "");
    }

    #[test]
    fn test_slice_columns_multibyte() {
        // Columns count codepoints, not bytes
        assert_eq!(slice_columns("héllo = 1", 1, 5), "éllo");
        assert_eq!(slice_from_column("héllo = 1", 6), "= 1");
    }

    #[test]
    fn test_position_serializes_lsif_fields() {
        let json = serde_json::to_value(Position::new(2, 7)).unwrap();
        assert_eq!(json, serde_json::json!({"line": 2, "character": 7}));
    }
}
