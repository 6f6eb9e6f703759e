//! Positions and selections in source text
//!
//! All coordinates are zero-based. Columns count characters, not bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in source text, ordered line-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-based)
    pub line: u32,
    /// Column (0-based, in characters)
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An immutable range of source text; a cursor is a selection with `start == end`
///
/// `start` never compares greater than `end`: constructors normalise reversed
/// input so that a selection made "backwards" in the editor behaves like the
/// forward one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct Selection {
    start: Position,
    end: Position,
}

#[derive(Deserialize)]
struct RawSelection {
    start: Position,
    end: Position,
}

impl From<RawSelection> for Selection {
    fn from(raw: RawSelection) -> Self {
        Selection::from_positions(raw.start, raw.end)
    }
}

impl Selection {
    /// Build a selection from `[line, column]` pairs
    pub fn new(start: [u32; 2], end: [u32; 2]) -> Self {
        Self::from_positions(Position::new(start[0], start[1]), Position::new(end[0], end[1]))
    }

    pub fn from_positions(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// A zero-width selection
    pub fn cursor_at(line: u32, column: u32) -> Self {
        let position = Position::new(line, column);
        Self {
            start: position,
            end: position,
        }
    }

    pub fn cursor_at_position(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// True for a bare cursor
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of line breaks covered by the selection
    pub fn height(&self) -> u32 {
        self.end.line - self.start.line
    }

    /// Both ends of `self` lie within `other`, boundaries included
    pub fn is_inside(&self, other: &Selection) -> bool {
        other.contains_position(self.start) && other.contains_position(self.end)
    }

    pub fn contains_position(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn starts_before(&self, other: &Selection) -> bool {
        self.start < other.start
    }

    /// The two ranges share at least one point
    pub fn overlaps(&self, other: &Selection) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Zero-width selection at this selection's start
    pub fn collapse_to_start(&self) -> Self {
        Self::cursor_at_position(self.start)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_positions_are_normalised() {
        let selection = Selection::new([4, 2], [1, 8]);
        assert_eq!(selection.start(), Position::new(1, 8));
        assert_eq!(selection.end(), Position::new(4, 2));
    }

    #[test]
    fn test_cursor_is_empty() {
        assert!(Selection::cursor_at(3, 3).is_empty());
        assert!(!Selection::new([3, 3], [3, 4]).is_empty());
    }

    #[test]
    fn test_positions_compare_line_major() {
        assert!(Position::new(1, 80) < Position::new(2, 0));
        assert!(Position::new(2, 1) > Position::new(2, 0));
    }

    #[test]
    fn test_is_inside_includes_boundaries() {
        let outer = Selection::new([2, 7], [2, 15]);
        assert!(Selection::new([2, 7], [2, 15]).is_inside(&outer));
        assert!(Selection::cursor_at(2, 9).is_inside(&outer));
        assert!(Selection::cursor_at(2, 15).is_inside(&outer));
        assert!(!Selection::new([2, 6], [2, 9]).is_inside(&outer));
        assert!(!Selection::cursor_at(3, 0).is_inside(&outer));
    }

    #[test]
    fn test_multi_line_containment() {
        let outer = Selection::new([0, 10], [4, 1]);
        assert!(Selection::new([1, 0], [3, 200]).is_inside(&outer));
        assert!(!Selection::new([0, 9], [1, 0]).is_inside(&outer));
    }

    #[test]
    fn test_overlaps_is_symmetric() {
        let a = Selection::new([0, 0], [0, 5]);
        let b = Selection::new([0, 5], [1, 0]);
        let c = Selection::new([1, 1], [1, 2]);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_starts_before() {
        let a = Selection::cursor_at(1, 2);
        let b = Selection::new([1, 3], [1, 4]);
        assert!(a.starts_before(&b));
        assert!(!b.starts_before(&a));
        assert!(!a.starts_before(&a));
    }

    #[test]
    fn test_height_counts_line_breaks() {
        assert_eq!(Selection::new([2, 0], [5, 3]).height(), 3);
        assert_eq!(Selection::cursor_at(2, 0).height(), 0);
    }

    #[test]
    fn test_deserializing_normalises_order() {
        let selection: Selection = serde_json::from_value(serde_json::json!({
            "start": {"line": 5, "column": 0},
            "end": {"line": 1, "column": 0}
        }))
        .unwrap();
        assert_eq!(selection, Selection::new([1, 0], [5, 0]));
    }

    #[test]
    fn test_serializes_as_positions() {
        let json = serde_json::to_value(Selection::new([0, 1], [2, 3])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start": {"line": 0, "column": 1}, "end": {"line": 2, "column": 3}})
        );
    }
}
