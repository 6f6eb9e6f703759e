//! Conversions between byte offsets and line/column positions

use mill_foundation::protocol::{Position, Selection};
use std::ops::Range;

/// Line table over one snapshot of source text
///
/// Columns are counted in characters so that positions match what an
/// editor displays for non-ASCII text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: String,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self {
            text: text.to_string(),
            line_starts,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of a byte offset
    ///
    /// Offsets past the end clamp to the last position and offsets inside a
    /// multibyte character resolve to that character.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let column = self.text[line_start..offset].chars().count();
        Position::new(line as u32, column as u32)
    }

    /// Byte offset of a position
    ///
    /// Columns past the end of a line clamp to the line end. Returns `None`
    /// when the line does not exist.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_text = self.line_text(position.line)?;
        let within = line_text
            .char_indices()
            .nth(position.column as usize)
            .map(|(i, _)| i)
            .unwrap_or(line_text.len());
        Some(line_start + within)
    }

    pub fn range(&self, selection: &Selection) -> Option<Range<usize>> {
        Some(self.offset(selection.start())?..self.offset(selection.end())?)
    }

    pub fn selection(&self, range: Range<usize>) -> Selection {
        Selection::from_positions(self.position(range.start), self.position(range.end))
    }

    /// Text of a line without its terminator
    pub fn line_text(&self, line: u32) -> Option<&str> {
        let line = line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let text = &self.text[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Leading whitespace of the line containing `offset`
    pub fn indentation_at(&self, offset: usize) -> &str {
        let line = self.position(offset).line;
        let text = self.line_text(line).unwrap_or("");
        let trimmed = text.trim_start_matches([' ', '\t']);
        &text[..text.len() - trimmed.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "import logger from \"./logger\";\n\nlogger(\"Hello!\");";

    #[test]
    fn test_offsets_round_trip_through_positions() {
        let index = LineIndex::new(SOURCE);
        let offset = SOURCE.find("\"Hello").unwrap();
        assert_eq!(index.position(offset), Position::new(2, 7));
        assert_eq!(index.offset(Position::new(2, 7)), Some(offset));
    }

    #[test]
    fn test_empty_line_has_a_position() {
        let index = LineIndex::new(SOURCE);
        assert_eq!(index.line_text(1), Some(""));
        assert_eq!(index.offset(Position::new(1, 0)), Some(31));
    }

    #[test]
    fn test_column_past_line_end_clamps() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(Position::new(0, 10)), Some(2));
        assert_eq!(index.offset(Position::new(5, 0)), None);
    }

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::new("const é = \"ü\";");
        let offset = "const é = ".len();
        assert_eq!(index.position(offset), Position::new(0, 10));
        assert_eq!(index.offset(Position::new(0, 10)), Some(offset));
    }

    #[test]
    fn test_offset_inside_a_character_resolves_to_it() {
        let index = LineIndex::new("a = \"ä\";");
        let inside = "a = \"".len() + 1;
        assert_eq!(index.position(inside), Position::new(0, 5));
    }

    #[test]
    fn test_crlf_line_text_excludes_carriage_return() {
        let index = LineIndex::new("a;\r\n  b;\r\n");
        assert_eq!(index.line_text(1), Some("  b;"));
        assert_eq!(index.indentation_at(6), "  ");
    }
}
