//! Test helper functions and utilities

use mill_foundation::Selection;
use mill_lang_common::{InMemoryEditor, LineIndex};
use std::path::{Path, PathBuf};

/// Marker for the start of a selection (or the cursor) in fixture code
pub const START_MARKER: &str = "[start]";
/// Marker for the end of a selection in fixture code
pub const END_MARKER: &str = "[end]";

/// Strip selection markers from `marked` and return the code with the selection
///
/// A lone `[start]` marks a cursor. Without any marker the cursor sits at the
/// beginning of the document.
///
/// # Panics
///
/// Panics when `[end]` is given without `[start]`.
pub fn code_with_selection(marked: &str) -> (String, Selection) {
    let start = marked.find(START_MARKER);
    let end = marked.find(END_MARKER);
    let (Some(start), end) = (start, end) else {
        assert!(end.is_none(), "{END_MARKER} without {START_MARKER}");
        return (marked.to_string(), Selection::cursor_at(0, 0));
    };

    let code = marked.replacen(START_MARKER, "", 1).replacen(END_MARKER, "", 1);
    let index = LineIndex::new(&code);
    let start_offset = start;
    let end_offset = end
        .map(|end| end - START_MARKER.len())
        .unwrap_or(start_offset);
    (code.clone(), index.selection(start_offset..end_offset))
}

/// In-memory editor over `marked` code, selection taken from its markers
pub fn editor_for(marked: &str) -> InMemoryEditor {
    let (code, selection) = code_with_selection(marked);
    InMemoryEditor::new(code).with_selection(selection)
}

/// Write a fixture file into `dir` and return its path
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, contents).expect("Failed to write fixture file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use mill_foundation::Position;

    #[test]
    fn test_markers_become_a_selection() {
        let (code, selection) = code_with_selection("logger([start]\"Hello!\"[end]);");
        assert_eq!(code, "logger(\"Hello!\");");
        assert_eq!(selection, Selection::new([0, 7], [0, 15]));
    }

    #[test]
    fn test_single_marker_is_a_cursor() {
        let (code, selection) = code_with_selection("if (a)\n  [start]b();");
        assert_eq!(code, "if (a)\n  b();");
        assert!(selection.is_empty());
        assert_eq!(selection.start(), Position::new(1, 2));
    }

    #[test]
    fn test_no_marker_puts_cursor_at_origin() {
        let (_, selection) = code_with_selection("a();");
        assert_eq!(selection, Selection::cursor_at(0, 0));
    }
}
