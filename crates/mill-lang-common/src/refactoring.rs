//! Common refactoring primitives and utilities
//!
//! Indentation helpers shared by refactorings that generate new blocks of
//! code around existing statements.

/// Helper for choosing the indentation unit of generated code
pub struct IndentationDetector;

impl IndentationDetector {
    /// Tabs when the source indents with tabs, otherwise `width` spaces
    pub fn unit(source: &str, width: usize) -> String {
        let uses_tabs = source
            .lines()
            .filter(|line| !line.trim().is_empty())
            .any(|line| line.starts_with('\t'));
        if uses_tabs {
            "\t".to_string()
        } else {
            " ".repeat(width)
        }
    }
}

/// Move a multi-line snippet from one base indentation to another
///
/// The first line is left alone: the caller places it. Every following line
/// loses up to `from` worth of leading whitespace and gains `to`. Blank lines
/// stay blank.
pub fn reindent(text: &str, from: &str, to: &str) -> String {
    if from == to {
        return text.to_string();
    }
    let mut lines = text.split('\n');
    let mut output = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        output.push_str(first);
    }
    for line in lines {
        output.push('\n');
        if line.trim().is_empty() {
            continue;
        }
        let leading = line.len() - line.trim_start_matches([' ', '\t']).len();
        let strip = leading.min(from.len());
        output.push_str(to);
        output.push_str(&line[strip..]);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_unit() {
        assert_eq!(IndentationDetector::unit("if (a) {\n\tb();\n}", 2), "\t");
        assert_eq!(IndentationDetector::unit("if (a) {\n    b();\n}", 2), "  ");
    }

    #[test]
    fn test_reindent_shifts_following_lines() {
        let text = "if (a) {\n  b();\n\n}";
        assert_eq!(reindent(text, "", "  "), "if (a) {\n    b();\n\n  }");
        assert_eq!(reindent("x(\n    y)", "  ", ""), "x(\n  y)");
    }
}
