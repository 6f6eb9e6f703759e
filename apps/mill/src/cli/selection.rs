//! Selection flags shared by the `refactor` and `actions` commands

use clap::Args;
use mill_foundation::Selection;

/// Where the refactoring applies; all coordinates are zero-based
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Line of the cursor or selection start
    #[arg(long)]
    pub line: u32,

    /// Column of the cursor or selection start
    #[arg(long)]
    pub column: u32,

    /// Line of the selection end (omit for a cursor)
    #[arg(long, requires = "end_column")]
    pub end_line: Option<u32>,

    /// Column of the selection end (omit for a cursor)
    #[arg(long, requires = "end_line")]
    pub end_column: Option<u32>,
}

impl SelectionArgs {
    pub fn selection(&self) -> Selection {
        match (self.end_line, self.end_column) {
            (Some(end_line), Some(end_column)) => {
                Selection::new([self.line, self.column], [end_line, end_column])
            }
            _ => Selection::cursor_at(self.line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_without_end() {
        let args = SelectionArgs {
            line: 2,
            column: 9,
            end_line: None,
            end_column: None,
        };
        assert_eq!(args.selection(), Selection::cursor_at(2, 9));
    }

    #[test]
    fn test_range_with_end() {
        let args = SelectionArgs {
            line: 2,
            column: 7,
            end_line: Some(2),
            end_column: Some(15),
        };
        assert_eq!(args.selection(), Selection::new([2, 7], [2, 15]));
    }
}
