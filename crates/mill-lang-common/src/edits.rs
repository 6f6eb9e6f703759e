//! Span-based text edits with selection mapping
//!
//! Refactorings describe their output as a set of non-overlapping edits
//! against the original text. Untouched text is preserved byte for byte, and
//! a selection can be carried through the edits so the cursor stays on the
//! token it was on.

use crate::location::LineIndex;
use mill_foundation::{MillError, MillResult, Selection};
use std::ops::Range;

/// Replace `range` (byte offsets into the original text) with `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    fn delta(&self) -> isize {
        self.text.len() as isize - self.range.len() as isize
    }
}

/// An ordered batch of edits against one snapshot
#[derive(Debug, Clone, Default)]
pub struct TextEdits {
    edits: Vec<TextEdit>,
}

impl TextEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, range: Range<usize>, text: impl Into<String>) -> &mut Self {
        self.edits.push(TextEdit {
            range,
            text: text.into(),
        });
        self
    }

    pub fn insert(&mut self, offset: usize, text: impl Into<String>) -> &mut Self {
        self.replace(offset..offset, text)
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextEdit> {
        self.edits.iter()
    }

    /// Indices of the edits sorted by start offset; equal starts keep insertion order
    fn ascending(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.edits.len()).collect();
        order.sort_by_key(|&i| (self.edits[i].range.start, i));
        order
    }

    fn check(&self, source: &str) -> MillResult<()> {
        for edit in &self.edits {
            if edit.range.start > edit.range.end || edit.range.end > source.len() {
                return Err(MillError::invalid_data(format!(
                    "Edit range {:?} is outside of the document ({} bytes)",
                    edit.range,
                    source.len()
                )));
            }
            if !source.is_char_boundary(edit.range.start) || !source.is_char_boundary(edit.range.end)
            {
                return Err(MillError::invalid_data(format!(
                    "Edit range {:?} splits a character",
                    edit.range
                )));
            }
        }
        let order = self.ascending();
        for pair in order.windows(2) {
            let (a, b) = (&self.edits[pair[0]], &self.edits[pair[1]]);
            if b.range.start < a.range.end {
                return Err(MillError::invalid_data(format!(
                    "Edits {:?} and {:?} overlap",
                    a.range, b.range
                )));
            }
        }
        Ok(())
    }

    /// Apply every edit, bottom of the document first
    ///
    /// Edits are applied in descending start order, so no edit shifts the
    /// offsets of one still to be applied. Edits starting at the same offset
    /// are applied last-added first, which keeps them in insertion order in
    /// the output.
    pub fn apply(&self, source: &str) -> MillResult<String> {
        self.check(source)?;
        let mut output = source.to_string();
        for &i in self.ascending().iter().rev() {
            let edit = &self.edits[i];
            output.replace_range(edit.range.clone(), &edit.text);
        }
        Ok(output)
    }

    /// Where `offset` in the original text ends up after applying the edits
    ///
    /// An insertion exactly at `offset` leaves it before the inserted text.
    /// An offset strictly inside a replaced range keeps its distance from
    /// the range start, clamped to the replacement and floored to one of its
    /// character boundaries.
    pub fn map_offset(&self, offset: usize) -> usize {
        let mut delta: isize = 0;
        for i in self.ascending() {
            let edit = &self.edits[i];
            if edit.range.is_empty() {
                if edit.range.start < offset {
                    delta += edit.delta();
                    continue;
                }
                break;
            }
            if edit.range.end <= offset {
                delta += edit.delta();
            } else if edit.range.start < offset {
                let mut within = (offset - edit.range.start).min(edit.text.len());
                while !edit.text.is_char_boundary(within) {
                    within -= 1;
                }
                return (edit.range.start as isize + delta) as usize + within;
            } else {
                break;
            }
        }
        (offset as isize + delta) as usize
    }

    /// Apply the edits and carry `selection` into the new text
    pub fn apply_with_selection(
        &self,
        index: &LineIndex,
        selection: &Selection,
    ) -> MillResult<(String, Selection)> {
        let output = self.apply(index.text())?;
        let range = index.range(selection).ok_or_else(|| {
            MillError::invalid_data(format!("Selection {} is outside of the document", selection))
        })?;
        let new_index = LineIndex::new(&output);
        let mapped = new_index.selection(self.map_offset(range.start)..self.map_offset(range.end));
        Ok((output, mapped))
    }
}
