//! Editor port
//!
//! The boundary between the refactoring engine and whatever hosts the
//! document: an IDE, the CLI, or a test. The engine reads the current code
//! and selection, then either replaces the whole document or applies a batch
//! of patches, optionally followed by one delegated command.

use crate::edits::TextEdits;
use crate::location::LineIndex;
use async_trait::async_trait;
use mill_foundation::{
    Code, CommandResult, EditorCommand, ErrorReason, MillError, MillResult, Patch, Selection,
};
use tracing::debug;

#[async_trait]
pub trait Editor: Send {
    /// Current text of the document
    async fn code(&self) -> Code;

    /// Current selection in the document
    async fn selection(&self) -> Selection;

    /// Replace the whole document, optionally moving the selection
    async fn write(&mut self, code: Code, selection: Option<Selection>) -> MillResult<()>;

    /// Apply patches expressed in the coordinates of the current document
    async fn apply(&mut self, patches: Vec<Patch>) -> MillResult<()>;

    /// Ask the host to run one of its own commands
    async fn delegate(&mut self, command: EditorCommand) -> CommandResult;

    /// Tell the user why nothing happened
    async fn show_error(&mut self, reason: ErrorReason);
}

/// Apply `patches` to `code` and carry `selection` through them
///
/// Patches are applied from the bottom of the document up so that every
/// patch lands on the offsets it was computed against. Overlapping patches
/// are rejected and leave nothing applied.
pub fn apply_patches(
    code: &str,
    selection: &Selection,
    patches: &[Patch],
) -> MillResult<(Code, Selection)> {
    let index = LineIndex::new(code);
    let mut edits = TextEdits::new();
    for patch in patches {
        let range = index.range(&patch.selection).ok_or_else(|| {
            MillError::invalid_data(format!(
                "Patch selection {} is outside of the document",
                patch.selection
            ))
        })?;
        edits.replace(range, patch.code.clone());
    }
    edits.apply_with_selection(&index, selection)
}

/// Editor over an in-memory document
///
/// Used by the CLI and by tests. Delegated commands and shown errors are
/// recorded so callers can inspect them after a run.
#[derive(Debug, Clone)]
pub struct InMemoryEditor {
    code: Code,
    selection: Selection,
    supports_delegation: bool,
    delegated: Vec<EditorCommand>,
    errors: Vec<ErrorReason>,
}

impl InMemoryEditor {
    pub fn new(code: impl Into<Code>) -> Self {
        Self {
            code: code.into(),
            selection: Selection::cursor_at(0, 0),
            supports_delegation: true,
            delegated: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Answer `NotSupported` to every delegated command
    pub fn without_delegation(mut self) -> Self {
        self.supports_delegation = false;
        self
    }

    pub fn current_code(&self) -> &str {
        &self.code
    }

    pub fn current_selection(&self) -> Selection {
        self.selection
    }

    pub fn delegated(&self) -> &[EditorCommand] {
        &self.delegated
    }

    pub fn errors(&self) -> &[ErrorReason] {
        &self.errors
    }
}

#[async_trait]
impl Editor for InMemoryEditor {
    async fn code(&self) -> Code {
        self.code.clone()
    }

    async fn selection(&self) -> Selection {
        self.selection
    }

    async fn write(&mut self, code: Code, selection: Option<Selection>) -> MillResult<()> {
        self.code = code;
        if let Some(selection) = selection {
            self.selection = selection;
        }
        Ok(())
    }

    async fn apply(&mut self, patches: Vec<Patch>) -> MillResult<()> {
        debug!(patches = patches.len(), "Applying patches");
        let (code, selection) = apply_patches(&self.code, &self.selection, &patches)?;
        self.code = code;
        self.selection = selection;
        Ok(())
    }

    async fn delegate(&mut self, command: EditorCommand) -> CommandResult {
        self.delegated.push(command);
        if self.supports_delegation {
            CommandResult::Ok
        } else {
            CommandResult::NotSupported
        }
    }

    async fn show_error(&mut self, reason: ErrorReason) {
        self.errors.push(reason);
    }
}
