//! Patch protocol shared by refactorings and editors

use super::selection::Selection;
use serde::{Deserialize, Serialize};

/// Source text of a whole document
pub type Code = String;

/// One replacement or insertion against the pre-edit document
///
/// `selection` is expressed in the coordinates of the text the refactoring
/// was computed from, never in coordinates shifted by other patches of the
/// same batch. A zero-width selection is an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub code: Code,
    pub selection: Selection,
}

impl Patch {
    pub fn new(code: impl Into<Code>, selection: Selection) -> Self {
        Self {
            code: code.into(),
            selection,
        }
    }
}

/// Editor-native follow-up actions a refactoring can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditorCommand {
    /// Let the user retype the symbol under the cursor
    RenameSymbol,
}

impl EditorCommand {
    pub fn key(&self) -> &'static str {
        match self {
            EditorCommand::RenameSymbol => "renameSymbol",
        }
    }
}

/// What happened to a delegated command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandResult {
    Ok,
    NotSupported,
}
