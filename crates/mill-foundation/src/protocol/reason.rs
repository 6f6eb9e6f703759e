//! Reasons a refactoring could not be performed

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which precondition failed; carries no payload
///
/// These are expected outcomes surfaced to the user, not faults. The engine
/// never branches on them: a strategy returns one, the orchestrator reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorReason {
    DidNotFoundIfStatementToAddBraces,
    DidNotFoundIfElseToConvert,
    DidNotFoundExtractedCode,
    DidNotFoundTypeToExtract,
    DidNotFoundTernaryToFlip,
}

impl ErrorReason {
    /// Every reason, in declaration order
    pub const ALL: [ErrorReason; 5] = [
        ErrorReason::DidNotFoundIfStatementToAddBraces,
        ErrorReason::DidNotFoundIfElseToConvert,
        ErrorReason::DidNotFoundExtractedCode,
        ErrorReason::DidNotFoundTypeToExtract,
        ErrorReason::DidNotFoundTernaryToFlip,
    ];

    pub fn message(&self) -> &'static str {
        match self {
            ErrorReason::DidNotFoundIfStatementToAddBraces => {
                "I didn't find an if statement to add braces to from current selection"
            }
            ErrorReason::DidNotFoundIfElseToConvert => {
                "I didn't find a valid if/else to convert from current selection"
            }
            ErrorReason::DidNotFoundExtractedCode => {
                "I didn't find a valid code to extract from current selection"
            }
            ErrorReason::DidNotFoundTypeToExtract => {
                "I didn't find a type to extract from current selection"
            }
            ErrorReason::DidNotFoundTernaryToFlip => {
                "I didn't find a ternary to flip from current selection"
            }
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
