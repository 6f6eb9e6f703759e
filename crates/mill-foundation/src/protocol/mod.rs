//! Protocol types exchanged between refactorings, the orchestrator and editors

pub mod patch;
pub mod reason;
pub mod selection;

pub use patch::{Code, CommandResult, EditorCommand, Patch};
pub use reason::ErrorReason;
pub use selection::{Position, Selection};
