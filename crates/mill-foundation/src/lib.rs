//! Foundation Layer - Core types and protocol definitions
//!
//! This crate provides the foundational building blocks shared by every
//! mill refactoring crate:
//! - Selections and positions in source text ([`protocol::selection`])
//! - The patch protocol and editor side-commands ([`protocol::patch`])
//! - User-facing failure reasons ([`protocol::reason`])
//! - Error handling ([`errors`])
//!
//! It has no dependencies on other mill crates to prevent circular dependencies.

pub mod errors;
pub mod protocol;

// Re-export commonly used types for convenience
pub use errors::{MillError, MillResult};
pub use protocol::{
    Code, CommandResult, EditorCommand, ErrorReason, Patch, Position, Selection,
};
