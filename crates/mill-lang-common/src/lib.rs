//! Common utilities and helpers for language plugin implementations
//!
//! This crate provides the language-agnostic half of the refactoring engine:
//! everything that works on text and positions rather than on a syntax tree.
//!
//! # Modules
//!
//! - [`location`] - Byte offset and line/column conversions
//! - [`edits`] - Span-based text edits that carry a selection along
//! - [`refactoring`] - Indentation helpers for generated code
//! - [`editor`] - The editor port and its in-memory adapter

pub mod edits;
pub mod editor;
pub mod location;
pub mod refactoring;

pub use edits::{TextEdit, TextEdits};
pub use editor::{apply_patches, Editor, InMemoryEditor};
pub use location::LineIndex;
pub use refactoring::{reindent, IndentationDetector};
