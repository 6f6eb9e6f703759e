//! Test support utilities and fixtures for mill refactoring tests

pub mod helpers;
pub mod mocks;

// Re-export commonly used helpers
pub use helpers::{code_with_selection, editor_for, write_fixture};
pub use mocks::{mock_editor, mock_editor_expecting_error, MockEditor};
