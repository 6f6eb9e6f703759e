//! Mock implementations for testing

use async_trait::async_trait;
use mill_foundation::{
    Code, CommandResult, EditorCommand, ErrorReason, MillResult, Patch, Selection,
};
use mill_lang_common::Editor;
use mockall::mock;

mock! {
    pub Editor {}

    #[async_trait]
    impl Editor for Editor {
        async fn code(&self) -> Code;
        async fn selection(&self) -> Selection;
        async fn write(&mut self, code: Code, selection: Option<Selection>) -> MillResult<()>;
        async fn apply(&mut self, patches: Vec<Patch>) -> MillResult<()>;
        async fn delegate(&mut self, command: EditorCommand) -> CommandResult;
        async fn show_error(&mut self, reason: ErrorReason);
    }
}

/// Create a mock editor for testing
pub fn mock_editor() -> MockEditor {
    MockEditor::new()
}

/// Mock editor that fails the test on any document change
///
/// Only `show_error` is allowed, exactly once with `reason`.
pub fn mock_editor_expecting_error(reason: ErrorReason) -> MockEditor {
    let mut editor = MockEditor::new();
    editor
        .expect_show_error()
        .withf(move |shown| *shown == reason)
        .times(1)
        .return_const(());
    editor.expect_write().never();
    editor.expect_apply().never();
    editor.expect_delegate().never();
    editor
}
