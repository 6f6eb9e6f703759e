//! One refactoring invocation, from code and selection to an edited document
//!
//! The pipeline is single pass and all or nothing:
//!
//! `Idle -> Parsed -> Matched -> Transformed -> Validated -> Applied`, or
//! `Failed` at any gate. Nothing reaches the editor before every gate has
//! passed, so a failed run leaves the document byte for byte unchanged.
//!
//! Parsing and transforming happen in [`plan`], which is synchronous and
//! drops the parsed tree before the editor is awaited.

use crate::refactoring::{Failure, Refactoring, RefactoringOptions, Transformation};
use crate::tree::SourceFile;
use mill_config::logging::refactoring_span;
use mill_foundation::{CommandResult, ErrorReason, MillError, MillResult, Selection};
use mill_lang_common::{apply_patches, Editor};
use serde::Serialize;
use tracing::{debug, info, warn, Instrument};

/// How an invocation ended, when it did not fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum Outcome {
    Applied,
    NotApplicable(ErrorReason),
}

/// Parse, match and transform without touching any editor
///
/// The outer `Result` carries faults (unparsable input, a transformation that
/// produces unparsable code); the inner one the expected not-applicable case.
pub fn plan(
    refactoring: Refactoring,
    code: &str,
    selection: &Selection,
    options: &RefactoringOptions,
) -> MillResult<Result<Transformation, ErrorReason>> {
    let file = SourceFile::parse(code, &options.parse)?;
    let tree = file.tree();
    debug!(stage = "parsed", nodes = tree.len());

    if !refactoring.can_perform(&tree, selection) {
        debug!(stage = "failed", gate = "matched");
        return Ok(Err(refactoring.error_reason()));
    }
    debug!(stage = "matched");

    let transformation = match refactoring.transform(&tree, selection, options) {
        Ok(transformation) => transformation,
        Err(Failure::NotApplicable(reason)) => {
            debug!(stage = "failed", gate = "transformed");
            return Ok(Err(reason));
        }
        Err(Failure::Fault(error)) => return Err(error),
    };
    debug!(stage = "transformed");

    if options.validate_output {
        validate(code, selection, &transformation, options)?;
        debug!(stage = "validated");
    }

    Ok(Ok(transformation))
}

/// Re-parse the code a transformation would produce
fn validate(
    code: &str,
    selection: &Selection,
    transformation: &Transformation,
    options: &RefactoringOptions,
) -> MillResult<()> {
    let output = match transformation {
        Transformation::Document { code, .. } => code.clone(),
        Transformation::Patches { patches, .. } => apply_patches(code, selection, patches)?.0,
    };
    SourceFile::parse(&output, &options.parse)
        .map(|_| ())
        .map_err(|error| {
            MillError::internal("Refactoring produced code that does not parse")
                .with_context(error.to_string())
        })
}

/// Run `refactoring` over `code` and hand the result to `editor`
///
/// A not-applicable outcome is reported through [`Editor::show_error`] exactly
/// once and nothing else is sent to the editor.
pub async fn execute<E>(
    refactoring: Refactoring,
    code: &str,
    selection: &Selection,
    editor: &mut E,
    options: &RefactoringOptions,
) -> MillResult<Outcome>
where
    E: Editor + ?Sized,
{
    let start = selection.start();
    let span = refactoring_span(refactoring.key(), start.line, start.column);
    apply_to_editor(refactoring, code, selection, editor, options)
        .instrument(span)
        .await
}

async fn apply_to_editor<E>(
    refactoring: Refactoring,
    code: &str,
    selection: &Selection,
    editor: &mut E,
    options: &RefactoringOptions,
) -> MillResult<Outcome>
where
    E: Editor + ?Sized,
{
    let transformation = match plan(refactoring, code, selection, options)? {
        Ok(transformation) => transformation,
        Err(reason) => {
            warn!(reason = %reason, "Refactoring not applicable");
            editor.show_error(reason).await;
            return Ok(Outcome::NotApplicable(reason));
        }
    };

    match transformation {
        Transformation::Document { code, selection } => {
            editor.write(code, Some(selection)).await?;
        }
        Transformation::Patches { patches, follow_up } => {
            editor.apply(patches).await?;
            if let Some(command) = follow_up {
                if editor.delegate(command).await == CommandResult::NotSupported {
                    debug!(command = command.key(), "Editor does not support command");
                }
            }
        }
    }

    info!("Refactoring applied");
    Ok(Outcome::Applied)
}

/// Run `refactoring` at the editor's current code and selection
pub async fn run<E>(
    refactoring: Refactoring,
    editor: &mut E,
    options: &RefactoringOptions,
) -> MillResult<Outcome>
where
    E: Editor + ?Sized,
{
    let code = editor.code().await;
    let selection = editor.selection().await;
    execute(refactoring, &code, &selection, editor, options).await
}

/// Refactorings that can be performed at `selection`, in registry order
pub fn available_actions(
    code: &str,
    selection: &Selection,
    options: &RefactoringOptions,
) -> MillResult<Vec<Refactoring>> {
    let file = SourceFile::parse(code, &options.parse)?;
    let tree = file.tree();
    Ok(Refactoring::ALL
        .into_iter()
        .filter(|refactoring| refactoring.can_perform(&tree, selection))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mill_foundation::EditorCommand;
    use mill_lang_common::InMemoryEditor;
    use mill_test_support::{mock_editor, mock_editor_expecting_error};
    use pretty_assertions::assert_eq;

    const CODE: &str = "import logger from \"./logger\";\n\nlogger(\"Hello!\");";

    #[tokio::test]
    async fn test_not_applicable_reports_once_and_touches_nothing() {
        let mut editor = mock_editor_expecting_error(ErrorReason::DidNotFoundIfStatementToAddBraces);

        let outcome = execute(
            Refactoring::AddBracesToIfStatement,
            "// This is a comment, can't be refactored",
            &Selection::cursor_at(0, 0),
            &mut editor,
            &RefactoringOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::NotApplicable(ErrorReason::DidNotFoundIfStatementToAddBraces)
        );
    }

    #[tokio::test]
    async fn test_extract_variable_applies_patches_then_delegates_rename() {
        let mut editor = mock_editor();
        editor
            .expect_apply()
            .withf(|patches| patches.len() == 2)
            .times(1)
            .returning(|_| Ok(()));
        editor
            .expect_delegate()
            .withf(|command| *command == EditorCommand::RenameSymbol)
            .times(1)
            .return_const(CommandResult::NotSupported);

        let outcome = execute(
            Refactoring::ExtractVariable,
            CODE,
            &Selection::new([2, 7], [2, 15]),
            &mut editor,
            &RefactoringOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::Applied);
    }

    #[tokio::test]
    async fn test_extract_variable_in_memory_leaves_selection_on_the_name() {
        let mut editor =
            InMemoryEditor::new(CODE).with_selection(Selection::new([2, 7], [2, 15]));

        let outcome = run(Refactoring::ExtractVariable, &mut editor, &RefactoringOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(
            editor.current_code(),
            "import logger from \"./logger\";\n\nconst extracted = \"Hello!\";\nlogger(extracted);"
        );
        assert_eq!(editor.current_selection(), Selection::new([3, 7], [3, 16]));
        assert_eq!(editor.delegated(), &[EditorCommand::RenameSymbol]);
    }

    #[tokio::test]
    async fn test_cursor_and_range_extract_the_same_code() {
        let options = RefactoringOptions::default();
        let mut from_cursor = InMemoryEditor::new(CODE).with_selection(Selection::cursor_at(2, 9));
        let mut from_range =
            InMemoryEditor::new(CODE).with_selection(Selection::new([2, 7], [2, 15]));

        run(Refactoring::ExtractVariable, &mut from_cursor, &options).await.unwrap();
        run(Refactoring::ExtractVariable, &mut from_range, &options).await.unwrap();

        assert_eq!(from_cursor.current_code(), from_range.current_code());
    }

    #[tokio::test]
    async fn test_parse_error_is_a_fault_and_editor_is_untouched() {
        // No expectations: any editor call fails the test
        let mut editor = mock_editor();

        let err = execute(
            Refactoring::FlipTernary,
            "const a = ;",
            &Selection::cursor_at(0, 0),
            &mut editor,
            &RefactoringOptions::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.category(), "parse");
    }

    #[tokio::test]
    async fn test_document_results_are_written_with_their_selection() {
        let mut editor = InMemoryEditor::new("if (!isValid) return;")
            .with_selection(Selection::cursor_at(0, 14));

        run(
            Refactoring::AddBracesToIfStatement,
            &mut editor,
            &RefactoringOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(editor.current_code(), "if (!isValid) {\n  return;\n}");
        assert_eq!(editor.current_selection(), Selection::cursor_at(1, 2));
        assert!(editor.delegated().is_empty());
    }

    #[tokio::test]
    async fn test_configured_name_is_used() {
        let options = RefactoringOptions {
            extracted_variable_name: "greeting".to_string(),
            ..RefactoringOptions::default()
        };
        let mut editor =
            InMemoryEditor::new(CODE).with_selection(Selection::new([2, 7], [2, 15]));

        run(Refactoring::ExtractVariable, &mut editor, &options).await.unwrap();

        assert!(editor.current_code().ends_with("const greeting = \"Hello!\";\nlogger(greeting);"));
    }

    #[test]
    fn test_plan_reports_reason_without_editor() {
        let result = plan(
            Refactoring::ConvertIfElseToSwitch,
            "if (name === \"Jane\") {\n  a();\n} else if (surname === \"John\") {\n  b();\n}",
            &Selection::cursor_at(0, 0),
            &RefactoringOptions::default(),
        )
        .unwrap();

        assert_eq!(result, Err(ErrorReason::DidNotFoundIfElseToConvert));
    }

    #[test]
    fn test_available_actions_follow_the_selection() {
        let code = "const a = isValid ? \"yes\" : \"no\";";
        let options = RefactoringOptions::default();

        let on_string = available_actions(code, &Selection::cursor_at(0, 21), &options).unwrap();
        assert_eq!(
            on_string,
            vec![Refactoring::ExtractVariable, Refactoring::FlipTernary]
        );

        let on_keyword = available_actions(code, &Selection::cursor_at(0, 1), &options).unwrap();
        assert!(on_keyword.is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_reason() {
        let json = serde_json::to_value(Outcome::NotApplicable(ErrorReason::DidNotFoundTernaryToFlip))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "notApplicable", "reason": "didNotFoundTernaryToFlip"})
        );
        assert_eq!(
            serde_json::to_value(Outcome::Applied).unwrap(),
            serde_json::json!({"status": "applied"})
        );
    }
}
