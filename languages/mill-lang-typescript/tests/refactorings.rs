//! End-to-end runs of every refactoring through an in-memory editor

use mill_foundation::{EditorCommand, ErrorReason, Selection};
use mill_lang_common::InMemoryEditor;
use mill_lang_typescript::{run, Outcome, Refactoring, RefactoringOptions, SourceFile, ParseOptions};
use mill_test_support::editor_for;
use pretty_assertions::assert_eq;

async fn refactor(refactoring: Refactoring, editor: &mut InMemoryEditor) -> Outcome {
    run(refactoring, editor, &RefactoringOptions::default())
        .await
        .expect("refactoring faulted")
}

#[tokio::test]
async fn test_add_braces_at_if_keyword() {
    let mut editor = editor_for("[start]if (!isValid) return;");

    let outcome = refactor(Refactoring::AddBracesToIfStatement, &mut editor).await;

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(editor.current_code(), "if (!isValid) {\n  return;\n}");
}

#[tokio::test]
async fn test_add_braces_uses_tabs_when_the_file_does() {
    let mut editor =
        editor_for("function f() {\n\tif (ready)\n\t\t[start]go();\n}");

    refactor(Refactoring::AddBracesToIfStatement, &mut editor).await;

    assert_eq!(
        editor.current_code(),
        "function f() {\n\tif (ready) {\n\t\tgo();\n\t}\n}"
    );
}

#[tokio::test]
async fn test_if_else_chain_becomes_switch() {
    let mut editor = editor_for(
        "[start]if (name === \"Jane\") { a(); } else if (name === \"John\") { b(); } else { c(); }",
    );

    refactor(Refactoring::ConvertIfElseToSwitch, &mut editor).await;

    assert_eq!(
        editor.current_code(),
        "switch (name) {\ncase \"Jane\":\n  a();\n  break;\ncase \"John\":\n  b();\n  break;\ndefault:\n  c();\n  break;\n}"
    );
}

#[tokio::test]
async fn test_mismatched_discriminants_leave_code_unchanged() {
    let code = "if (name === \"Jane\") { a(); } else if (surname === \"John\") { b(); } else { c(); }";
    let mut editor = InMemoryEditor::new(code);

    let outcome = refactor(Refactoring::ConvertIfElseToSwitch, &mut editor).await;

    assert_eq!(
        outcome,
        Outcome::NotApplicable(ErrorReason::DidNotFoundIfElseToConvert)
    );
    assert_eq!(editor.current_code(), code);
    assert_eq!(editor.errors(), &[ErrorReason::DidNotFoundIfElseToConvert]);
    assert!(editor.delegated().is_empty());
}

#[tokio::test]
async fn test_extract_variable_inside_function_body() {
    let mut editor = editor_for(
        "import logger from \"./logger\";\n\nfunction sayHello() {\n  logger([start]\"Hello!\"[end]);\n}",
    );

    refactor(Refactoring::ExtractVariable, &mut editor).await;

    assert_eq!(
        editor.current_code(),
        "import logger from \"./logger\";\n\nfunction sayHello() {\n  const extracted = \"Hello!\";\n  logger(extracted);\n}"
    );
    assert_eq!(editor.current_selection(), Selection::new([4, 9], [4, 18]));
    assert_eq!(editor.delegated(), &[EditorCommand::RenameSymbol]);
}

#[tokio::test]
async fn test_extract_variable_without_delegation_still_applies() {
    let mut editor = editor_for("logger([start]\"Hello!\");").without_delegation();

    let outcome = refactor(Refactoring::ExtractVariable, &mut editor).await;

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        editor.current_code(),
        "const extracted = \"Hello!\";\nlogger(extracted);"
    );
}

#[tokio::test]
async fn test_extract_generic_type_changes_only_the_selected_property() {
    let mut editor = editor_for("interface Position {\n  x: n[start]umber;\n  y: number;\n}");

    refactor(Refactoring::ExtractGenericType, &mut editor).await;

    assert_eq!(
        editor.current_code(),
        "interface Position<T = number> {\n  x: T;\n  y: number;\n}"
    );
}

#[tokio::test]
async fn test_flip_ternary_in_return() {
    let mut editor = editor_for("function label(ok) {\n  return [start]ok ? \"yes\" : \"no\";\n}");

    refactor(Refactoring::FlipTernary, &mut editor).await;

    assert_eq!(
        editor.current_code(),
        "function label(ok) {\n  return !ok ? \"no\" : \"yes\";\n}"
    );
}

#[tokio::test]
async fn test_every_refactoring_reports_on_comment_only_code() {
    for refactoring in Refactoring::ALL {
        let code = "// This is a comment, can't be refactored";
        let mut editor = InMemoryEditor::new(code);

        let outcome = refactor(refactoring, &mut editor).await;

        assert_eq!(outcome, Outcome::NotApplicable(refactoring.error_reason()));
        assert_eq!(editor.current_code(), code);
        assert_eq!(editor.errors(), &[refactoring.error_reason()]);
    }
}

#[test]
fn test_print_is_idempotent_on_refactored_output() {
    let code = "switch (name) {\ncase \"Jane\":\n  return a();\ndefault:\n  return b();\n}";
    let options = ParseOptions::default();
    let once = SourceFile::parse(code, &options).unwrap().print().unwrap();
    let twice = SourceFile::parse(&once, &options).unwrap().print().unwrap();
    assert_eq!(once, twice);
}
