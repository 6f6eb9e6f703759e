//! Integration tests for the `mill` binary

use assert_cmd::Command;
use mill_test_support::write_fixture;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `mill` running inside `dir`, so no config file from the repository is picked up
fn mill_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mill").expect("mill binary should be built for tests");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_shows_every_refactoring() {
    let dir = TempDir::new().unwrap();

    mill_in(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("addBracesToIfStatement"))
        .stdout(predicate::str::contains("Convert If/Else to Switch"))
        .stdout(predicate::str::contains("extractVariable"))
        .stdout(predicate::str::contains("extractGenericType"))
        .stdout(predicate::str::contains("flipTernary"));
}

#[test]
fn test_refactor_prints_new_code() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "guard.ts", "if (!isValid) return;");

    mill_in(&dir)
        .args(["refactor", "addBracesToIfStatement"])
        .arg(&file)
        .args(["--line", "0", "--column", "0"])
        .assert()
        .success()
        .stdout("if (!isValid) {\n  return;\n}");

    assert_eq!(fs::read_to_string(&file).unwrap(), "if (!isValid) return;");
}

#[test]
fn test_refactor_write_updates_the_file() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(
        dir.path(),
        "src/hello.ts",
        "import logger from \"./logger\";\n\nlogger(\"Hello!\");",
    );

    mill_in(&dir)
        .args(["refactor", "extractVariable"])
        .arg(&file)
        .args(["--line", "2", "--column", "7", "--end-line", "2", "--end-column", "15"])
        .arg("--write")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "import logger from \"./logger\";\n\nconst extracted = \"Hello!\";\nlogger(extracted);"
    );
}

#[test]
fn test_not_applicable_fails_and_keeps_the_file() {
    let dir = TempDir::new().unwrap();
    let code = "// This is a comment, can't be refactored";
    let file = write_fixture(dir.path(), "comment.ts", code);

    mill_in(&dir)
        .args(["refactor", "flipTernary"])
        .arg(&file)
        .args(["--line", "0", "--column", "0", "--write"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "I didn't find a ternary to flip from current selection",
        ));

    assert_eq!(fs::read_to_string(&file).unwrap(), code);
}

#[test]
fn test_json_output_reports_outcome() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "ternary.ts", "const a = ok ? 1 : 2;");

    let output = mill_in(&dir)
        .args(["refactor", "flipTernary"])
        .arg(&file)
        .args(["--line", "0", "--column", "10", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outcome"]["status"], "applied");
    assert_eq!(json["refactoring"], "flipTernary");
    assert_eq!(json["code"], "const a = !ok ? 2 : 1;");
}

#[test]
fn test_actions_at_a_selection() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "label.ts", "const a = isValid ? \"yes\" : \"no\";");

    mill_in(&dir)
        .arg("actions")
        .arg(&file)
        .args(["--line", "0", "--column", "21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extractVariable"))
        .stdout(predicate::str::contains("flipTernary"))
        .stdout(predicate::str::contains("addBracesToIfStatement").not());
}

#[test]
fn test_unknown_refactoring_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "a.ts", "a();");

    mill_in(&dir)
        .args(["refactor", "inlineEverything"])
        .arg(&file)
        .args(["--line", "0", "--column", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown refactoring 'inlineEverything'"));
}

#[test]
fn test_parse_error_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "broken.ts", "const a = ;");

    mill_in(&dir)
        .args(["refactor", "flipTernary"])
        .arg(&file)
        .args(["--line", "0", "--column", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn test_parse_error_in_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_fixture(dir.path(), "broken.ts", "const a = ;");

    let output = mill_in(&dir)
        .args(["refactor", "flipTernary"])
        .arg(&file)
        .args(["--line", "0", "--column", "0", "--format", "json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"]["category"], "parse");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Parse error"));
}

#[test]
fn test_config_file_sets_variable_name() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        dir.path(),
        "mill.toml",
        "[refactoring]\nextractedVariableName = \"greeting\"\n",
    );
    let file = write_fixture(dir.path(), "hello.ts", "logger(\"Hello!\");");

    mill_in(&dir)
        .args(["refactor", "extractVariable"])
        .arg(&file)
        .args(["--line", "0", "--column", "8"])
        .assert()
        .success()
        .stdout("const greeting = \"Hello!\";\nlogger(greeting);");
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    mill_in(&dir)
        .args(["--config", "nowhere.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
