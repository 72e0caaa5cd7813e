//! CLI Integration Tests
//!
//! Runs the json2xlsx binary with assert_cmd to exercise main.rs.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use calamine::{open_workbook, Data, Reader, Xlsx};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("json2xlsx"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("json2xlsx"));
}

#[test]
fn test_create_help() {
    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.args(["create", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create an .xlsx file"));
}

#[test]
fn test_missing_subcommand_fails() {
    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// CREATE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_create_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("in.json");
    let output_path = temp_dir.path().join("out.xlsx");
    fs::write(
        &input_path,
        r#"{"worksheets":[{"sheet":"S1","cells":[{"cell":"A1","value":"hi"}]}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("create")
        .arg(&input_path)
        .arg(&output_path)
        .env_remove("JSON2XLSX_OUTPUT")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbook created"));

    let mut workbook: Xlsx<_> = open_workbook(&output_path).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["S1".to_string()]);
    let range = workbook.worksheet_range("S1").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("hi".to_string()))
    );
}

#[test]
fn test_create_output_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("env.xlsx");

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.args(["create", "test-data/basic.json"])
        .env("JSON2XLSX_OUTPUT", &output_path)
        .assert()
        .success();

    assert!(output_path.exists());
}

#[test]
fn test_create_malformed_json_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("existing.xlsx");
    fs::write(&output_path, b"keep me").unwrap();

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("create")
        .arg("test-data/truncated.json")
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parse"));

    assert_eq!(fs::read(&output_path).unwrap(), b"keep me");
}

#[test]
fn test_create_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.xlsx");

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("create")
        .arg("nonexistent.json")
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("FileAccess"));
}

#[test]
fn test_create_invalid_style_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("bad_style.json");
    let output_path = temp_dir.path().join("out.xlsx");
    fs::write(
        &input_path,
        r#"{"worksheets":[{"sheet":"S1","cells":[{"cell":"A1","value":1,"style":{"num_fmt":99}}]}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("create")
        .arg(&input_path)
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Style"));

    assert!(!output_path.exists());
}

#[test]
fn test_create_bad_merge_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("bad_merge.json");
    let output_path = temp_dir.path().join("out.xlsx");
    fs::write(
        &input_path,
        r#"{"worksheets":[{"sheet":"S1","cells":[{"cell":"C3","value":"x","merge":"A1"}]}]}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("json2xlsx").unwrap();
    cmd.arg("create")
        .arg(&input_path)
        .arg(&output_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Merge"));
}
