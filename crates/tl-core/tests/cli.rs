//! End-to-end tests for the `tabulog` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `tabulog` with config discovery pointed at an empty scratch dir.
fn tabulog(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tabulog").unwrap();
    cmd.env("TABULOG_CONFIG", "")
        .env("XDG_CONFIG_HOME", home)
        .env("TABULOG_LOG", "error");
    cmd
}

#[test]
fn test_record_json_lines() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("progress.csv");

    tabulog(tmp.path())
        .args(["record", "--csv"])
        .arg(&csv_path)
        .write_stdin("{\"foo\": 1}\n\n{\"bar\": 10, \"nested\": {\"x\": 0.5}}\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "bar,foo,nested/x\n,1,\n10,,0.5\n"
    );
}

#[test]
fn test_record_with_text_output() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("progress.csv");
    let text_path = tmp.path().join("debug.log");

    tabulog(tmp.path())
        .args(["record", "--no-timestamp", "--csv"])
        .arg(&csv_path)
        .arg("--text")
        .arg(&text_path)
        .write_stdin("{\"loss\": 0.25}\n")
        .assert()
        .success();

    let text = fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("loss  0.25"));
}

#[test]
fn test_record_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("out/progress.csv");
    let config_path = tmp.path().join("config.json");
    let config = serde_json::json!({
        "outputs": [{"type": "csv", "path": csv_path}]
    });
    fs::write(&config_path, config.to_string()).unwrap();

    tabulog(tmp.path())
        .args(["record", "--config"])
        .arg(&config_path)
        .write_stdin("{\"a\": 1, \"b\": \"x,y\"}\n")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&csv_path).unwrap(), "a,b\n1,\"x,y\"\n");
}

#[test]
fn test_no_outputs_is_config_error() {
    let tmp = TempDir::new().unwrap();
    tabulog(tmp.path())
        .arg("record")
        .write_stdin("{\"a\": 1}\n")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("no outputs"));
}

#[test]
fn test_non_object_line_is_input_error() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("progress.csv");
    tabulog(tmp.path())
        .args(["record", "--csv"])
        .arg(&csv_path)
        .write_stdin("{\"a\": 1}\n[1, 2]\n")
        .assert()
        .code(14)
        .stderr(predicate::str::contains("line 2"));

    assert_eq!(fs::read_to_string(&csv_path).unwrap(), "a\n1\n");
}

#[test]
fn test_header_subcommand() {
    let tmp = TempDir::new().unwrap();
    let csv_path = tmp.path().join("t.csv");
    fs::write(&csv_path, "bar,foo\n1,2\n").unwrap();

    tabulog(tmp.path())
        .arg("header")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout("bar\nfoo\n");
}

#[test]
fn test_header_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    tabulog(tmp.path())
        .arg("header")
        .arg(tmp.path().join("missing.csv"))
        .assert()
        .code(13);
}
