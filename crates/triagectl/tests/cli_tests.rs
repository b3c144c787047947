//! CLI integration tests for triagectl
//!
//! Drive the built binary and check stdout, stderr and exit codes:
//! - triagectl LOG            text report for a file
//! - triagectl --sample       embedded sample log
//! - triagectl - < LOG        stdin
//! - missing input / bad config exit codes

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn triagectl() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_triagectl"));
    cmd.env_remove("TRIAGE_LOG").env("NO_COLOR", "1");
    cmd
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    triagectl()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run triagectl")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_single_error_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("compile_errors.log"),
        "[ERROR] Foo.java:[10,5] incompatible types: UUID cannot be converted to java.lang.String\n",
    )
    .unwrap();

    // no LOG argument: compile_errors.log in the working directory
    let output = run_in(dir.path(), &[]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Total errors found: 1"));
    assert!(text.contains("UUID_to_String: 1 error"));
    assert!(text.contains("    Line 10: incompatible types"));
    assert!(text.contains("MOST AFFECTED FILES:"));
}

#[test]
fn test_empty_log_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.log"), "").unwrap();

    let output = run_in(dir.path(), &["empty.log"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Total errors found: 0"));
    assert!(!text.contains("Line "));
}

#[test]
fn test_missing_log_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_in(dir.path(), &["nowhere.log"]);
    assert_eq!(output.status.code(), Some(66));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[ERROR]"));
    assert!(stderr.contains("nowhere.log"));
}

#[test]
fn test_sample_detailed() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["--sample", "--preset", "detailed"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Total errors found: 32"));
    assert!(text.contains("List_type_conversion: 2 errors"));
    assert!(text.contains("OptimizedPickingPathServiceImpl.java: 14 errors"));
    assert_eq!(text.matches("    Line ").count(), 32);
}

#[test]
fn test_stdin_source() {
    let mut child = triagectl()
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"[ERROR] /p/A.java:[3,1] A is not abstract and does not override abstract method run()\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Abstract_method: 1 error"));
}

#[test]
fn test_config_file_rules_and_notes() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("triage.toml"),
        r#"
[report]
notes = ["Regenerate the DTO mappers"]

[[rules]]
category = "Other_type_conversion"
contains = ["incompatible types"]
"#,
    )
    .unwrap();

    let output = run_in(dir.path(), &["--sample", "--config", "triage.toml"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Other_type_conversion: 29 errors"));
    assert!(text.contains("CRITICAL PATTERNS TO FIX:"));
    assert!(text.contains("1. Regenerate the DTO mappers"));
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[[rules]]\ncategory = \"Nope\"\ncontains = [\"x\"]\n").unwrap();

    let output = run_in(dir.path(), &["--sample", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(78));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_in(dir.path(), &["--sample", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 32);
    assert_eq!(value["most_affected"][0]["file_name"], "OptimizedPickingPathServiceImpl.java");
    assert_eq!(value["most_affected"][0]["count"], 14);
}

#[test]
fn test_json_failure_is_reported_as_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[report]\nmessage_width = 0\n").unwrap();

    let output = run_in(dir.path(), &["--sample", "--json", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(78));
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"], "config");
    assert!(value["message"].as_str().unwrap().contains("message_width"));

    let output = run_in(dir.path(), &["missing.log", "--json"]);
    assert_eq!(output.status.code(), Some(66));
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(value["error"], "input_unavailable");
}
