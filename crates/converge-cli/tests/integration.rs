//! Integration tests for CLI commands.

use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> String {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().to_string()
}

fn run_cli(args: &[&str]) -> (Option<i32>, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_converge"))
        .args(args)
        .output()
        .expect("failed to run converge");

    (
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn run_cli_with_stdin(args: &[&str], stdin: &str) -> (Option<i32>, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_converge"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn converge");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.code(),
        String::from_utf8_lossy(&output.stdout).to_string(),
    )
}

const CONFIG_MAP: &str = r#"{"kind": "ConfigMap", "metadata": {"name": "n"}, "data": {"k": "v"}}"#;

#[test]
fn test_hash_command() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cm.json", CONFIG_MAP);

    let (code, stdout, _) = run_cli(&["hash", &path]);

    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), "c55cmkg5g6");
}

#[test]
fn test_hash_command_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cm.json", CONFIG_MAP);

    let (code, stdout, _) = run_cli(&["hash", &path, "--json"]);

    assert_eq!(code, Some(0));
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(
        value,
        json!({"kind": "ConfigMap", "name": "n", "fingerprint": "c55cmkg5g6"})
    );
}

#[test]
fn test_hash_command_reads_yaml_from_stdin() {
    let manifest = "kind: ConfigMap\nmetadata:\n  name: n\ndata:\n  k: v\n";
    let (code, stdout) = run_cli_with_stdin(&["hash"], manifest);

    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), "c55cmkg5g6");
}

#[test]
fn test_hash_command_rejects_unsupported_kind() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "pod.json", r#"{"kind": "Pod", "metadata": {"name": "web"}}"#);

    let (code, _, stderr) = run_cli(&["hash", &path]);

    assert_eq!(code, Some(1));
    assert!(stderr.contains("Pod web: hashing is not implemented for kind Pod"));
}

#[test]
fn test_name_command() {
    let dir = TempDir::new().unwrap();
    let config_map = write_file(&dir, "cm.json", CONFIG_MAP);
    let service = write_file(
        &dir,
        "svc.json",
        r#"{"kind": "Service", "metadata": {"name": "web"}}"#,
    );

    let (_, stdout, _) = run_cli(&["name", &config_map]);
    assert_eq!(stdout.trim(), "n-c55cmkg5g6");

    let (_, stdout, _) = run_cli(&["name", &service]);
    assert_eq!(stdout.trim(), "web");
}

#[test]
fn test_diff_command_reports_changes() {
    let dir = TempDir::new().unwrap();
    let before = write_file(&dir, "before.json", r#"{"a": 1, "b": {"x": 1, "y": 2}}"#);
    let after = write_file(&dir, "after.json", r#"{"a": 1, "b": {"x": 1, "y": 3}}"#);

    let (code, stdout, _) = run_cli(&["diff", &before, &after]);

    assert_eq!(code, Some(0));
    assert!(stdout.contains("changed  b.y"));
    assert!(stdout.contains("\"before\""));

    let (code, _, _) = run_cli(&["diff", &before, &after, "--exit-code"]);
    assert_eq!(code, Some(2));
}

#[test]
fn test_diff_command_identical_documents() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cm.json", CONFIG_MAP);

    let (code, stdout, _) = run_cli(&["diff", &path, &path, "--exit-code"]);

    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), "no changes");
}

#[test]
fn test_diff_command_bookkeeping_tolerance() {
    let dir = TempDir::new().unwrap();
    let before = write_file(
        &dir,
        "before.json",
        r#"{"kind": "Pod", "metadata": {"name": "p", "resourceVersion": "1"}}"#,
    );
    let after = write_file(
        &dir,
        "after.json",
        r#"{"kind": "Pod", "metadata": {"name": "p", "resourceVersion": "2"}}"#,
    );

    let (code, stdout, _) = run_cli(&["diff", &before, &after, "--exit-code"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("no meaningful changes"));

    let (code, _, _) = run_cli(&["diff", &before, &after, "--exit-code", "--strict"]);
    assert_eq!(code, Some(2));
}

#[test]
fn test_canonicalize_command() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "doc.json", r#"{"b": {"z": 1, "y": "é"}, "a": [{"d": 1, "c": 2}]}"#);

    let (code, stdout, _) = run_cli(&["canonicalize", &path]);

    assert_eq!(code, Some(0));
    assert_eq!(stdout.trim(), r#"{"a":[{"d":1,"c":2}],"b":{"y":"\u00e9","z":1}}"#);
}

#[test]
fn test_non_mapping_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "list.json", "[1, 2]");

    let (code, _, stderr) = run_cli(&["canonicalize", &path]);

    assert_eq!(code, Some(1));
    assert!(stderr.contains("expected a mapping"));
}
