//! End-to-end runs of the demo binary.

use std::process::{Command, Output};

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argtree-demo"))
        .args(args)
        .output()
        .expect("failed to run argtree-demo")
}

#[test]
fn test_show_prints_the_decoded_request_as_json() {
    let output = demo(&["connection", "show", "--active", "id123", "id456"]);
    assert!(output.status.success());

    let body: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(body["active_only"], true);
    assert_eq!(body["ids"][0], "id123");
    assert_eq!(body["ids"][1], "id456");
}

#[test]
fn test_up_binds_keyword_clauses() {
    let output = demo(&["connection", "up", "id", "home", "ifname", "eth0"]);
    assert!(output.status.success());

    let body: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(body["selector"], "id");
    assert_eq!(body["id"], "home");
    assert_eq!(body["interface"], "eth0");
    assert_eq!(body["bssid"], serde_json::Value::Null);
}

#[test]
fn test_unknown_argument_reports_the_token() {
    let output = demo(&["connection", "show", "--bogus"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--bogus"));
}

#[test]
fn test_missing_chain_positional_fails_validation() {
    let output = demo(&["connection", "up", "id"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("connection.up.id"));
}

#[test]
fn test_help_short_circuits_with_usage_text() {
    let output = demo(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("usage: argtree-demo"));
}
