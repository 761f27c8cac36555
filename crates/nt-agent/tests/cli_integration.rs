//! CLI integration tests
//!
//! Tests the nt-agent binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn nt_agent() -> Command {
    let mut cmd = Command::cargo_bin("nt-agent")
        .expect("Failed to locate nt-agent binary - ensure it's built before running tests");
    cmd.env_remove("NODE_NAME")
        .env_remove("NT_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    nt_agent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nt-agent"))
        .stdout(predicate::str::contains("--node"));
}

#[test]
fn test_cli_version() {
    nt_agent()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nt-agent"));
}

#[test]
fn test_missing_node_name_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    nt_agent()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NODE_NAME is not set"));
}

#[test]
fn test_empty_node_name_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    nt_agent()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .env("NODE_NAME", "")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1);
}

#[test]
fn test_invalid_endpoint_exits_with_1() {
    let dir = tempfile::tempdir().unwrap();
    nt_agent()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["--node", "test-node", "--endpoint", "http://example.com/ws"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_once_against_unreachable_endpoint_fails() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    nt_agent()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .args(["--node", "test-node", "--once"])
        .arg("--endpoint")
        .arg(format!("ws://127.0.0.1:{}/ws", port))
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session failed"));
}
