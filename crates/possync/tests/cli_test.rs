//! Integration tests for the `possync` CLI binary.
//!
//! Argument parsing, config management, and the `sync` command end to end
//! against a wiremock StoreHub. Nothing here touches the real network or
//! the user's configuration.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `possync` binary with env isolation.
///
/// Clears all `POSSYNC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn possync_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("possync");
    cmd.env("HOME", "/tmp/possync-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/possync-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("POSSYNC_CONFIG")
        .env_remove("POSSYNC_USERNAME")
        .env_remove("POSSYNC_PASSWORD")
        .env_remove("POSSYNC_API__BASE_URL")
        .env_remove("POSSYNC_API__TIMEOUT")
        .env_remove("POSSYNC_SERVER__BIND")
        .env_remove("POSSYNC_SERVER__CORS_ALLOW_ORIGIN")
        .env_remove("POSSYNC_CREDENTIALS__USERNAME")
        .env_remove("POSSYNC_CREDENTIALS__PASSWORD");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = possync_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_subcommands() {
    possync_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("StoreHub")
            .and(predicate::str::contains("sync"))
            .and(predicate::str::contains("serve"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    possync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("possync"));
}

#[test]
fn test_completions_bash() {
    possync_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    possync_cmd()
        .args(["--config", "/tmp/elsewhere/possync.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere/possync.toml"));
}

#[test]
fn test_config_init_then_show_masks_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("possync.toml");
    let path_str = path.to_str().unwrap();

    possync_cmd()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    // Second init without --force refuses to clobber.
    possync_cmd()
        .args(["--config", path_str, "config", "init"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("already exists"));

    std::fs::write(
        &path,
        "[credentials]\nusername = \"cashier\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    possync_cmd()
        .args(["--config", path_str, "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("cashier")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("hunter2").not())
                .and(predicate::str::contains("api.storehubhq.com")),
        );
}

#[test]
fn test_invalid_base_url_is_config_error() {
    possync_cmd()
        .args(["--base-url", "not a url", "sync"])
        .env("POSSYNC_USERNAME", "u")
        .env("POSSYNC_PASSWORD", "p")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("api.base_url"));
}

// ── Sync ────────────────────────────────────────────────────────────

#[test]
fn test_sync_without_credentials_exits_3() {
    let output = possync_cmd()
        .args(["--base-url", "http://127.0.0.1:9", "sync", "--compact"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let body = stdout_json(&output);
    assert_eq!(body["error"], "Missing StoreHub credentials");
    assert!(body.get("success").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_prints_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("from", "2024-03-01"))
        .and(query_param("to", "2024-03-01"))
        .and(header("authorization", "Basic dTpw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut cmd = possync_cmd();
    cmd.args(["--base-url", &server.uri(), "sync", "--date", "2024-03-01"])
        .env("POSSYNC_USERNAME", "u")
        .env("POSSYNC_PASSWORD", "p");
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output),
        json!({
            "success": true,
            "transactions": [{ "id": 1 }],
            "customers": [],
            "products": [],
            "date": "2024-03-01",
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sync_rejection_writes_failure_to_output_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");

    let mut cmd = possync_cmd();
    cmd.args([
        "--base-url",
        &server.uri(),
        "sync",
        "--username",
        "u",
        "--date",
        "2024-03-01",
        "--output",
        out.to_str().unwrap(),
    ])
    .env("POSSYNC_PASSWORD", "wrong");
    let output = tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());

    let body: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        body,
        json!({
            "error": "Failed to fetch transactions from StoreHub",
            "details": "Unauthorized",
            "status": 401,
        })
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("wrong"));
}
