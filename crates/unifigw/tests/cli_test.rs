//! Integration tests for the `unifigw` CLI binary.
//!
//! Argument handling runs without a controller; the profile-bound commands
//! run against a wiremock controller with config isolated in a temp dir.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `unifigw` binary with env isolation.
///
/// Clears `UNIFIGW_*` env vars and points config directories at `home`,
/// so tests never touch the user's real configuration.
fn unifigw_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("unifigw");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("UNIFIGW_PROFILE")
        .env_remove("UNIFIGW_OUTPUT")
        .env_remove("UNIFIGW_TIMEOUT")
        .env_remove("UNIFIGW_PASSWORD");
    cmd
}

fn write_config(home: &Path, body: &str) -> std::path::PathBuf {
    let dir = home.join("unifigw");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("config.toml");
    std::fs::write(&file, body).unwrap();
    file
}

fn profile_config(server: &MockServer, conditions: &str) -> String {
    format!(
        r#"
default_profile = "lab"

[profiles.lab]
host = "http://127.0.0.1"
port = {port}
username = "admin"
version = "v5"
monitored_conditions = {conditions}
"#,
        port = server.address().port(),
    )
}

fn envelope(data: Value) -> Value {
    json!({ "meta": { "rc": "ok" }, "data": data })
}

async fn mock_controller() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "admin", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "subsystem": "wan", "status": "ok", "num_user": 3 }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/s/default/list/alarm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "archived": false, "id": 1 },
            { "archived": true, "id": 2 },
            { "archived": false, "id": 3 }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/s/default/stat/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "name": "AP1", "upgradable": "4.1" },
            { "name": "AP2", "upgradable": false }
        ]))))
        .mount(&server)
        .await;

    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = unifigw_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = String::from_utf8_lossy(&output.stderr);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("check")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("watch"))
            .and(predicate::str::contains("options")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unifigw"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format_is_usage_error() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .args(["--output", "xml", "conditions"])
        .assert()
        .code(2);
}

#[test]
fn test_options_set_rejects_non_boolean() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .args(["options", "set", "sensor=maybe"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("boolean"));
}

// ── Static table ────────────────────────────────────────────────────

#[test]
fn test_conditions_plain() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .args(["conditions", "-o", "plain"])
        .assert()
        .success()
        .stdout("vpn\nwww\nwan\nlan\nwlan\nalerts\nfirmware\n");
}

#[test]
fn test_conditions_json_carries_icons() {
    let home = TempDir::new().unwrap();
    let output = unifigw_cmd(home.path())
        .args(["conditions", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["icon"], "mdi:folder-key-network");
    assert_eq!(rows[6]["label"], "Firmware Upgradable");
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_status_without_config() {
    let home = TempDir::new().unwrap();
    unifigw_cmd(home.path())
        .arg("status")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No gateway profiles"));
}

#[test]
fn test_unknown_profile_lists_available() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "[profiles.home]\nhost = \"10.0.0.1\"\nusername = \"admin\"\n",
    );
    unifigw_cmd(home.path())
        .args(["--profile", "lab", "check"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("home"));
}

#[test]
fn test_unknown_condition_is_validation_error() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        "default_profile = \"home\"\n\n[profiles.home]\nusername = \"admin\"\n\
         monitored_conditions = [\"wan\", \"dhcp\"]\n",
    );
    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "pw")
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown_condition"));
}

// ── Against a mocked controller ─────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_check_succeeds() {
    let server = mock_controller().await;
    let home = TempDir::new().unwrap();
    write_config(home.path(), &profile_config(&server, r#"["wan"]"#));

    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "hunter2")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:      lab").and(predicate::str::contains("wan")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_wrong_password_is_auth_error() {
    let server = mock_controller().await;
    let home = TempDir::new().unwrap();
    write_config(home.path(), &profile_config(&server, r#"["wan"]"#));

    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "nope")
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_json() {
    let server = mock_controller().await;
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        &profile_config(&server, r#"["wan", "alerts", "firmware"]"#),
    );

    let output = unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "hunter2")
        .args(["status", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let sensors: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(sensors[0]["display_name"], "lab WAN");
    assert_eq!(sensors[0]["state"], "OK");
    assert_eq!(sensors[0]["attributes"]["num_user"], 3);
    assert_eq!(sensors[1]["display_name"], "lab Alerts");
    assert_eq!(sensors[1]["state"], 2);
    assert_eq!(sensors[1]["attributes"]["2"]["id"], 3);
    assert_eq!(sensors[2]["state"], 1);
    assert_eq!(sensors[2]["attributes"], json!({ "AP1": "4.1" }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_options_set_persists_and_disables_sensors() {
    let server = mock_controller().await;
    let home = TempDir::new().unwrap();
    let file = write_config(home.path(), &profile_config(&server, r#"["wan"]"#));

    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "hunter2")
        .args(["options", "set", "sensor=false", "-o", "plain"])
        .assert()
        .success()
        .stdout("sensor=false\n");

    let saved = std::fs::read_to_string(&file).unwrap();
    assert!(saved.contains("sensor = false"), "{saved}");

    unifigw_cmd(home.path())
        .args(["options", "show", "-o", "plain"])
        .assert()
        .success()
        .stdout("sensor=false\n");

    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "hunter2")
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout("[]\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_watch_with_sensors_disabled_exits() {
    let server = mock_controller().await;
    let home = TempDir::new().unwrap();
    let mut config = profile_config(&server, r#"["wan"]"#);
    config.push_str("\n[profiles.lab.options]\nsensor = false\n");
    write_config(home.path(), &config);

    unifigw_cmd(home.path())
        .env("UNIFIGW_PASSWORD", "hunter2")
        .arg("watch")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Nothing to watch"));
}
