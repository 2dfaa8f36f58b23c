//! Integration tests for the `peplink-failover` binary.
//!
//! Argument parsing, help output, completions and config handling run
//! without a device; the run/status/wans tests drive a wiremock router.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const API_PATH: &str = "/cgi-bin/MANGA/api.cgi";

/// Build a [`Command`] for the binary with env isolation.
///
/// Clears all `PEPLINK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn failover_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("peplink-failover");
    cmd.env("HOME", "/tmp/peplink-failover-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/peplink-failover-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("WEBHOOK_URL");
    for var in [
        "CONFIG",
        "OUTPUT",
        "BASE_URL",
        "USERNAME",
        "PASSWORD",
        "TIMEOUT",
        "INSECURE",
        "CA_CERT",
        "PASSIVE_WANS",
        "WEBHOOK_URL",
        "EVENT_TYPE",
    ] {
        cmd.env_remove(format!("PEPLINK_{var}"));
    }
    cmd
}

/// Command preconfigured for a wiremock device via the environment.
fn device_cmd(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = failover_cmd();
    cmd.env("PEPLINK_BASE_URL", server.uri())
        .env("PEPLINK_USERNAME", "admin")
        .env("PEPLINK_PASSWORD", "secret")
        .env("PEPLINK_TIMEOUT", "5");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so wiremock keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

async fn mount_device(server: &MockServer, wans: Value) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("func=login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "bauth=tok123; Path=/")
                .set_body_json(json!({ "stat": "ok" })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("func", "status.system.info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "response": { "device": { "model": "Balance 20X", "name": "BPL-021X" } }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("func", "status.wan.connection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wans))
        .mount(server)
        .await;
}

fn wans_with_failed_cellular() -> Value {
    json!({
        "stat": "ok",
        "response": {
            "1": { "name": "WAN", "enable": true, "message": "Connected" },
            "2": { "name": "Cellular", "enable": true, "message": "No Signal" },
            "3": { "name": "VLAN WAN 1", "enable": true, "message": "Disconnected" }
        }
    })
}

async fn mount_disable_cellular(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_json(json!({
            "func": "config.wan.connection.priority",
            "instantActive": true,
            "list": [{ "connId": 2, "enable": false }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stat": "ok" })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = failover_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    failover_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("WAN")
            .and(predicate::str::contains("run"))
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("wans")),
    );
}

#[test]
fn test_version_flag() {
    failover_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("peplink-failover"));
}

#[test]
fn test_completions_zsh() {
    failover_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    failover_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = failover_cmd().arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_run_without_device_config() {
    failover_cmd()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_wans_enable_requires_numeric_id() {
    let output = failover_cmd()
        .args(["wans", "enable", "cellular"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honours_flag() {
    failover_cmd()
        .args(["--config", "/etc/peplink/failover.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/etc/peplink/failover.toml"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    failover_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VLAN WAN 1"));
}

#[test]
fn test_config_show_redacts_password() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "base_url = \"https://192.168.50.1\"\nusername = \"admin\"\npassword = \"hunter2\""
    )
    .unwrap();

    failover_cmd()
        .arg("--config")
        .arg(file.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://192.168.50.1")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_config_show_missing_explicit_file() {
    failover_cmd()
        .args(["--config", "/nonexistent/peplink.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_show_json_reflects_env() {
    let output = failover_cmd()
        .env("PEPLINK_PASSIVE_WANS", "Starlink, Backup LTE")
        .env("WEBHOOK_URL", "https://hooks.example.com/wan")
        .args(["--output", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let cfg: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cfg["passive_wans"], json!(["Starlink", "Backup LTE"]));
    assert_eq!(cfg["webhook_url"], "https://hooks.example.com/wan");
}

// ── Device-bound commands ───────────────────────────────────────────

#[tokio::test]
async fn test_run_disables_failed_wan() {
    let server = MockServer::start().await;
    mount_device(&server, wans_with_failed_cellular()).await;
    mount_disable_cellular(&server, 1).await;

    let mut cmd = device_cmd(&server);
    cmd.args(["--output", "json", "run"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["identity"]["model_name"], "Balance 20X");
    assert_eq!(report["actions"].as_array().unwrap().len(), 1);
    assert_eq!(report["actions"][0]["wan_name"], "Cellular");
    assert_eq!(report["actions"][0]["outcome"]["status"], "applied");
    assert_eq!(
        report["actions"][0]["outcome"]["notification"]["status"],
        "not_configured"
    );
    assert_eq!(report["wans"][2]["health"], "exempt");
}

#[tokio::test]
async fn test_run_dry_run_writes_nothing() {
    let server = MockServer::start().await;
    mount_device(&server, wans_with_failed_cellular()).await;
    mount_disable_cellular(&server, 0).await;

    let mut cmd = device_cmd(&server);
    cmd.args(["run", "--dry-run"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("planned"), "{stdout}");
    assert!(stdout.contains("Dry run"), "{stdout}");
}

#[tokio::test]
async fn test_run_all_connected() {
    let server = MockServer::start().await;
    mount_device(
        &server,
        json!({
            "stat": "ok",
            "response": { "1": { "name": "WAN", "enable": true, "message": "Connected" } }
        }),
    )
    .await;

    let mut cmd = device_cmd(&server);
    cmd.args(["--output", "plain", "run"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "All WANs are connected"
    );
}

#[tokio::test]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "fail", "code": 401, "message": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let mut cmd = device_cmd(&server);
    cmd.arg("run");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_unreachable_device_exits_with_connection_code() {
    let mut cmd = failover_cmd();
    cmd.env("PEPLINK_BASE_URL", "http://127.0.0.1:9")
        .env("PEPLINK_USERNAME", "admin")
        .env("PEPLINK_PASSWORD", "secret")
        .arg("status");
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
}

#[tokio::test]
async fn test_status_lists_wan_health() {
    let server = MockServer::start().await;
    mount_device(&server, wans_with_failed_cellular()).await;
    mount_disable_cellular(&server, 0).await;

    let mut cmd = device_cmd(&server);
    cmd.args(["--output", "plain", "status"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "1\tHealthy\tWAN",
            "2\tUnhealthy\tCellular",
            "3\tExempt\tVLAN WAN 1"
        ]
    );
}

#[tokio::test]
async fn test_wans_disable_by_hand() {
    let server = MockServer::start().await;
    mount_device(&server, wans_with_failed_cellular()).await;
    mount_disable_cellular(&server, 1).await;

    let mut cmd = device_cmd(&server);
    cmd.args(["--output", "plain", "wans", "disable", "2"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "applied, no webhook configured"
    );
}

#[tokio::test]
async fn test_wans_disable_unknown_id() {
    let server = MockServer::start().await;
    mount_device(&server, wans_with_failed_cellular()).await;

    let mut cmd = device_cmd(&server);
    cmd.args(["wans", "disable", "42"]);
    let output = run_blocking(cmd).await;

    assert!(!output.status.success());
    assert!(combined_output(&output).contains("WAN 42 not found"));
}
