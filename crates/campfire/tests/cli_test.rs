//! Integration tests for the `campfire` CLI binary.
//!
//! Argument parsing, help output and shell completions run without a
//! catalog service; data commands run against a wiremock server or in
//! `--offline` mode, with state kept in a per-test temp directory.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `campfire` binary with env isolation.
///
/// Clears all `CAMPFIRE_*` env vars and points config and data
/// directories into `home` so tests never touch real user state.
fn campfire_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("campfire");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("CAMPFIRE_CONFIG", home.join("config.toml"))
        .env_remove("CAMPFIRE_BASE_URL")
        .env_remove("CAMPFIRE_TIMEOUT")
        .env_remove("CAMPFIRE_DATA_DIR")
        .env_remove("CAMPFIRE_PERSIST_KEY")
        .env_remove("CAMPFIRE_OUTPUT")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(home.join("state"));
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a prepared command off the async runtime so wiremock keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

fn campsites() -> serde_json::Value {
    json!([
        { "id": 0, "name": "React Lake Campground", "image": "images/react-lake.jpg",
          "elevation": 1233, "featured": false, "description": "Nestled in the foothills" },
        { "id": 1, "name": "Chrome River Campground", "image": "images/chrome-river.jpg",
          "elevation": 877, "featured": true, "description": "Spend a few sunny days" }
    ])
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = cargo_bin_cmd!("campfire")
        .env("HOME", home.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("campsite")
                .and(predicate::str::contains("home"))
                .and(predicate::str::contains("favorite"))
                .and(predicate::str::contains("promotions")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("campfire"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = campfire_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_rating_out_of_range() {
    let home = tempfile::tempdir().unwrap();
    let output = campfire_cmd(home.path())
        .args(["comment", "1", "--author", "Ada", "--rating", "9", "--text", "hi"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("rating"));
}

#[test]
fn test_invalid_base_url_is_usage_error() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["--base-url", "not a url", "partners"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("base_url"));
}

// ── Offline state ───────────────────────────────────────────────────

#[test]
fn test_offline_listing_starts_empty() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["--offline", "-o", "json-compact", "campsites"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_favorite_toggle_persists_between_runs() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["--offline", "-o", "plain", "favorite", "5"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\ttrue\n"));

    campfire_cmd(home.path())
        .args(["--offline", "-o", "plain", "favorite", "5"])
        .assert()
        .success()
        .stdout(predicate::str::diff("5\tfalse\n"));
}

#[test]
fn test_status_reports_idle_collections() {
    let home = tempfile::tempdir().unwrap();
    let output = campfire_cmd(home.path())
        .args(["-o", "json", "status"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r["status"] == "idle"));
}

#[test]
fn test_purge_clears_favorites() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["--offline", "favorite", "2"])
        .assert()
        .success();
    campfire_cmd(home.path())
        .arg("purge")
        .assert()
        .success()
        .stderr(predicate::str::contains("purged"));
    campfire_cmd(home.path())
        .args(["--offline", "-o", "plain", "favorite", "2"])
        .assert()
        .success()
        .stdout(predicate::str::diff("2\ttrue\n"));
}

#[test]
fn test_config_init_writes_resolved_config() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["--base-url", "http://camp.example:9000", "config", "init"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Config written"));

    let written = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("base_url = \"http://camp.example:9000\""));

    let output = campfire_cmd(home.path())
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["base_url"], "http://camp.example:9000");
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = tempfile::tempdir().unwrap();
    campfire_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success();
    campfire_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("force"));
    campfire_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

// ── Against a catalog service ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campsites"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let uri = server.uri();
    let home = tempfile::tempdir().unwrap();
    let mut cmd = campfire_cmd(home.path());
    cmd.args(["--base-url", uri.as_str(), "campsites"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(7));
    let text = combined_output(&output);
    assert!(
        text.contains("Unable to fetch, status: 404"),
        "Expected slice error in output:\n{text}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetched_campsites_are_saved_for_offline_use() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campsites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(campsites()))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let home = tempfile::tempdir().unwrap();
    let mut online = campfire_cmd(home.path());
    online.args(["--base-url", uri.as_str(), "campsites"]);
    let output = run(online).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Chrome River Campground"));

    let mut offline = campfire_cmd(home.path());
    offline.args(["--offline", "-o", "plain", "campsites"]);
    let output = run(offline).await;
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "0\tReact Lake Campground\n1\tChrome River Campground\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_refresh_falls_back_to_saved_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campsites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(campsites()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/campsites"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uri = server.uri();
    let home = tempfile::tempdir().unwrap();
    let mut first = campfire_cmd(home.path());
    first.args(["--base-url", uri.as_str(), "campsites"]);
    assert!(run(first).await.status.success());

    let mut second = campfire_cmd(home.path());
    second.args(["--base-url", uri.as_str(), "-o", "plain", "campsites"]);
    let output = run(second).await;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unable to fetch, status: 500"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("React Lake Campground"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_comment_is_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "campsiteId": 1, "rating": 5, "author": "Ada",
            "text": "Lovely", "date": "2026-10-16T12:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let home = tempfile::tempdir().unwrap();
    let mut cmd = campfire_cmd(home.path());
    cmd.args([
        "--base-url",
        uri.as_str(),
        "-o",
        "plain",
        "comment",
        "1",
        "--author",
        "Ada",
        "--rating",
        "5",
        "--text",
        "Lovely",
    ]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "7\n");
}
