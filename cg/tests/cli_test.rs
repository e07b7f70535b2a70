//! Integration tests for the `cg` binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `cg` isolated from the caller's config files, environment and terminal
fn cg(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cg").expect("binary built");
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env("NO_COLOR", "1")
        .env_remove("CHATGALLERY_ENDPOINT")
        .env_remove("CHATGALLERY_CHAT_MODEL_ID")
        .env_remove("CHATGALLERY_API_KEY")
        .env_remove("CHATGALLERY_PROVIDER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_shows_all_samples() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("basic-chat"))
        .stdout(predicate::str::contains("function-calling"))
        .stdout(predicate::str::contains("vision-local"));
}

#[test]
fn test_out_of_range_selection() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .args(["42", "--no-wait"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid selection '42'"));
}

#[test]
fn test_negative_selection() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .args(["-1", "--no-wait"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid selection '-1'"));
}

#[test]
fn test_menu_reads_selection_from_stdin() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .arg("--no-wait")
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("json-mode"))
        .stderr(predicate::str::contains("Invalid selection 'abc'"));
}

#[test]
fn test_menu_with_no_input() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("No selection entered"));
}

#[test]
fn test_missing_endpoint_is_configuration_error() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .args(["1", "--no-wait"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("CHATGALLERY_ENDPOINT"));
}

#[test]
fn test_missing_model_is_configuration_error() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .args(["1", "--no-wait"])
        .env("CHATGALLERY_ENDPOINT", "http://127.0.0.1:9")
        .assert()
        .success()
        .stderr(predicate::str::contains("chat-model-id"));
}

#[test]
fn test_explicit_config_must_exist() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .args(["1", "--no-wait", "--config", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    cg(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cg "));
}

fn log_contents(home: &Path) -> String {
    std::fs::read_to_string(home.join(".local/share/chatgallery/logs/chatgallery.log")).unwrap()
}

#[test]
fn test_config_source_is_logged() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("gallery.yml"), "log-level: debug\n").unwrap();

    cg(home.path())
        .args(["--list", "--config", "gallery.yml"])
        .assert()
        .success();

    assert!(log_contents(home.path()).contains("Loaded config from: gallery.yml"));
}

#[test]
fn test_defaults_are_logged_without_config_file() {
    let home = TempDir::new().unwrap();
    cg(home.path()).arg("--list").assert().success();

    assert!(log_contents(home.path()).contains("No config file found, using defaults"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sample_runs_against_configured_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Octopuses have three hearts." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join(".chatgallery.yml"),
        format!("llm:\n  endpoint: {}\n  chat-model-id: gallery-model\n", server.uri()),
    )
    .unwrap();

    let assert = tokio::task::spawn_blocking({
        let home = home.path().to_path_buf();
        move || cg(&home).args(["1", "--no-wait"]).assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Octopuses have three hearts."))
        .stdout(predicate::str::contains("Sample completed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_resource_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let empty = home.path().join("no-resources");
    std::fs::create_dir(&empty).unwrap();

    let assert = tokio::task::spawn_blocking({
        let home = home.path().to_path_buf();
        let uri = server.uri();
        move || {
            cg(&home)
                .args(["10", "--no-wait", "--resources"])
                .arg(&empty)
                .env("CHATGALLERY_ENDPOINT", uri)
                .env("CHATGALLERY_CHAT_MODEL_ID", "gallery-model")
                .assert()
        }
    })
    .await
    .unwrap();

    assert
        .success()
        .stderr(predicate::str::contains("Sample failed"))
        .stderr(predicate::str::contains("sample.png"));
}
