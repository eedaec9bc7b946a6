//! Integration tests for the folio binary. None of these reach the network.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;

/// Config whose GitHub endpoint refuses connections
fn unreachable_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[github]\napi_url = \"http://127.0.0.1:9\"\naccounts = [\"frukose\"]\ntimeout_secs = 2\n",
    )
    .unwrap();
    path
}

#[test]
fn test_profile_command() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("profile");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Olorunishola Farouk"))
        .stdout(predicate::str::contains("Backend & Core: Java, SQL, Node.js"))
        .stdout(predicate::str::contains("https://github.com/farouk908"));
}

#[test]
fn test_projects_fall_back_to_seed_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = unreachable_config(&dir);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.env_remove("FOLIO_ACCOUNTS")
        .arg("--config")
        .arg(&config)
        .args(["projects", "--format", "json"]);

    let output = cmd
        .assert()
        .success()
        .stderr(predicate::str::contains("showing fallback data"));
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let json: Value = serde_json::from_str(&stdout).expect("valid JSON output");
    let projects = json.as_array().expect("array of projects");
    assert_eq!(projects.len(), 4);
    assert_eq!(projects[0]["name"], "Java Library Management System");
    assert_eq!(projects[0]["liveDemoUrl"], "#");
}

#[test]
fn test_show_unknown_project_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = unreachable_config(&dir);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.env_remove("FOLIO_ACCOUNTS")
        .arg("--config")
        .arg(&config)
        .args(["show", "does-not-exist"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no project with id does-not-exist"));
}

#[test]
fn test_ask_without_key_gets_canned_reply() {
    let dir = tempfile::tempdir().unwrap();
    let config = unreachable_config(&dir);

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.env_remove("FOLIO_ACCOUNTS")
        .env_remove("GEMINI_API_KEY")
        .arg("--config")
        .arg(&config)
        .args(["ask", "What do you build?"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "having a little trouble connecting right now. Reach out to me at 07030195046",
        ));
}

#[test]
fn test_zero_top_is_rejected() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.args(["--top", "0", "projects"]);

    cmd.assert().failure();
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    cargo_bin_cmd!("folio")
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    // Second init without --force refuses to clobber
    cargo_bin_cmd!("folio")
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cargo_bin_cmd!("folio")
        .env_remove("FOLIO_ACCOUNTS")
        .env("GEMINI_API_KEY", "AIzaSyExampleKey123")
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top_n = 9"))
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("AIzaSyExampleKey123").not());
}
