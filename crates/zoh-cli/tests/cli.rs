use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zoh(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zoh").unwrap();
    cmd.env("ZOH_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("ZOH_ACCESS_TOKEN")
        .env_remove("ZOH_REGION")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    zoh(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"))
        .stdout(predicate::str::contains("mail"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    zoh(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_set_then_show() {
    let dir = TempDir::new().unwrap();

    zoh(&dir)
        .args(["config", "set", "region", "eu"])
        .assert()
        .success();
    zoh(&dir)
        .args(["config", "set", "access_token", "1000.abcdefghijklmnop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcdefghijklmnop").not());

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("region = \"eu\""));

    zoh(&dir)
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"region\": \"eu\""))
        .stdout(predicate::str::contains("mnop"))
        .stdout(predicate::str::contains("abcdefghijklmnop").not());
}

#[test]
fn test_unknown_config_key_fails() {
    let dir = TempDir::new().unwrap();
    zoh(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_token_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    zoh(&dir)
        .args(["admin", "users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access token required"));
}

#[test]
fn test_bad_spam_category_rejected() {
    let dir = TempDir::new().unwrap();
    zoh(&dir)
        .args(["mail", "admin", "spam", "get", "grey-list"])
        .assert()
        .failure();
}
