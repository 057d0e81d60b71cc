//! Command-line tests for the superdev binary

#[macro_use]
mod common;

use assert_cmd::Command;
use common::GitFixture;
use predicates::prelude::*;

fn superdev() -> Command {
    let mut command = Command::cargo_bin("superdev").unwrap();
    command.env_remove("SUPERDEV_CATALOG");
    command.env_remove("SUPERDEV_BASE_DIR");
    command.env_remove("SUPERDEV_JOBS");
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn test_help_lists_commands() {
    superdev()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("logger"));
}

#[test]
fn test_version_includes_build_metadata() {
    superdev()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("superdev {} (", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_missing_catalog_is_fatal() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    superdev()
        .current_dir(temp_dir.path())
        .args(["--no-color", "sync", "--catalog", "nope.json", "--base-dir", "projects"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("Catalog file not found"));
}

#[test]
fn test_invalid_catalog_entry_is_fatal() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let catalog = temp_dir.path().join("projects.yml");
    std::fs::write(&catalog, "h:\n  git_url: https://github.com/hypothesis/h.git\n  branch: main\n").unwrap();

    superdev()
        .args(["--no-color", "sync", "--base-dir"])
        .arg(temp_dir.path().join("projects"))
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .code(1);
}

#[test]
fn test_sync_reports_every_project() {
    require_git!();
    let fixture = GitFixture::new();
    fixture.create_remote("h");
    fixture.create_remote("via");
    let catalog = fixture.write_catalog(&[("h", vec!["dev"]), ("via", vec![])]);

    superdev()
        .args(["--no-color", "init", "--countdown", "0", "--env-tool", "true", "-j", "2", "--catalog"])
        .arg(&catalog)
        .arg("--base-dir")
        .arg(fixture.base_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("h         (main)                          OK: Cloned"))
        .stdout(predicate::str::contains("via       (main)                          OK: Cloned"));

    assert!(fixture.checkout("h").join("README.md").exists());
}

#[test]
fn test_sync_failure_exits_with_status_2() {
    require_git!();
    let fixture = GitFixture::new();
    fixture.create_remote("lms");
    let catalog = fixture.write_catalog(&[("lms", vec!["functests"])]);

    superdev()
        .args(["--no-color", "sync", "--countdown", "0", "--env-tool", "false", "--catalog"])
        .arg(&catalog)
        .arg("--base-dir")
        .arg(fixture.base_dir())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("ERR: Environment prep failed for 'functests'"));
}

#[test]
fn test_logger_relays_process_output() {
    let payload = "processname:web groupname:web pid:7 channel:stdout\nListening\nBooting worker\n";
    let input = format!(
        "ver:3.0 server:supervisor serial:1 pool:logger poolserial:1 eventname:PROCESS_LOG_STDOUT len:{}\n{}",
        payload.len(),
        payload
    );

    superdev()
        .arg("logger")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("READY\nRESULT 2\nOKREADY\n")
        .stderr(predicate::str::contains("web | Listening\nweb | Booting worker\n"));
}

#[test]
fn test_unusable_git_is_fatal() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let catalog = temp_dir.path().join("projects.yml");
    std::fs::write(&catalog, "h:\n  git_url: https://github.com/hypothesis/h.git\n").unwrap();

    superdev()
        .args(["--no-color", "sync", "--git", "superdev-no-such-git", "--catalog"])
        .arg(&catalog)
        .arg("--base-dir")
        .arg(temp_dir.path().join("projects"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("superdev-no-such-git"));

    assert!(!temp_dir.path().join("projects").join("h").exists());
}
