use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn glassmark_cmd() -> Command {
    Command::cargo_bin("glassmark").expect("binary exists")
}

#[test]
fn help_prints_usage() {
    glassmark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transparent screen annotation overlay for Wayland compositors",
        ));
}

#[test]
fn version_prints_package_version() {
    glassmark_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn overlay_requires_wayland_env() {
    glassmark_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wayland environment required"));
}

#[test]
fn save_dir_flag_is_accepted() {
    let temp = TempDir::new().unwrap();

    // The flag parses; startup still fails fast without a compositor.
    glassmark_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .args(["--save-dir", temp.path().to_str().unwrap(), "--no-panel"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wayland environment required"));
}

#[test]
fn unknown_flag_is_rejected() {
    glassmark_cmd()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
