use predicates::prelude::*;
use assert_cmd::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfi").unwrap();
    cmd.env("BFI_CONFIG", "/nonexistent/bfi.toml")
        .env_remove("BFI_DEBUG")
        .env_remove("BFI_SHELL_MODE");
    cmd
}

#[test]
fn auto_detect_non_tty_runs_bare_shell() {
    cargo_bin()
        .write_stdin("code +++.\nrun\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{3}"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn editor_on_non_tty_is_error_exit_1() {
    cargo_bin()
        .arg("--editor")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn env_mode_respected_flags_override() {
    cargo_bin()
        .env("BFI_SHELL_MODE", "editor")
        .arg("--bare")
        .write_stdin("code +++.\nrun\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{3}"));
}

#[test]
fn env_editor_on_non_tty_is_error() {
    cargo_bin()
        .env("BFI_SHELL_MODE", "editor")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TTY"));
}

#[test]
fn invalid_env_mode_is_error() {
    cargo_bin()
        .env("BFI_SHELL_MODE", "sideways")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid BFI_SHELL_MODE value: sideways"));
}

#[test]
fn bare_and_editor_flags_conflict() {
    cargo_bin()
        .args(["--bare", "--editor"])
        .write_stdin("")
        .assert()
        .code(2);
}
