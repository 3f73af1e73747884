use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfi").unwrap();
    cmd.env("BFI_CONFIG", "/nonexistent/bfi.toml");
    cmd
}

#[test]
fn help_goes_to_stderr_and_exits_0() {
    cargo_bin()
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("--code")));
}

#[test]
fn short_help() {
    cargo_bin().arg("-h").assert().code(0).stderr(predicate::str::contains("Usage:"));
}

#[test]
fn version_banner() {
    cargo_bin()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!("bfi v{}\n", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    cargo_bin().arg("--turbo").assert().code(2);
}

#[test]
fn empty_code_starts_the_shell() {
    cargo_bin()
        .env_remove("BFI_SHELL_MODE")
        .env_remove("BFI_DEBUG")
        .args(["-c", ""])
        .write_stdin("status\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program loaded: No"));
}
