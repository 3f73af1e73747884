// Exercises the ',' (input) instruction by feeding bytes on stdin to
// `bfi -c` and checking what the program echoes back.
use assert_cmd::Command;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfi").expect("failed to locate bfi binary");
    cmd.env("BFI_CONFIG", "/nonexistent/bfi.toml").env_remove("BFI_DEBUG");
    cmd
}

#[test]
fn reads_from_stdin_and_echoes_byte() {
    cargo_bin()
        .arg("-c")
        .arg(",.")
        .write_stdin("Z")
        .assert()
        .success()
        .stdout("Z");
}

#[test]
fn eof_reads_as_zero() {
    // cell is bumped to 1 first so the EOF read is observable as 0
    cargo_bin()
        .args(["-c", "+,."])
        .write_stdin("")
        .assert()
        .success()
        .stdout("\u{0}");
}

#[test]
fn cat_program_copies_stdin() {
    cargo_bin()
        .args(["-c", ",[.,]"])
        .write_stdin("copy me\n")
        .assert()
        .success()
        .stdout("copy me\n");
}
