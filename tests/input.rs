mod common;

use common::cargo_bin;

#[test]
fn reads_bytes_from_stdin_and_echoes_them() {
    cargo_bin()
        .args(["-e", ",.,."])
        .write_stdin("Zy")
        .assert()
        .success()
        .stdout("Zy\n");
}

#[test]
fn eof_leaves_cell_unchanged() {
    // Reads twice but only one byte is available.
    cargo_bin()
        .args(["-d", "-e", ",.,."])
        .write_stdin("A")
        .assert()
        .success()
        .stdout("65 65 \n");
}

#[test]
fn eof_zero_policy_clears_cell() {
    cargo_bin()
        .args(["-d", "--eof", "zero", "-e", ",.,."])
        .write_stdin("A")
        .assert()
        .success()
        .stdout("65 0 \n");
}

#[test]
fn unbuffered_flag_is_harmless_without_a_terminal() {
    cargo_bin()
        .args(["-b", "-e", ",."])
        .write_stdin("q")
        .assert()
        .success()
        .stdout("q\n")
        .stderr("");
}
