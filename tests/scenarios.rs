mod common;

use common::cargo_bin;

#[test]
fn two_increments_then_output() {
    cargo_bin()
        .args(["-e", "++."])
        .assert()
        .success()
        .stdout(&[2u8, b'\n'][..])
        .stderr("");
}

#[test]
fn multiplication_loop_prints_at_sign() {
    cargo_bin()
        .args(["-e", "++++++++[>++++++++<-]>."])
        .assert()
        .success()
        .stdout("@\n");
}

#[test]
fn digits_mode_prints_numbers() {
    cargo_bin()
        .args(["-d", "-e", "+++.---."])
        .assert()
        .success()
        .stdout("3 0 \n");
}

#[test]
fn dump_prints_first_cells() {
    cargo_bin()
        .args(["-p", "2", "-e", "+++"])
        .assert()
        .success()
        .stdout("\n3 0\n");
}

#[test]
fn no_newline_flag_suppresses_trailing_newline() {
    cargo_bin()
        .args(["-n", "-e", "++++++++[>++++++++<-]>+."])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn small_array_wraps_pointer() {
    // Three cells: the fourth `>` lands back on cell 0.
    cargo_bin()
        .args(["-a", "3", "-p", "3", "-n", "-e", ">>>+<+"])
        .assert()
        .success()
        .stdout("1 0 1\n");
}

#[test]
fn repeated_eval_strings_are_concatenated() {
    cargo_bin()
        .args(["-d", "-e", "+++", "-e", "."])
        .assert()
        .success()
        .stdout("3 \n");
}

#[test]
fn empty_program_exits_quietly() {
    cargo_bin()
        .args(["-e", "  # nothing here"])
        .assert()
        .success()
        .stdout("")
        .stderr("");
}
