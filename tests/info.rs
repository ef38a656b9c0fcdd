mod common;

use common::cargo_bin;
use predicates::prelude::*;

#[test]
fn version_lists_configuration() {
    cargo_bin()
        .arg("-V")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Size of array cells: 1 byte\n")
                .and(predicate::str::contains("Default length of data array: 30000")),
        );
}

#[test]
fn commands_summarises_instruction_set() {
    cargo_bin()
        .arg("--commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("Brainfuck commands:").and(predicate::str::contains(" ,  Read character")));
}

#[test]
fn help_prints_usage_to_stderr() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("--array-size")));
}
