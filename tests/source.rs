mod common;

use common::{cargo_bin, write_tempfile};
use predicates::prelude::*;

#[test]
fn reads_program_file_with_comments() {
    let tf = write_tempfile("# print an at sign\n++++++++ [ >++++++++ <- ] # loop\n>.\n");
    cargo_bin()
        .arg(tf.path())
        .assert()
        .success()
        .stdout("@\n")
        .stderr("");
}

#[test]
fn reads_program_from_stdin() {
    cargo_bin()
        .write_stdin("+++\n.\n")
        .arg("-d")
        .assert()
        .success()
        .stdout("3 \n");
}

#[test]
fn dash_means_stdin() {
    cargo_bin()
        .args(["-d", "-"])
        .write_stdin("++.")
        .assert()
        .success()
        .stdout("2 \n");
}

#[test]
fn invalid_characters_are_reported_but_harmless() {
    let tf = write_tempfile("+\n+x.\n");
    cargo_bin()
        .args(["-d"])
        .arg(tf.path())
        .assert()
        .success()
        .stdout("2 \n")
        .stderr(predicate::str::contains("invalid character `x' at line 2 discarded"));
}

#[test]
fn ignore_flag_silences_invalid_characters() {
    cargo_bin()
        .args(["-i", "-d", "-e", "hello ++ world ."])
        .assert()
        .success()
        .stdout("2 \n")
        .stderr("");
}

#[test]
fn eval_takes_precedence_over_program_file() {
    // The file is never opened, so a missing path is not an error.
    cargo_bin()
        .args(["-d", "-e", "++.", "no/such/program.bf"])
        .assert()
        .success()
        .stdout("2 \n")
        .stderr(predicate::str::contains(
            "warning: ignoring program file no/such/program.bf because --eval was given",
        ));
}
