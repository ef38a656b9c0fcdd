mod common;

use common::{cargo_bin, write_tempfile};

#[test]
fn config_file_sets_defaults() {
    let cfg = write_tempfile("[defaults]\ndigits = true\nno_newline = true\n");
    cargo_bin()
        .env("RINGTAPE_CONFIG", cfg.path())
        .args(["-e", "+++."])
        .assert()
        .success()
        .stdout("3 ");
}

#[test]
fn environment_overrides_config_file() {
    let cfg = write_tempfile("[defaults]\narray_size = 100\nprint = 2\nno_newline = true\n");
    cargo_bin()
        .env("RINGTAPE_CONFIG", cfg.path())
        .env("RINGTAPE_ARRAY_SIZE", "2")
        .args(["-e", ">>+"])
        .assert()
        .success()
        .stdout("1 0\n");
}

#[test]
fn flags_override_environment() {
    cargo_bin()
        .env("RINGTAPE_EOF", "zero")
        .args(["-d", "--eof", "unchanged", "-e", "+,."])
        .write_stdin("")
        .assert()
        .success()
        .stdout("1 \n");
}
