use std::io::Write;

/// The binary under test, isolated from any user config file or environment.
pub fn cargo_bin() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("ringtape").expect("ringtape binary");
    cmd.env("RINGTAPE_CONFIG", std::env::temp_dir().join("ringtape-tests-no-such-config.toml"))
        .env_remove("RINGTAPE_ARRAY_SIZE")
        .env_remove("RINGTAPE_EOF")
        .env_remove("RUST_LOG");
    cmd
}

#[allow(dead_code)]
pub fn write_tempfile(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}
