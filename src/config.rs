//! Layered defaults for the interpreter settings.
//!
//! Built-in values are overridden by `ringtape.toml` in the XDG config home,
//! which is overridden by `RINGTAPE_*` environment variables. Command-line
//! flags are applied last by the binary.

use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use cross_xdg::BaseDirs;

use crate::engine::{EngineConfig, EofBehavior, OutputMode};
use crate::loader::InvalidCharPolicy;

/// Points at an alternative config file.
pub const CONFIG_PATH_VAR: &str = "RINGTAPE_CONFIG";
pub const ARRAY_SIZE_VAR: &str = "RINGTAPE_ARRAY_SIZE";
pub const EOF_VAR: &str = "RINGTAPE_EOF";

/// Settings that may be preset outside the command line. `None` means
/// "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub array_size: Option<NonZeroUsize>,
    pub digits: Option<bool>,
    pub ignore_invalid: Option<bool>,
    pub no_newline: Option<bool>,
    pub print: Option<usize>,
    pub eof: Option<EofBehavior>,
}

impl Defaults {
    /// Load the config file (if any) and overlay the process environment.
    pub fn load() -> Self {
        let from_file = config_path()
            .and_then(|path| {
                tracing::debug!(path = %path.display(), "looking for config file");
                fs::read_to_string(path).ok()
            })
            .map(|content| Self::parse(&content))
            .unwrap_or_default();
        from_file.with_env(|key| std::env::var(key).ok())
    }

    /// Parse the `[defaults]` section of a config file. Values may be quoted
    /// or bare; unknown keys and unparseable values are skipped.
    pub fn parse(content: &str) -> Self {
        let mut in_defaults = false;
        let mut map: HashMap<String, String> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_defaults = line[1..line.len() - 1].trim() == "defaults";
                continue;
            }
            if !in_defaults {
                continue;
            }
            if let Some((key, raw)) = line.split_once('=') {
                let raw = raw.trim();
                let value = raw
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(raw);
                map.insert(key.trim().to_string(), value.to_string());
            }
        }

        let mut defaults = Self::default();

        macro_rules! set {
            ($field:ident, $key:literal, $parse:expr) => {
                if let Some(raw) = map.get($key) {
                    match $parse(raw.as_str()) {
                        Some(v) => defaults.$field = Some(v),
                        None => tracing::warn!(key = $key, value = %raw, "ignoring invalid config value"),
                    }
                }
            };
        }

        set!(array_size, "array_size", parse_size);
        set!(digits, "digits", parse_bool);
        set!(ignore_invalid, "ignore_invalid", parse_bool);
        set!(no_newline, "no_newline", parse_bool);
        set!(print, "print", |s: &str| s.parse::<usize>().ok());
        set!(eof, "eof", |s: &str| s.parse::<EofBehavior>().ok());

        defaults
    }

    /// Overlay values found through `lookup` (normally the environment).
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ARRAY_SIZE_VAR) {
            match parse_size(&raw) {
                Some(size) => self.array_size = Some(size),
                None => tracing::warn!(var = ARRAY_SIZE_VAR, value = %raw, "ignoring invalid environment value"),
            }
        }
        if let Some(raw) = lookup(EOF_VAR) {
            match raw.parse::<EofBehavior>() {
                Ok(eof) => self.eof = Some(eof),
                Err(e) => tracing::warn!(var = EOF_VAR, "{e}"),
            }
        }
        self
    }

    /// Engine settings with every unset value at its built-in default.
    pub fn engine_config(&self) -> EngineConfig {
        let base = EngineConfig::default();
        EngineConfig {
            tape_size: self.array_size.unwrap_or(base.tape_size),
            output_mode: if self.digits.unwrap_or(false) {
                OutputMode::Numeric
            } else {
                OutputMode::Char
            },
            eof: self.eof.unwrap_or(base.eof),
            trailing_newline: !self.no_newline.unwrap_or(false),
            dump_cells: self.print.unwrap_or(base.dump_cells),
        }
    }

    pub fn invalid_char_policy(&self) -> InvalidCharPolicy {
        if self.ignore_invalid.unwrap_or(false) {
            InvalidCharPolicy::Ignore
        } else {
            InvalidCharPolicy::Report
        }
    }
}

/// `$RINGTAPE_CONFIG`, or `ringtape.toml` in the XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("ringtape.toml");
    Some(path)
}

fn parse_size(s: &str) -> Option<NonZeroUsize> {
    s.trim().parse().ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
