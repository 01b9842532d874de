use std::collections::HashMap;
use std::fs;
use std::io::{self, Stdin, Stdout};
use cross_xdg::BaseDirs;

/// Tape length used when none is configured.
pub const DEFAULT_TAPE_SIZE: usize = 1024;

/// File name looked up under the user's XDG config directory.
pub const CONFIG_FILE_NAME: &str = "bf-tape.toml";

/// Engine construction parameters.
///
/// Every field can be overridden independently; `Config::default()` uses the
/// process's stdout and stdin and a 1024-cell tape.
#[derive(Debug, Clone)]
pub struct Config<O, I> {
    pub output: O,
    pub input: I,
    pub tape_size: usize,
    /// Memoize bracket matches after their first scan.
    pub jump_cache: bool,
}

impl Default for Config<Stdout, Stdin> {
    fn default() -> Self {
        Self {
            output: io::stdout(),
            input: io::stdin(),
            tape_size: DEFAULT_TAPE_SIZE,
            jump_cache: false,
        }
    }
}

impl<O, I> Config<O, I> {
    pub fn new(output: O, input: I) -> Self {
        Self {
            output,
            input,
            tape_size: DEFAULT_TAPE_SIZE,
            jump_cache: false,
        }
    }

    pub fn with_output<O2>(self, output: O2) -> Config<O2, I> {
        Config {
            output,
            input: self.input,
            tape_size: self.tape_size,
            jump_cache: self.jump_cache,
        }
    }

    pub fn with_input<I2>(self, input: I2) -> Config<O, I2> {
        Config {
            output: self.output,
            input,
            tape_size: self.tape_size,
            jump_cache: self.jump_cache,
        }
    }

    pub fn with_tape_size(mut self, tape_size: usize) -> Self {
        self.tape_size = tape_size;
        self
    }

    pub fn with_jump_cache(mut self, enabled: bool) -> Self {
        self.jump_cache = enabled;
        self
    }

    /// Overlay values from a user defaults file.
    pub fn with_user_defaults(mut self, defaults: &UserDefaults) -> Self {
        if let Some(size) = defaults.tape_size {
            self.tape_size = size;
        }
        if let Some(cache) = defaults.jump_cache {
            self.jump_cache = cache;
        }
        self
    }
}

/// Values read from the `[engine]` section of the user config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDefaults {
    pub tape_size: Option<usize>,
    pub jump_cache: Option<bool>,
}

/// Load `$XDG_CONFIG_HOME/bf-tape.toml`, or empty defaults if it is missing.
pub fn load_user_defaults() -> UserDefaults {
    load_from_toml().unwrap_or_default()
}

fn load_from_toml() -> Option<UserDefaults> {
    // On Linux: /home/<user>/.config, on macOS: /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let path = base_dirs.config_home().join(CONFIG_FILE_NAME);

    let content = fs::read_to_string(path).ok()?;
    Some(parse_user_defaults(&content))
}

/// Small section/key reader: only `[engine]` is consulted, values may be
/// quoted or bare, anything unparseable is skipped.
pub fn parse_user_defaults(content: &str) -> UserDefaults {
    let mut in_engine = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_engine = line[1..line.len() - 1].trim() == "engine";
            continue;
        }
        if !in_engine { continue; }
        if let Some((key, raw)) = line.split_once('=') {
            let raw = raw.trim();
            let val = if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
                &raw[1..raw.len() - 1]
            } else {
                raw
            };
            map.insert(key.trim().to_string(), val.to_string());
        }
    }

    UserDefaults {
        tape_size: map.get("tape_size").and_then(|v| v.parse::<usize>().ok()),
        jump_cache: map.get("jump_cache").and_then(|v| parse_bool(v)),
    }
}

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
