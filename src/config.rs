//! Process configuration: `.env` files and `RECKON_*` environment variables.

use std::path::Path;

use log::LevelFilter;

pub use crate::bytecode::config::{VmConfig, STACK_CAPACITY_VAR, STACK_POOL_SIZE_VAR};

pub const LOG_LEVEL_VAR: &str = "RECKON_LOG";

/// Load `.env` from `folder`. Variables already set in the process win.
///
/// Returns the number of variables that were set.
pub fn load_env_files(folder: &Path) -> usize {
    load_env_file(folder, ".env", false)
}

/// Load a single env file
///
/// # Arguments
/// * `folder` - The directory containing the file
/// * `filename` - The name of the file
/// * `override_existing` - Whether to override existing environment variables
pub fn load_env_file(folder: &Path, filename: &str, override_existing: bool) -> usize {
    let env_file = folder.join(filename);
    let Ok(content) = std::fs::read_to_string(&env_file) else {
        return 0;
    };

    let mut loaded = 0;
    for (key, value) in content.lines().filter_map(parse_env_line) {
        if override_existing || std::env::var(key).is_err() {
            std::env::set_var(key, value);
            loaded += 1;
        }
    }

    log::debug!("loaded {} variable(s) from {}", loaded, env_file.display());
    loaded
}

/// Split a `KEY=VALUE` line, skipping blanks and `#` comments and stripping
/// surrounding quotes from the value.
pub fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('"').trim_matches('\'');
    Some((key, value))
}

/// Log level from `RECKON_LOG`, `warn` when unset or unrecognized.
pub fn log_level() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|raw| parse_log_level(&raw))
        .unwrap_or(LevelFilter::Warn)
}

pub fn parse_log_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}
