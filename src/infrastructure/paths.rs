//! Path utilities for storage and log locations.
//!
//! The data directory is resolved in this order:
//!
//! 1. `ROSTER_DATA_DIR` environment variable
//! 2. `data_dir` from [`Config`]
//! 3. `$HOME/.local/share/roster`
//! 4. `./.roster` when `HOME` is unset

use crate::Config;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Name of the JSON store inside the data directory.
pub const DATA_FILE_NAME: &str = "employees.json";

/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "roster.log";

/// Returns the data directory for roster storage and logs.
///
/// # Examples
///
/// ```
/// use roster::infrastructure::get_data_dir;
/// use roster::Config;
///
/// let config = Config { data_dir: Some("/srv/roster".into()), ..Config::default() };
/// if std::env::var_os("ROSTER_DATA_DIR").is_none() {
///     assert_eq!(get_data_dir(&config).to_str(), Some("/srv/roster"));
/// }
/// ```
#[must_use]
pub fn get_data_dir(config: &Config) -> PathBuf {
    resolve_data_dir(
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        config.data_dir.as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn resolve_data_dir(env_dir: Option<&str>, config_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|dir| !dir.trim().is_empty()) {
        return PathBuf::from(expand_tilde_with(dir, home));
    }
    if let Some(dir) = config_dir.filter(|dir| !dir.trim().is_empty()) {
        return PathBuf::from(expand_tilde_with(dir, home));
    }
    home.map_or_else(
        || PathBuf::from(".roster"),
        |home| PathBuf::from(home).join(".local").join("share").join("roster"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use roster::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        Some(home) if path == "~" => home.to_string(),
        _ => path.to_string(),
    }
}
