//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, setting up the pipeline from
//! `tracing` macros to the rotating log file.

use super::file_writer::FileWriter;
use crate::infrastructure::paths::{get_data_dir, LOG_FILE_NAME};
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the configuration sets one.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based output.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters events by the resolved level directive
/// 2. Formats them as plain text lines without ANSI colors
/// 3. Writes to a rotating file with backups
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level` if set and valid
/// 3. Default: `"info"`
///
/// # File Location
///
/// Logs are written to `roster.log` in the data directory
/// (see [`get_data_dir`]).
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips setup if directory creation fails (logging is optional)
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use roster::observability::init_tracing;
/// use roster::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = get_data_dir(config);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let writer = FileWriter::new(data_dir.join(LOG_FILE_NAME));
    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(config.trace_level.as_deref()))
        .with(fmt_layer)
        .try_init();

    tracing::debug!(data_dir = ?data_dir, "tracing initialized");
}

/// Builds the filter from `RUST_LOG`, then the configured level, then the default.
fn env_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| directive_filter(configured))
}

fn directive_filter(configured: Option<&str>) -> EnvFilter {
    configured
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_is_used() {
        assert_eq!(directive_filter(Some("debug")).to_string(), "debug");
    }

    #[test]
    fn missing_or_invalid_level_falls_back_to_info() {
        assert_eq!(directive_filter(None).to_string(), "info");
        assert_eq!(directive_filter(Some("roster=notalevel")).to_string(), "info");
    }
}
